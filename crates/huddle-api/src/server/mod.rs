//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;

use axum::Router;
use huddle_common::{AppConfig, AppError, JwtService, StorageBackend};
use huddle_core::SnowflakeGenerator;
use huddle_db::{create_pool, run_migrations, PoolConfig, Repositories};
use huddle_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(router.merge(health_routes()).with_state(state))
}

/// Open the configured entity store
async fn create_repositories(config: &AppConfig) -> Result<Repositories, AppError> {
    match (config.storage, &config.database) {
        (StorageBackend::Memory, _) => {
            info!("Using in-memory entity store");
            Ok(Repositories::in_memory())
        }
        (StorageBackend::Postgres, Some(database)) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");
            Ok(Repositories::postgres(pool))
        }
        (StorageBackend::Postgres, None) => Err(AppError::Config(
            "postgres storage selected without DATABASE_URL".to_string(),
        )),
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let repositories = create_repositories(&config).await?;

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.token_expiry);
    if let Some(site_url) = &config.site_url {
        info!(site_url = %site_url, "Accepting identity tokens for site");
    }

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .repositories(repositories)
        .snowflake_generator(snowflake_generator)
        .build()?;

    Ok(AppState::new(service_context, jwt_service, config))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener has no local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}
