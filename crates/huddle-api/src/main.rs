//! huddle API server entry point

use huddle_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server terminated with an error");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().inspect_err(|e| {
        eprintln!("Failed to load configuration: {e}");
    })?;

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        storage = ?config.storage,
        "Configuration loaded"
    );

    huddle_api::run(config).await?;
    Ok(())
}
