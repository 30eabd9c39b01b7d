//! PostgreSQL readiness probe

use async_trait::async_trait;
use sqlx::PgPool;

use huddle_core::traits::{RepoResult, StoreHealth};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgHealth {
    pool: PgPool,
}

impl PgHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for PgHealth {
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
