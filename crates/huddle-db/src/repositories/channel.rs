//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::Channel;
use huddle_core::error::DomainError;
use huddle_core::traits::{ChannelRepository, RepoResult};
use huddle_core::value_objects::{ChannelId, WorkspaceId};

use crate::models::ChannelModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ChannelId) -> RepoResult<Option<Channel>> {
        let result = sqlx::query_as::<_, ChannelModel>(
            "SELECT id, workspace_id, name, created_at, updated_at FROM channels WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Channel::from))
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Channel>> {
        let results = sqlx::query_as::<_, ChannelModel>(
            r"
            SELECT id, workspace_id, name, created_at, updated_at
            FROM channels
            WHERE workspace_id = $1
            ORDER BY id
            ",
        )
        .bind(workspace_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO channels (id, workspace_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(channel.id.into_inner())
        .bind(channel.workspace_id.into_inner())
        .bind(&channel.name)
        .bind(channel.created_at)
        .bind(channel.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        let result = sqlx::query("UPDATE channels SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(channel.id.into_inner())
            .bind(&channel.name)
            .bind(channel.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChannelNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ChannelId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM channels WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
