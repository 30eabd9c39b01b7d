//! PostgreSQL implementation of WorkspaceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::Workspace;
use huddle_core::error::DomainError;
use huddle_core::traits::{RepoResult, WorkspaceRepository};
use huddle_core::value_objects::WorkspaceId;

use crate::models::WorkspaceModel;

use super::error::map_db_error;

/// PostgreSQL implementation of WorkspaceRepository
#[derive(Clone)]
pub struct PgWorkspaceRepository {
    pool: PgPool,
}

impl PgWorkspaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceRepository for PgWorkspaceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: WorkspaceId) -> RepoResult<Option<Workspace>> {
        let result = sqlx::query_as::<_, WorkspaceModel>(
            r"
            SELECT id, name, owner_id, join_code, created_at, updated_at
            FROM workspaces
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Workspace::from))
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[WorkspaceId]) -> RepoResult<Vec<Workspace>> {
        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, WorkspaceModel>(
            r"
            SELECT id, name, owner_id, join_code, created_at, updated_at
            FROM workspaces
            WHERE id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Workspace::from).collect())
    }

    #[instrument(skip(self, workspace), fields(workspace_id = %workspace.id))]
    async fn create(&self, workspace: &Workspace) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO workspaces (id, name, owner_id, join_code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(workspace.id.into_inner())
        .bind(&workspace.name)
        .bind(workspace.owner_id.into_inner())
        .bind(workspace.join_code.as_str())
        .bind(workspace.created_at)
        .bind(workspace.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, workspace), fields(workspace_id = %workspace.id))]
    async fn update(&self, workspace: &Workspace) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE workspaces
            SET name = $2, join_code = $3, updated_at = $4
            WHERE id = $1
            ",
        )
        .bind(workspace.id.into_inner())
        .bind(&workspace.name)
        .bind(workspace.join_code.as_str())
        .bind(workspace.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::WorkspaceNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: WorkspaceId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
