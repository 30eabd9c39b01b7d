//! In-memory WorkspaceRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::instrument;

use huddle_core::entities::Workspace;
use huddle_core::error::DomainError;
use huddle_core::traits::{RepoResult, WorkspaceRepository};
use huddle_core::value_objects::WorkspaceId;

#[derive(Debug, Default)]
pub struct MemoryWorkspaceRepository {
    rows: RwLock<HashMap<WorkspaceId, Workspace>>,
}

#[async_trait]
impl WorkspaceRepository for MemoryWorkspaceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: WorkspaceId) -> RepoResult<Option<Workspace>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[WorkspaceId]) -> RepoResult<Vec<Workspace>> {
        let rows = self.rows.read();
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    #[instrument(skip(self, workspace), fields(workspace_id = %workspace.id))]
    async fn create(&self, workspace: &Workspace) -> RepoResult<()> {
        self.rows.write().insert(workspace.id, workspace.clone());
        Ok(())
    }

    #[instrument(skip(self, workspace), fields(workspace_id = %workspace.id))]
    async fn update(&self, workspace: &Workspace) -> RepoResult<()> {
        let mut rows = self.rows.write();
        let existing = rows
            .get_mut(&workspace.id)
            .ok_or(DomainError::WorkspaceNotFound)?;
        existing.name.clone_from(&workspace.name);
        existing.join_code = workspace.join_code.clone();
        existing.updated_at = workspace.updated_at;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: WorkspaceId) -> RepoResult<bool> {
        Ok(self.rows.write().remove(&id).is_some())
    }
}
