//! In-memory ChannelRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::instrument;

use huddle_core::entities::Channel;
use huddle_core::error::DomainError;
use huddle_core::traits::{ChannelRepository, RepoResult};
use huddle_core::value_objects::{ChannelId, WorkspaceId};

use super::index::Index;

#[derive(Debug, Default)]
struct ChannelTable {
    rows: HashMap<ChannelId, Channel>,
    by_workspace: Index<WorkspaceId, ChannelId>,
}

#[derive(Debug, Default)]
pub struct MemoryChannelRepository {
    table: RwLock<ChannelTable>,
}

#[async_trait]
impl ChannelRepository for MemoryChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ChannelId) -> RepoResult<Option<Channel>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Channel>> {
        let table = self.table.read();
        Ok(table
            .by_workspace
            .get(&workspace_id)
            .filter_map(|id| table.rows.get(&id).cloned())
            .collect())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        let mut table = self.table.write();
        table.by_workspace.insert(channel.workspace_id, channel.id);
        table.rows.insert(channel.id, channel.clone());
        Ok(())
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        let mut table = self.table.write();
        let existing = table
            .rows
            .get_mut(&channel.id)
            .ok_or(DomainError::ChannelNotFound)?;
        existing.name.clone_from(&channel.name);
        existing.updated_at = channel.updated_at;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ChannelId) -> RepoResult<bool> {
        let mut table = self.table.write();
        let Some(channel) = table.rows.remove(&id) else {
            return Ok(false);
        };
        table.by_workspace.remove(&channel.workspace_id, &id);
        Ok(true)
    }
}
