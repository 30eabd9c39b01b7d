//! In-memory ReactionRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::instrument;

use huddle_core::entities::Reaction;
use huddle_core::traits::{ReactionRepository, RepoResult};
use huddle_core::value_objects::{MemberId, MessageId, ReactionId, WorkspaceId};

use super::index::Index;

#[derive(Debug, Default)]
struct ReactionTable {
    rows: HashMap<ReactionId, Reaction>,
    by_message: Index<MessageId, ReactionId>,
    by_workspace: Index<WorkspaceId, ReactionId>,
    by_member: Index<MemberId, ReactionId>,
}

impl ReactionTable {
    fn collect(&self, ids: impl Iterator<Item = ReactionId>) -> Vec<Reaction> {
        ids.filter_map(|id| self.rows.get(&id).cloned()).collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryReactionRepository {
    table: RwLock<ReactionTable>,
}

#[async_trait]
impl ReactionRepository for MemoryReactionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReactionId) -> RepoResult<Option<Reaction>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_message(&self, message_id: MessageId) -> RepoResult<Vec<Reaction>> {
        let table = self.table.read();
        Ok(table.collect(table.by_message.get(&message_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Reaction>> {
        let table = self.table.read();
        Ok(table.collect(table.by_workspace.get(&workspace_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Reaction>> {
        let table = self.table.read();
        Ok(table.collect(table.by_member.get(&member_id)))
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        message_id: MessageId,
        member_id: MemberId,
        value: &str,
    ) -> RepoResult<Option<Reaction>> {
        let table = self.table.read();
        let found = table
            .by_message
            .get(&message_id)
            .filter_map(|id| table.rows.get(&id))
            .find(|r| r.member_id == member_id && r.value == value)
            .cloned();
        Ok(found)
    }

    #[instrument(skip(self, reaction), fields(reaction_id = %reaction.id))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut table = self.table.write();
        table.by_message.insert(reaction.message_id, reaction.id);
        table.by_workspace.insert(reaction.workspace_id, reaction.id);
        table.by_member.insert(reaction.member_id, reaction.id);
        table.rows.insert(reaction.id, reaction.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ReactionId) -> RepoResult<bool> {
        let mut table = self.table.write();
        let Some(reaction) = table.rows.remove(&id) else {
            return Ok(false);
        };
        table.by_message.remove(&reaction.message_id, &id);
        table.by_workspace.remove(&reaction.workspace_id, &id);
        table.by_member.remove(&reaction.member_id, &id);
        Ok(true)
    }
}
