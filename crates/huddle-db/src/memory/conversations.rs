//! In-memory ConversationRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::instrument;

use huddle_core::entities::Conversation;
use huddle_core::traits::{ConversationRepository, RepoResult};
use huddle_core::value_objects::{ConversationId, MemberId, WorkspaceId};

use super::index::Index;

#[derive(Debug, Default)]
struct ConversationTable {
    rows: HashMap<ConversationId, Conversation>,
    by_workspace: Index<WorkspaceId, ConversationId>,
    /// Both sides of every pairing
    by_member: Index<MemberId, ConversationId>,
}

impl ConversationTable {
    fn collect(&self, ids: impl Iterator<Item = ConversationId>) -> Vec<Conversation> {
        ids.filter_map(|id| self.rows.get(&id).cloned()).collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryConversationRepository {
    table: RwLock<ConversationTable>,
}

#[async_trait]
impl ConversationRepository for MemoryConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ConversationId) -> RepoResult<Option<Conversation>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> RepoResult<Vec<Conversation>> {
        let table = self.table.read();
        Ok(table.collect(table.by_workspace.get(&workspace_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Conversation>> {
        let table = self.table.read();
        Ok(table.collect(table.by_member.get(&member_id)))
    }

    #[instrument(skip(self))]
    async fn find_between(
        &self,
        workspace_id: WorkspaceId,
        a: MemberId,
        b: MemberId,
    ) -> RepoResult<Option<Conversation>> {
        let table = self.table.read();
        let found = table
            .by_member
            .get(&a)
            .filter_map(|id| table.rows.get(&id))
            .find(|c| c.workspace_id == workspace_id && c.pairs(a, b))
            .cloned();
        Ok(found)
    }

    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn create(&self, conversation: &Conversation) -> RepoResult<()> {
        let mut table = self.table.write();
        table
            .by_workspace
            .insert(conversation.workspace_id, conversation.id);
        table
            .by_member
            .insert(conversation.member_one_id, conversation.id);
        table
            .by_member
            .insert(conversation.member_two_id, conversation.id);
        table.rows.insert(conversation.id, conversation.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ConversationId) -> RepoResult<bool> {
        let mut table = self.table.write();
        let Some(conversation) = table.rows.remove(&id) else {
            return Ok(false);
        };
        table.by_workspace.remove(&conversation.workspace_id, &id);
        table.by_member.remove(&conversation.member_one_id, &id);
        table.by_member.remove(&conversation.member_two_id, &id);
        Ok(true)
    }
}
