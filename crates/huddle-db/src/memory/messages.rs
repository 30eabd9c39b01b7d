//! In-memory MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::instrument;

use huddle_core::entities::{Message, MessageTarget};
use huddle_core::error::DomainError;
use huddle_core::traits::{MessageQuery, MessageRepository, RepoResult};
use huddle_core::value_objects::{ChannelId, ConversationId, MemberId, MessageId, WorkspaceId};

use super::index::Index;

#[derive(Debug, Default)]
struct MessageTable {
    rows: HashMap<MessageId, Message>,
    by_workspace: Index<WorkspaceId, MessageId>,
    by_channel: Index<ChannelId, MessageId>,
    by_conversation: Index<ConversationId, MessageId>,
    by_author: Index<MemberId, MessageId>,
    by_parent: Index<MessageId, MessageId>,
}

impl MessageTable {
    fn collect(&self, ids: impl Iterator<Item = MessageId>) -> Vec<Message> {
        ids.filter_map(|id| self.rows.get(&id).cloned()).collect()
    }

    /// Narrowest index that covers the query
    fn candidates<'a>(
        &'a self,
        query: &MessageQuery,
    ) -> Box<dyn DoubleEndedIterator<Item = MessageId> + 'a> {
        if let Some(parent) = query.parent_message_id {
            Box::new(self.by_parent.get(&parent))
        } else if let Some(channel) = query.channel_id {
            Box::new(self.by_channel.get(&channel))
        } else if let Some(conversation) = query.conversation_id {
            Box::new(self.by_conversation.get(&conversation))
        } else {
            Box::new(std::iter::empty())
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryMessageRepository {
    table: RwLock<MessageTable>,
}

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Message>> {
        let table = self.table.read();
        Ok(table.collect(table.by_workspace.get(&workspace_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_channel(&self, channel_id: ChannelId) -> RepoResult<Vec<Message>> {
        let table = self.table.read();
        Ok(table.collect(table.by_channel.get(&channel_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> RepoResult<Vec<Message>> {
        let table = self.table.read();
        Ok(table.collect(table.by_conversation.get(&conversation_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, member_id: MemberId) -> RepoResult<Vec<Message>> {
        let table = self.table.read();
        Ok(table.collect(table.by_author.get(&member_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_parent(&self, parent_id: MessageId) -> RepoResult<Vec<Message>> {
        let table = self.table.read();
        Ok(table.collect(table.by_parent.get(&parent_id)))
    }

    #[instrument(skip(self))]
    async fn find_page(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        let table = self.table.read();
        Ok(table
            .candidates(query)
            .rev()
            .filter_map(|id| table.rows.get(&id))
            .filter(|m| query.matches(m))
            .take(query.limit)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn thread_stats(
        &self,
        parent_id: MessageId,
    ) -> RepoResult<(usize, Option<DateTime<Utc>>)> {
        let table = self.table.read();
        let last = table
            .by_parent
            .get(&parent_id)
            .filter_map(|id| table.rows.get(&id))
            .map(|m| m.created_at)
            .max();
        Ok((table.by_parent.count(&parent_id), last))
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let mut table = self.table.write();
        let id = message.id;
        table.by_workspace.insert(message.workspace_id, id);
        match message.target {
            MessageTarget::Channel(channel) => table.by_channel.insert(channel, id),
            MessageTarget::Conversation(conversation) => {
                table.by_conversation.insert(conversation, id);
            }
        }
        table.by_author.insert(message.author_member_id, id);
        if let Some(parent) = message.parent_message_id {
            table.by_parent.insert(parent, id);
        }
        table.rows.insert(id, message.clone());
        Ok(())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn update(&self, message: &Message) -> RepoResult<()> {
        let mut table = self.table.write();
        let existing = table
            .rows
            .get_mut(&message.id)
            .ok_or(DomainError::MessageNotFound)?;
        existing.body.clone_from(&message.body);
        existing.updated_at = message.updated_at;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MessageId) -> RepoResult<bool> {
        let mut table = self.table.write();
        let Some(message) = table.rows.remove(&id) else {
            return Ok(false);
        };
        table.by_workspace.remove(&message.workspace_id, &id);
        match message.target {
            MessageTarget::Channel(channel) => table.by_channel.remove(&channel, &id),
            MessageTarget::Conversation(conversation) => {
                table.by_conversation.remove(&conversation, &id);
            }
        }
        table.by_author.remove(&message.author_member_id, &id);
        if let Some(parent) = message.parent_message_id {
            table.by_parent.remove(&parent, &id);
        }
        Ok(true)
    }
}
