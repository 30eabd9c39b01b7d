//! Repository traits (ports) - define the interface for data access
//!
//! Every child collection carries its ancestor `workspace_id`, so each one
//! can be listed by workspace without walking parent rows. `delete` is
//! idempotent on every repository: removing an absent row returns `false`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Channel, Conversation, Member, Message, Reaction, User, Workspace};
use crate::error::DomainError;
use crate::value_objects::{
    ChannelId, ConversationId, MemberId, MessageId, ReactionId, UserId, WorkspaceId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find several users at once; missing ids are skipped
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;

    /// Insert or replace the profile fields of a user
    async fn upsert(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Workspace Repository
// ============================================================================

#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    async fn find_by_id(&self, id: WorkspaceId) -> RepoResult<Option<Workspace>>;

    async fn find_by_ids(&self, ids: &[WorkspaceId]) -> RepoResult<Vec<Workspace>>;

    async fn create(&self, workspace: &Workspace) -> RepoResult<()>;

    /// Persist name and join code changes
    async fn update(&self, workspace: &Workspace) -> RepoResult<()>;

    async fn delete(&self, id: WorkspaceId) -> RepoResult<bool>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;

    /// Lookup through the unique `(workspace_id, user_id)` index
    async fn find_by_workspace_and_user(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> RepoResult<Option<Member>>;

    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Member>>;

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Member>>;

    /// Insert a member; fails with `AlreadyMember` if the pair exists
    async fn create(&self, member: &Member) -> RepoResult<()>;

    async fn update(&self, member: &Member) -> RepoResult<()>;

    async fn delete(&self, id: MemberId) -> RepoResult<bool>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    async fn find_by_id(&self, id: ChannelId) -> RepoResult<Option<Channel>>;

    /// Channels of a workspace in creation order
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Channel>>;

    async fn create(&self, channel: &Channel) -> RepoResult<()>;

    async fn update(&self, channel: &Channel) -> RepoResult<()>;

    async fn delete(&self, id: ChannelId) -> RepoResult<bool>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn find_by_id(&self, id: ConversationId) -> RepoResult<Option<Conversation>>;

    async fn find_by_workspace(&self, workspace_id: WorkspaceId)
        -> RepoResult<Vec<Conversation>>;

    /// Conversations where the member is either side
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Conversation>>;

    /// The conversation pairing `a` and `b` in either order
    async fn find_between(
        &self,
        workspace_id: WorkspaceId,
        a: MemberId,
        b: MemberId,
    ) -> RepoResult<Option<Conversation>>;

    async fn create(&self, conversation: &Conversation) -> RepoResult<()>;

    async fn delete(&self, id: ConversationId) -> RepoResult<bool>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Page request over one message context.
///
/// All three context fields are matched exactly, so `parent_message_id:
/// None` selects top-level messages only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageQuery {
    pub channel_id: Option<ChannelId>,
    pub conversation_id: Option<ConversationId>,
    pub parent_message_id: Option<MessageId>,
    /// Only return messages older than this one
    pub before: Option<MessageId>,
    pub limit: usize,
}

impl MessageQuery {
    pub const DEFAULT_LIMIT: usize = 20;
    pub const MAX_LIMIT: usize = 100;

    /// Whether `message` belongs to the queried context and page window
    pub fn matches(&self, message: &Message) -> bool {
        message.channel_id() == self.channel_id
            && message.conversation_id() == self.conversation_id
            && message.parent_message_id == self.parent_message_id
            && self.before.is_none_or(|before| message.id < before)
    }
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            channel_id: None,
            conversation_id: None,
            parent_message_id: None,
            before: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>>;

    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Message>>;

    async fn find_by_channel(&self, channel_id: ChannelId) -> RepoResult<Vec<Message>>;

    async fn find_by_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> RepoResult<Vec<Message>>;

    async fn find_by_author(&self, member_id: MemberId) -> RepoResult<Vec<Message>>;

    /// Direct replies to a message
    async fn find_by_parent(&self, parent_id: MessageId) -> RepoResult<Vec<Message>>;

    /// One page of a context, newest first, at most `query.limit` rows
    async fn find_page(&self, query: &MessageQuery) -> RepoResult<Vec<Message>>;

    /// Reply count and newest reply time of a thread
    async fn thread_stats(
        &self,
        parent_id: MessageId,
    ) -> RepoResult<(usize, Option<DateTime<Utc>>)>;

    async fn create(&self, message: &Message) -> RepoResult<()>;

    async fn update(&self, message: &Message) -> RepoResult<()>;

    async fn delete(&self, id: MessageId) -> RepoResult<bool>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    async fn find_by_id(&self, id: ReactionId) -> RepoResult<Option<Reaction>>;

    async fn find_by_message(&self, message_id: MessageId) -> RepoResult<Vec<Reaction>>;

    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Reaction>>;

    /// Reactions placed by the member
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Reaction>>;

    /// The member's reaction with this exact value on the message
    async fn find(
        &self,
        message_id: MessageId,
        member_id: MemberId,
        value: &str,
    ) -> RepoResult<Option<Reaction>>;

    async fn create(&self, reaction: &Reaction) -> RepoResult<()>;

    async fn delete(&self, id: ReactionId) -> RepoResult<bool>;
}

// ============================================================================
// Health
// ============================================================================

#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Succeeds when the backing store can serve requests
    async fn ping(&self) -> RepoResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MessageTarget;

    fn message(id: i64, target: MessageTarget, parent: Option<i64>) -> Message {
        Message::new(
            MessageId::new(id),
            WorkspaceId::new(1),
            MemberId::new(1),
            "hi".to_string(),
            target,
        )
        .in_reply_to(parent.map(MessageId::new))
    }

    #[test]
    fn test_query_matches_top_level_channel_messages_only() {
        let channel = ChannelId::new(5);
        let query = MessageQuery {
            channel_id: Some(channel),
            ..MessageQuery::default()
        };
        assert!(query.matches(&message(10, MessageTarget::Channel(channel), None)));
        assert!(!query.matches(&message(11, MessageTarget::Channel(channel), Some(10))));
        assert!(!query.matches(&message(
            12,
            MessageTarget::Conversation(ConversationId::new(5)),
            None
        )));
    }

    #[test]
    fn test_query_cursor_excludes_newer() {
        let channel = ChannelId::new(5);
        let query = MessageQuery {
            channel_id: Some(channel),
            before: Some(MessageId::new(20)),
            ..MessageQuery::default()
        };
        assert!(query.matches(&message(19, MessageTarget::Channel(channel), None)));
        assert!(!query.matches(&message(20, MessageTarget::Channel(channel), None)));
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(MessageQuery::default().limit, 20);
    }
}
