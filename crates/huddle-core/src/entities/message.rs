//! Message entity - posted to a channel or a conversation, optionally as a thread reply

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ChannelId, ConversationId, MemberId, MessageId, WorkspaceId};

/// Where a message lives; exactly one context per message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum MessageTarget {
    Channel(ChannelId),
    Conversation(ConversationId),
}

impl MessageTarget {
    pub fn channel_id(self) -> Option<ChannelId> {
        match self {
            Self::Channel(id) => Some(id),
            Self::Conversation(_) => None,
        }
    }

    pub fn conversation_id(self) -> Option<ConversationId> {
        match self {
            Self::Conversation(id) => Some(id),
            Self::Channel(_) => None,
        }
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub workspace_id: WorkspaceId,
    pub author_member_id: MemberId,
    pub body: String,
    pub image: Option<String>,
    pub target: MessageTarget,
    pub parent_message_id: Option<MessageId>,
    pub created_at: DateTime<Utc>,
    /// Set once the author edits the body
    pub updated_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Maximum body length accepted on create and update
    pub const MAX_BODY_LENGTH: usize = 4000;

    pub fn new(
        id: MessageId,
        workspace_id: WorkspaceId,
        author_member_id: MemberId,
        body: String,
        target: MessageTarget,
    ) -> Self {
        Self {
            id,
            workspace_id,
            author_member_id,
            body,
            image: None,
            target,
            parent_message_id: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    #[must_use]
    pub fn in_reply_to(mut self, parent: Option<MessageId>) -> Self {
        self.parent_message_id = parent;
        self
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_message_id.is_some()
    }

    #[inline]
    pub fn channel_id(&self) -> Option<ChannelId> {
        self.target.channel_id()
    }

    #[inline]
    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.target.conversation_id()
    }

    pub fn edit(&mut self, body: String) {
        self.body = body;
        self.updated_at = Some(Utc::now());
    }
}
