//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use huddle_core::{ChannelId, ConversationId, MemberId, MemberRole, MessageId};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// User Requests
// ============================================================================

/// Profile fields copied from the identity provider
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SyncProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,
}

// ============================================================================
// Workspace Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkspaceRequest {
    #[validate(length(min = 1, max = 80, message = "Workspace name must be 1-80 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateWorkspaceRequest {
    #[validate(length(min = 1, max = 80, message = "Workspace name must be 1-80 characters"))]
    pub name: String,
}

/// Join request; the code is compared case-insensitively
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinWorkspaceRequest {
    #[validate(length(max = 64, message = "Join code is too long"))]
    pub join_code: String,
}

// ============================================================================
// Channel Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 80, message = "Channel name must be 1-80 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[validate(length(min = 1, max = 80, message = "Channel name must be 1-80 characters"))]
    pub name: String,
}

// ============================================================================
// Member Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    pub role: MemberRole,
}

// ============================================================================
// Conversation Requests
// ============================================================================

/// Open the direct conversation with another member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConversationRequest {
    pub member_id: MemberId,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Post a message to a channel, a conversation, or a thread
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message body must be 1-4000 characters"))]
    pub body: String,

    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,

    pub channel_id: Option<ChannelId>,

    pub conversation_id: Option<ConversationId>,

    pub parent_message_id: Option<MessageId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message body must be 1-4000 characters"))]
    pub body: String,
}

/// Query parameters for listing messages
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MessageListQuery {
    pub channel_id: Option<ChannelId>,

    pub conversation_id: Option<ConversationId>,

    pub parent_message_id: Option<MessageId>,

    /// Only return messages older than this id
    pub before: Option<MessageId>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<usize>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleReactionRequest {
    #[validate(length(min = 1, max = 32, message = "Reaction must be 1-32 characters"))]
    pub value: String,
}
