//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
///
/// Display strings are user facing and shown verbatim by clients.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Authorization Errors
    // =========================================================================
    /// No session, no membership, or insufficient role on a write path
    #[error("Unauthorized")]
    Unauthorized,

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Workspace not Found")]
    WorkspaceNotFound,

    #[error("Channel not Found")]
    ChannelNotFound,

    #[error("Member not Found")]
    MemberNotFound,

    #[error("Conversation not Found")]
    ConversationNotFound,

    #[error("Message not Found")]
    MessageNotFound,

    #[error("User not Found")]
    UserNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid Join Code")]
    InvalidJoinCode,

    #[error("Message must target exactly one channel or conversation")]
    InvalidMessageTarget,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already A Member of this Workspace")]
    AlreadyMember,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot remove the last admin")]
    LastAdmin,

    #[error("Cannot remove the workspace owner")]
    CannotRemoveOwner,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",

            Self::WorkspaceNotFound => "UNKNOWN_WORKSPACE",
            Self::ChannelNotFound => "UNKNOWN_CHANNEL",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::ConversationNotFound => "UNKNOWN_CONVERSATION",
            Self::MessageNotFound => "UNKNOWN_MESSAGE",
            Self::UserNotFound => "UNKNOWN_USER",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidJoinCode => "INVALID_JOIN_CODE",
            Self::InvalidMessageTarget => "INVALID_MESSAGE_TARGET",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            Self::AlreadyMember => "ALREADY_MEMBER",

            Self::LastAdmin => "LAST_ADMIN",
            Self::CannotRemoveOwner => "CANNOT_REMOVE_OWNER",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WorkspaceNotFound
                | Self::ChannelNotFound
                | Self::MemberNotFound
                | Self::ConversationNotFound
                | Self::MessageNotFound
                | Self::UserNotFound
        )
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is an invalid-input error (validation or business rule)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidJoinCode
                | Self::InvalidMessageTarget
                | Self::ContentTooLong { .. }
                | Self::LastAdmin
                | Self::CannotRemoveOwner
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyMember)
    }

    /// Check if this is an infrastructure error
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}
