//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use huddle_core::MemberRole;
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Body returned by every write: the id of the affected row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdResponse<T> {
    pub id: T,
}

impl<T> IdResponse<T> {
    pub fn new(id: T) -> Self {
        Self { id }
    }
}

/// Paginated response with cursor-based pagination
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, before: Option<String>, has_more: bool, limit: usize) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                before,
                has_more,
                limit,
            },
        }
    }

    /// The page shown to callers who may not read the context
    pub fn empty(limit: usize) -> Self {
        Self::new(Vec::new(), None, false, limit)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the next, older page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: usize,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Workspace Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub join_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a prospective member sees before joining
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceInfoResponse {
    pub name: Option<String>,
    pub is_member: bool,
}

// ============================================================================
// Channel Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub user_id: String,
    pub workspace_id: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    /// Present when the user record is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

// ============================================================================
// Conversation Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub workspace_id: String,
    pub member_one_id: String,
    pub member_two_id: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// One emoji on a message with everyone who placed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionGroupResponse {
    pub value: String,
    pub count: usize,
    pub member_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadSummaryResponse {
    pub count: usize,
    pub last_reply_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub workspace_id: String,
    pub body: String,
    pub image: Option<String>,
    pub channel_id: Option<String>,
    pub conversation_id: Option<String>,
    pub parent_message_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Author, with the user record when known
    pub member: MemberResponse,
    pub reactions: Vec<ReactionGroupResponse>,
    pub thread: ThreadSummaryResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub store: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        if store_healthy {
            Self {
                status: "ready",
                store: "up",
            }
        } else {
            Self {
                status: "degraded",
                store: "down",
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.store == "up"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::WorkspaceId;

    #[test]
    fn test_id_response_uses_string_ids() {
        let body = serde_json::to_value(IdResponse::new(WorkspaceId::new(42))).unwrap();
        assert_eq!(body, serde_json::json!({ "id": "42" }));
    }

    #[test]
    fn test_empty_page_omits_cursor() {
        let page: PaginatedResponse<MessageResponse> = PaginatedResponse::empty(20);
        let body = serde_json::to_value(&page).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "data": [], "pagination": { "has_more": false, "limit": 20 } })
        );
    }

    #[test]
    fn test_readiness_reflects_store() {
        assert!(ReadinessResponse::ready(true).is_ready());
        let down = ReadinessResponse::ready(false);
        assert!(!down.is_ready());
        assert_eq!(down.status, "degraded");
    }
}
