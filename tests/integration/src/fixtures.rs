//! Request bodies and response shapes used by the API tests

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// `{"id": "..."}` returned by every write
#[derive(Debug, Deserialize)]
pub struct IdBody {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceBody {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub join_code: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct WorkspaceInfoBody {
    pub name: Option<String>,
    pub is_member: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChannelBody {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MemberBody {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub user: Option<UserBody>,
}

#[derive(Debug, Deserialize)]
pub struct ReactionGroupBody {
    pub value: String,
    pub count: usize,
    pub member_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadBody {
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub id: String,
    pub body: String,
    pub channel_id: Option<String>,
    pub conversation_id: Option<String>,
    pub parent_message_id: Option<String>,
    pub updated_at: Option<String>,
    pub member: MemberBody,
    pub reactions: Vec<ReactionGroupBody>,
    pub thread: ThreadBody,
}

#[derive(Debug, Deserialize)]
pub struct PaginationBody {
    pub before: Option<String>,
    pub has_more: bool,
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct PageBody<T> {
    pub data: Vec<T>,
    pub pagination: PaginationBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetailBody {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

/// `{"error": {"code", "message", "details"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetailBody,
}

#[derive(Debug, Serialize)]
pub struct NameRequest<'a> {
    pub name: &'a str,
}

pub fn name(name: &str) -> NameRequest<'_> {
    NameRequest { name }
}

pub fn join_code(code: &str) -> Value {
    json!({ "join_code": code })
}

pub fn channel_message(channel_id: &str, body: &str) -> Value {
    json!({ "body": body, "channel_id": channel_id })
}

pub fn reaction(value: &str) -> Value {
    json!({ "value": value })
}
