//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use huddle_core::{Channel, Conversation, Member, Message, Reaction, User, Workspace};

use super::responses::{
    ChannelResponse, ConversationResponse, MemberResponse, MessageResponse, ReactionGroupResponse,
    ThreadSummaryResponse, UserResponse, WorkspaceResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Workspace Mappers
// ============================================================================

impl From<&Workspace> for WorkspaceResponse {
    fn from(workspace: &Workspace) -> Self {
        Self {
            id: workspace.id.to_string(),
            name: workspace.name.clone(),
            owner_id: workspace.owner_id.to_string(),
            join_code: workspace.join_code.as_str().to_string(),
            created_at: workspace.created_at,
            updated_at: workspace.updated_at,
        }
    }
}

// ============================================================================
// Channel Mappers
// ============================================================================

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.to_string(),
            workspace_id: channel.workspace_id.to_string(),
            name: channel.name.clone(),
            created_at: channel.created_at,
            updated_at: channel.updated_at,
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

/// Member joined with its user record
#[derive(Debug, Clone)]
pub struct MemberWithUser {
    pub member: Member,
    pub user: Option<User>,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            user_id: member.user_id.to_string(),
            workspace_id: member.workspace_id.to_string(),
            role: member.role,
            joined_at: member.joined_at,
            user: None,
        }
    }
}

impl From<&MemberWithUser> for MemberResponse {
    fn from(data: &MemberWithUser) -> Self {
        Self {
            user: data.user.as_ref().map(UserResponse::from),
            ..Self::from(&data.member)
        }
    }
}

// ============================================================================
// Conversation Mappers
// ============================================================================

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.to_string(),
            workspace_id: conversation.workspace_id.to_string(),
            member_one_id: conversation.member_one_id.to_string(),
            member_two_id: conversation.member_two_id.to_string(),
            created_at: conversation.created_at,
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

/// Message with everything a client renders next to it
#[derive(Debug, Clone)]
pub struct MessageWithDetails {
    pub message: Message,
    pub author: MemberWithUser,
    pub reactions: Vec<Reaction>,
    pub thread_count: usize,
    pub last_reply_at: Option<DateTime<Utc>>,
}

/// Group reactions by value, keeping first-seen order of values
pub fn group_reactions(reactions: &[Reaction]) -> Vec<ReactionGroupResponse> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for reaction in reactions {
        let members = groups.entry(reaction.value.as_str()).or_insert_with(|| {
            order.push(reaction.value.as_str());
            Vec::new()
        });
        let member_id = reaction.member_id.to_string();
        if !members.contains(&member_id) {
            members.push(member_id);
        }
    }

    order
        .into_iter()
        .filter_map(|value| {
            groups.remove(value).map(|member_ids| ReactionGroupResponse {
                value: value.to_string(),
                count: member_ids.len(),
                member_ids,
            })
        })
        .collect()
}

impl From<&MessageWithDetails> for MessageResponse {
    fn from(data: &MessageWithDetails) -> Self {
        let message = &data.message;
        Self {
            id: message.id.to_string(),
            workspace_id: message.workspace_id.to_string(),
            body: message.body.clone(),
            image: message.image.clone(),
            channel_id: message.channel_id().map(|id| id.to_string()),
            conversation_id: message.conversation_id().map(|id| id.to_string()),
            parent_message_id: message.parent_message_id.map(|id| id.to_string()),
            created_at: message.created_at,
            updated_at: message.updated_at,
            member: MemberResponse::from(&data.author),
            reactions: group_reactions(&data.reactions),
            thread: ThreadSummaryResponse {
                count: data.thread_count,
                last_reply_at: data.last_reply_at,
            },
        }
    }
}
