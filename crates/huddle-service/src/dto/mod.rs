//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateChannelRequest, CreateConversationRequest, CreateMessageRequest, CreateWorkspaceRequest,
    JoinWorkspaceRequest, MessageListQuery, SyncProfileRequest, ToggleReactionRequest,
    UpdateChannelRequest, UpdateMemberRequest, UpdateMessageRequest, UpdateWorkspaceRequest,
};

pub use responses::{
    ChannelResponse, ConversationResponse, HealthResponse, IdResponse, MemberResponse,
    MessageResponse, PaginatedResponse, PaginationMeta, ReactionGroupResponse, ReadinessResponse,
    ThreadSummaryResponse, UserResponse, WorkspaceInfoResponse, WorkspaceResponse,
};

pub use mappers::{group_reactions, MemberWithUser, MessageWithDetails};
