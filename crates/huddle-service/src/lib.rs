//! # huddle-service
//!
//! Application layer containing the access-control checks, the cascading
//! delete orchestrator, one service per entity, DTOs, and live queries.

pub mod dto;
pub mod live;
pub mod services;

pub use live::{ChangeEvent, ChangeFeed, Collection, LiveQuery};
pub use services::{
    AccessControl, CascadeDelete, CascadeReport, ChannelService, ConversationService,
    MemberService, MessageService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService, WorkspaceService,
};
