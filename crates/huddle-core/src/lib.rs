//! # huddle-core
//!
//! Domain layer for the team chat backend: entities, typed identifiers,
//! the session value, the authorization decision, and the repository traits
//! that the storage backends implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod access;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use access::{authorize, Requirement};
pub use entities::{
    normalize_channel_name, Channel, Conversation, Member, MemberRole, Message, MessageTarget,
    Reaction, User, Workspace,
};
pub use error::DomainError;
pub use traits::{
    ChannelRepository, ConversationRepository, MemberRepository, MessageQuery, MessageRepository,
    ReactionRepository, RepoResult, StoreHealth, UserRepository, WorkspaceRepository,
};
pub use value_objects::{
    ChannelId, ConversationId, JoinCode, MemberId, MessageId, ReactionId, Session, Snowflake,
    SnowflakeGenerator, SnowflakeParseError, UserId, WorkspaceId,
};
