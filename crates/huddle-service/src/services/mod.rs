//! Business logic services
//!
//! Each service borrows a [`ServiceContext`] and takes the caller's
//! [`huddle_core::Session`] explicitly. Writes return the id of the affected
//! row; reads return `None` or an empty list when the caller may not see the
//! data.

pub mod access;
pub mod cascade;
pub mod channel;
pub mod context;
pub mod conversation;
pub mod error;
pub mod member;
pub mod message;
pub mod reaction;
pub mod user;
pub mod workspace;

pub use access::AccessControl;
pub use cascade::{CascadeDelete, CascadeReport};
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use conversation::ConversationService;
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use message::MessageService;
pub use reaction::ReactionService;
pub use user::UserService;
pub use workspace::WorkspaceService;
