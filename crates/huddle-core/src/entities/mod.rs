//! Domain entities - core business objects

mod channel;
mod conversation;
mod member;
mod message;
mod reaction;
mod user;
mod workspace;

pub use channel::{normalize_channel_name, Channel};
pub use conversation::Conversation;
pub use member::{Member, MemberRole};
pub use message::{Message, MessageTarget};
pub use reaction::Reaction;
pub use user::User;
pub use workspace::Workspace;
