//! PostgreSQL repository implementations

mod channel;
mod conversation;
mod error;
mod health;
mod member;
mod message;
mod reaction;
mod user;
mod workspace;

pub use channel::PgChannelRepository;
pub use conversation::PgConversationRepository;
pub use health::PgHealth;
pub use member::PgMemberRepository;
pub use message::PgMessageRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
pub use workspace::PgWorkspaceRepository;
