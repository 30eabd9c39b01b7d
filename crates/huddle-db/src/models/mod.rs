//! Database models - row shapes with SQLx `FromRow` derives

mod channel;
mod conversation;
mod member;
mod message;
mod reaction;
mod user;
mod workspace;

pub use channel::ChannelModel;
pub use conversation::ConversationModel;
pub use member::MemberModel;
pub use message::{MessageModel, ThreadStatsModel};
pub use reaction::ReactionModel;
pub use user::UserModel;
pub use workspace::WorkspaceModel;
