//! Value objects - immutable types that describe domain values

mod ids;
mod join_code;
mod session;
mod snowflake;

pub use ids::{ChannelId, ConversationId, MemberId, MessageId, ReactionId, UserId, WorkspaceId};
pub use join_code::JoinCode;
pub use session::Session;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
