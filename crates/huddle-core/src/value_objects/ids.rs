//! Typed identifiers, one per collection
//!
//! Every id is a [`Snowflake`] underneath, but a `ChannelId` cannot be
//! passed where a `WorkspaceId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::snowflake::{Snowflake, SnowflakeParseError};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Snowflake);

        impl $name {
            #[inline]
            pub const fn new(raw: i64) -> Self {
                Self(Snowflake::new(raw))
            }

            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0.into_inner()
            }

            #[inline]
            pub const fn snowflake(self) -> Snowflake {
                self.0
            }
        }

        impl From<Snowflake> for $name {
            fn from(sf: Snowflake) -> Self {
                Self(sf)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = SnowflakeParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Snowflake::parse(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Identity issued by the external identity provider
    UserId
);
define_id!(WorkspaceId);
define_id!(
    /// A user's membership row within one workspace
    MemberId
);
define_id!(ChannelId);
define_id!(
    /// Direct-message pairing between two members
    ConversationId
);
define_id!(MessageId);
define_id!(ReactionId);
