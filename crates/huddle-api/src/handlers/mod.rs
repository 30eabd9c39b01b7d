//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod channels;
pub mod conversations;
pub mod health;
pub mod members;
pub mod messages;
pub mod reactions;
pub mod users;
pub mod workspaces;
