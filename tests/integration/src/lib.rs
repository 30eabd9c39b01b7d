//! Integration test utilities for huddle
//!
//! Spawns the REST API on an ephemeral port with the in-memory store and
//! mints identity tokens for test users.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
