//! Entity <-> model mappers
//!
//! Rows that can hold values the domain rejects (an unknown role, a
//! message with no context) convert through `TryFrom`.

mod channel;
mod member;
mod message;
mod user;
mod workspace;
