//! Axum extractors for request handling
//!
//! Custom extractors for the caller's session, validation, and path ids.

mod path;
mod session;
mod validated;

pub use path::IdPath;
pub use session::CurrentSession;
pub use validated::{OptionalValidatedJson, ValidatedJson, ValidatedQuery};
