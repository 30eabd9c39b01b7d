//! # huddle-api
//!
//! REST API server for huddle using Axum.
//!
//! Every route resolves the caller's bearer token into a [`huddle_core::Session`]
//! and hands it to the service layer, which makes every authorization decision.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, serve};
pub use state::AppState;
