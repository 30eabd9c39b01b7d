//! Configuration module
//!
//! Loads application configuration from environment variables.

mod app_config;

pub use app_config::*;
