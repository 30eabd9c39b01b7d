//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    channels, conversations, health, members, messages, reactions, users, workspaces,
};
use crate::state::AppState;

/// Create the main API router (health is mounted separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(workspace_routes())
        .merge(channel_routes())
        .merge(member_routes())
        .merge(conversation_routes())
        .merge(message_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/@me",
        get(users::get_current_user).put(users::sync_current_user),
    )
}

fn workspace_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/workspaces",
            get(workspaces::get_workspaces).post(workspaces::create_workspace),
        )
        .route(
            "/workspaces/:id",
            get(workspaces::get_workspace)
                .patch(workspaces::update_workspace)
                .delete(workspaces::remove_workspace),
        )
        .route("/workspaces/:id/info", get(workspaces::get_workspace_info))
        .route("/workspaces/:id/join-code", post(workspaces::new_join_code))
        .route("/workspaces/:id/join", post(workspaces::join_workspace))
        .route(
            "/workspaces/:id/channels",
            get(channels::get_workspace_channels).post(channels::create_channel),
        )
        .route(
            "/workspaces/:id/members",
            get(members::get_workspace_members),
        )
        .route(
            "/workspaces/:id/members/@me",
            get(members::get_current_member),
        )
        .route(
            "/workspaces/:id/conversations",
            post(conversations::create_or_get_conversation),
        )
        .route("/workspaces/:id/messages", post(messages::create_message))
}

fn channel_routes() -> Router<AppState> {
    Router::new().route(
        "/channels/:id",
        get(channels::get_channel)
            .patch(channels::update_channel)
            .delete(channels::remove_channel),
    )
}

fn member_routes() -> Router<AppState> {
    Router::new().route(
        "/members/:id",
        get(members::get_member)
            .patch(members::update_member)
            .delete(members::remove_member),
    )
}

fn conversation_routes() -> Router<AppState> {
    Router::new().route("/conversations/:id", get(conversations::get_conversation))
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::get_messages))
        .route(
            "/messages/:id",
            get(messages::get_message)
                .patch(messages::update_message)
                .delete(messages::remove_message),
        )
        .route("/messages/:id/reactions", post(reactions::toggle_reaction))
}
