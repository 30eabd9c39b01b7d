//! Channel handlers
//!
//! Endpoints for channel management.

use axum::{extract::State, Json};
use huddle_core::{ChannelId, WorkspaceId};
use huddle_service::dto::{
    ChannelResponse, CreateChannelRequest, IdResponse, UpdateChannelRequest,
};
use huddle_service::ChannelService;

use crate::extractors::{CurrentSession, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Get workspace channels
///
/// GET /workspaces/{id}/channels
pub async fn get_workspace_channels(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    Ok(Json(service.get(&caller.session, workspace_id).await?))
}

/// Create channel in workspace
///
/// POST /workspaces/{id}/channels
pub async fn create_channel(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<IdResponse<ChannelId>>>> {
    let service = ChannelService::new(state.service_context());
    let id = service.create(&caller.session, workspace_id, request).await?;
    Ok(Created(Json(IdResponse::new(id))))
}

/// Get channel by ID
///
/// GET /channels/{id}
pub async fn get_channel(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(channel_id): IdPath<ChannelId>,
) -> ApiResult<Json<Option<ChannelResponse>>> {
    let service = ChannelService::new(state.service_context());
    Ok(Json(service.get_by_id(&caller.session, channel_id).await?))
}

/// Update channel
///
/// PATCH /channels/{id}
pub async fn update_channel(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(channel_id): IdPath<ChannelId>,
    ValidatedJson(request): ValidatedJson<UpdateChannelRequest>,
) -> ApiResult<Json<IdResponse<ChannelId>>> {
    let service = ChannelService::new(state.service_context());
    let id = service.update(&caller.session, channel_id, request).await?;
    Ok(Json(IdResponse::new(id)))
}

/// Remove channel with its messages
///
/// DELETE /channels/{id}
pub async fn remove_channel(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(channel_id): IdPath<ChannelId>,
) -> ApiResult<Json<IdResponse<ChannelId>>> {
    let service = ChannelService::new(state.service_context());
    let id = service.remove(&caller.session, channel_id).await?;
    Ok(Json(IdResponse::new(id)))
}
