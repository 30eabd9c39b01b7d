//! Workspace handlers
//!
//! Endpoints for workspace lifecycle and joining.

use axum::{extract::State, Json};
use huddle_core::WorkspaceId;
use huddle_service::dto::{
    CreateWorkspaceRequest, IdResponse, JoinWorkspaceRequest, UpdateWorkspaceRequest,
    WorkspaceInfoResponse, WorkspaceResponse,
};
use huddle_service::WorkspaceService;

use crate::extractors::{CurrentSession, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a workspace owned by the caller
///
/// POST /workspaces
pub async fn create_workspace(
    State(state): State<AppState>,
    caller: CurrentSession,
    ValidatedJson(request): ValidatedJson<CreateWorkspaceRequest>,
) -> ApiResult<Created<Json<IdResponse<WorkspaceId>>>> {
    let service = WorkspaceService::new(state.service_context());
    let id = service.create(&caller.session, request).await?;
    Ok(Created(Json(IdResponse::new(id))))
}

/// List the caller's workspaces
///
/// GET /workspaces
pub async fn get_workspaces(
    State(state): State<AppState>,
    caller: CurrentSession,
) -> ApiResult<Json<Vec<WorkspaceResponse>>> {
    let service = WorkspaceService::new(state.service_context());
    Ok(Json(service.get(&caller.session).await?))
}

/// GET /workspaces/{id}
pub async fn get_workspace(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
) -> ApiResult<Json<Option<WorkspaceResponse>>> {
    let service = WorkspaceService::new(state.service_context());
    Ok(Json(service.get_by_id(&caller.session, workspace_id).await?))
}

/// Public name and membership flag, for join pages
///
/// GET /workspaces/{id}/info
pub async fn get_workspace_info(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
) -> ApiResult<Json<Option<WorkspaceInfoResponse>>> {
    let service = WorkspaceService::new(state.service_context());
    Ok(Json(
        service.get_info_by_id(&caller.session, workspace_id).await?,
    ))
}

/// PATCH /workspaces/{id}
pub async fn update_workspace(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
    ValidatedJson(request): ValidatedJson<UpdateWorkspaceRequest>,
) -> ApiResult<Json<IdResponse<WorkspaceId>>> {
    let service = WorkspaceService::new(state.service_context());
    let id = service.update(&caller.session, workspace_id, request).await?;
    Ok(Json(IdResponse::new(id)))
}

/// Remove a workspace and everything in it
///
/// DELETE /workspaces/{id}
pub async fn remove_workspace(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
) -> ApiResult<Json<IdResponse<WorkspaceId>>> {
    let service = WorkspaceService::new(state.service_context());
    let id = service.remove(&caller.session, workspace_id).await?;
    Ok(Json(IdResponse::new(id)))
}

/// POST /workspaces/{id}/join-code
pub async fn new_join_code(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
) -> ApiResult<Json<IdResponse<WorkspaceId>>> {
    let service = WorkspaceService::new(state.service_context());
    let id = service.new_join_code(&caller.session, workspace_id).await?;
    Ok(Json(IdResponse::new(id)))
}

/// POST /workspaces/{id}/join
pub async fn join_workspace(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
    ValidatedJson(request): ValidatedJson<JoinWorkspaceRequest>,
) -> ApiResult<Json<IdResponse<WorkspaceId>>> {
    let service = WorkspaceService::new(state.service_context());
    let id = service.join(&caller.session, workspace_id, request).await?;
    Ok(Json(IdResponse::new(id)))
}
