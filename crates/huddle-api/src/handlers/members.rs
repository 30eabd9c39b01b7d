//! Member handlers

use axum::{extract::State, Json};
use huddle_core::{MemberId, WorkspaceId};
use huddle_service::dto::{IdResponse, MemberResponse, UpdateMemberRequest};
use huddle_service::MemberService;

use crate::extractors::{CurrentSession, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /workspaces/{id}/members
pub async fn get_workspace_members(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.get(&caller.session, workspace_id).await?))
}

/// The caller's own membership
///
/// GET /workspaces/{id}/members/@me
pub async fn get_current_member(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
) -> ApiResult<Json<Option<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.current(&caller.session, workspace_id).await?))
}

/// GET /members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(member_id): IdPath<MemberId>,
) -> ApiResult<Json<Option<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    Ok(Json(service.get_by_id(&caller.session, member_id).await?))
}

/// Change a member's role
///
/// PATCH /members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(member_id): IdPath<MemberId>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<IdResponse<MemberId>>> {
    let service = MemberService::new(state.service_context());
    let id = service.update(&caller.session, member_id, request).await?;
    Ok(Json(IdResponse::new(id)))
}

/// Remove a member, or leave when the id is the caller's own
///
/// DELETE /members/{id}
pub async fn remove_member(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(member_id): IdPath<MemberId>,
) -> ApiResult<Json<IdResponse<MemberId>>> {
    let service = MemberService::new(state.service_context());
    let id = service.remove(&caller.session, member_id).await?;
    Ok(Json(IdResponse::new(id)))
}
