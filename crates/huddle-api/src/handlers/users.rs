//! User handlers

use axum::{extract::State, Json};
use huddle_core::UserId;
use huddle_service::dto::{IdResponse, SyncProfileRequest, UserResponse};
use huddle_service::UserService;
use validator::Validate;

use crate::extractors::{CurrentSession, OptionalValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's user record, or `null` when anonymous
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    caller: CurrentSession,
) -> ApiResult<Json<Option<UserResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.current(&caller.session).await?))
}

/// Upsert the caller's profile
///
/// PUT /users/@me
///
/// Fields missing from the body fall back to the token's profile claims.
pub async fn sync_current_user(
    State(state): State<AppState>,
    caller: CurrentSession,
    OptionalValidatedJson(body): OptionalValidatedJson<SyncProfileRequest>,
) -> ApiResult<Json<IdResponse<UserId>>> {
    let body = body.unwrap_or_default();
    let claims = caller.profile.unwrap_or_default();
    let request = SyncProfileRequest {
        name: body.name.or(claims.name),
        email: body.email.or(claims.email),
        image: body.image.or(claims.image),
    };
    request.validate()?;

    let service = UserService::new(state.service_context());
    let id = service.sync_profile(&caller.session, request).await?;
    Ok(Json(IdResponse::new(id)))
}
