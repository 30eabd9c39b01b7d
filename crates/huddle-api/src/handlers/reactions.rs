//! Reaction handlers

use axum::{extract::State, Json};
use huddle_core::{MessageId, ReactionId};
use huddle_service::dto::{IdResponse, ToggleReactionRequest};
use huddle_service::ReactionService;

use crate::extractors::{CurrentSession, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Add the caller's reaction, or take it back if already present
///
/// POST /messages/{id}/reactions
pub async fn toggle_reaction(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(message_id): IdPath<MessageId>,
    ValidatedJson(request): ValidatedJson<ToggleReactionRequest>,
) -> ApiResult<Json<IdResponse<ReactionId>>> {
    let service = ReactionService::new(state.service_context());
    let id = service.toggle(&caller.session, message_id, request).await?;
    Ok(Json(IdResponse::new(id)))
}
