//! Direct conversation handlers

use axum::{extract::State, Json};
use huddle_core::{ConversationId, WorkspaceId};
use huddle_service::dto::{ConversationResponse, CreateConversationRequest, IdResponse};
use huddle_service::ConversationService;

use crate::extractors::{CurrentSession, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Open the conversation between the caller and another member
///
/// POST /workspaces/{id}/conversations
pub async fn create_or_get_conversation(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
    ValidatedJson(request): ValidatedJson<CreateConversationRequest>,
) -> ApiResult<Json<IdResponse<ConversationId>>> {
    let service = ConversationService::new(state.service_context());
    let id = service
        .create_or_get(&caller.session, workspace_id, request)
        .await?;
    Ok(Json(IdResponse::new(id)))
}

/// GET /conversations/{id}
pub async fn get_conversation(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(conversation_id): IdPath<ConversationId>,
) -> ApiResult<Json<Option<ConversationResponse>>> {
    let service = ConversationService::new(state.service_context());
    Ok(Json(
        service.get_by_id(&caller.session, conversation_id).await?,
    ))
}
