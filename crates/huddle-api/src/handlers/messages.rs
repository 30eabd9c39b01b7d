//! Message handlers
//!
//! Messages live in a channel, a conversation, or a thread under a parent
//! message; the list endpoint takes exactly that context as query parameters.

use axum::{extract::State, Json};
use huddle_core::{MessageId, WorkspaceId};
use huddle_service::dto::{
    CreateMessageRequest, IdResponse, MessageListQuery, MessageResponse, PaginatedResponse,
    UpdateMessageRequest,
};
use huddle_service::MessageService;

use crate::extractors::{CurrentSession, IdPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Page through a channel, conversation or thread, newest first
///
/// GET /messages?channel_id=&conversation_id=&parent_message_id=&before=&limit=
pub async fn get_messages(
    State(state): State<AppState>,
    caller: CurrentSession,
    ValidatedQuery(query): ValidatedQuery<MessageListQuery>,
) -> ApiResult<Json<PaginatedResponse<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    Ok(Json(service.get(&caller.session, query).await?))
}

/// Post a message
///
/// POST /workspaces/{id}/messages
pub async fn create_message(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(workspace_id): IdPath<WorkspaceId>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<IdResponse<MessageId>>>> {
    let service = MessageService::new(state.service_context());
    let id = service.create(&caller.session, workspace_id, request).await?;
    Ok(Created(Json(IdResponse::new(id))))
}

/// GET /messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(message_id): IdPath<MessageId>,
) -> ApiResult<Json<Option<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    Ok(Json(service.get_by_id(&caller.session, message_id).await?))
}

/// Edit a message (author only)
///
/// PATCH /messages/{id}
pub async fn update_message(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(message_id): IdPath<MessageId>,
    ValidatedJson(request): ValidatedJson<UpdateMessageRequest>,
) -> ApiResult<Json<IdResponse<MessageId>>> {
    let service = MessageService::new(state.service_context());
    let id = service.update(&caller.session, message_id, request).await?;
    Ok(Json(IdResponse::new(id)))
}

/// Delete a message and its reactions (author only)
///
/// DELETE /messages/{id}
pub async fn remove_message(
    State(state): State<AppState>,
    caller: CurrentSession,
    IdPath(message_id): IdPath<MessageId>,
) -> ApiResult<Json<IdResponse<MessageId>>> {
    let service = MessageService::new(state.service_context());
    let id = service.remove(&caller.session, message_id).await?;
    Ok(Json(IdResponse::new(id)))
}
