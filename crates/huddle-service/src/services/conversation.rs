//! Conversation service
//!
//! Direct conversations pair two members of the same workspace. The pair is
//! unordered and opened at most once.

use huddle_core::{Conversation, ConversationId, DomainError, Session, WorkspaceId};
use tracing::{info, instrument};

use crate::dto::{ConversationResponse, CreateConversationRequest};
use crate::live::Collection;

use super::access::AccessControl;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The conversation between the caller and another member, created on
    /// first use
    #[instrument(skip(self, session, request))]
    pub async fn create_or_get(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
        request: CreateConversationRequest,
    ) -> ServiceResult<ConversationId> {
        let access = AccessControl::new(self.ctx);
        let user_id = access.require_user(session)?;
        if self.ctx.workspace_repo().find_by_id(workspace_id).await?.is_none() {
            return Err(DomainError::WorkspaceNotFound.into());
        }
        let caller = access.require_member(user_id, workspace_id).await?;

        let other = self
            .ctx
            .member_repo()
            .find_by_id(request.member_id)
            .await?
            .filter(|m| m.workspace_id == workspace_id)
            .ok_or(DomainError::MemberNotFound)?;

        if let Some(existing) = self
            .ctx
            .conversation_repo()
            .find_between(workspace_id, caller.id, other.id)
            .await?
        {
            return Ok(existing.id);
        }

        let conversation_id = ConversationId::from(self.ctx.generate_id());
        let conversation = Conversation::new(conversation_id, workspace_id, caller.id, other.id);
        self.ctx.conversation_repo().create(&conversation).await?;
        self.ctx.publish(Collection::Conversations, workspace_id);

        info!(conversation_id = %conversation_id, workspace_id = %workspace_id, "Conversation created successfully");
        Ok(conversation_id)
    }

    /// A conversation the caller takes part in
    #[instrument(skip(self, session))]
    pub async fn get_by_id(
        &self,
        session: &Session,
        conversation_id: ConversationId,
    ) -> ServiceResult<Option<ConversationResponse>> {
        if !session.is_authenticated() {
            return Ok(None);
        }
        let Some(conversation) = self
            .ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
        else {
            return Ok(None);
        };
        let viewer = AccessControl::new(self.ctx)
            .viewer(session, conversation.workspace_id)
            .await?;
        Ok(viewer
            .filter(|m| conversation.involves(m.id))
            .map(|_| ConversationResponse::from(&conversation)))
    }
}
