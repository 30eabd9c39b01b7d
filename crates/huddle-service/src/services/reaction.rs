//! Reaction service

use huddle_core::{DomainError, MessageId, Reaction, ReactionId, Session};
use tracing::{info, instrument};

use crate::dto::ToggleReactionRequest;
use crate::live::Collection;

use super::access::AccessControl;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add the caller's reaction, or take it back if it is already there.
    /// Returns the id of the inserted or removed reaction.
    #[instrument(skip(self, session, request))]
    pub async fn toggle(
        &self,
        session: &Session,
        message_id: MessageId,
        request: ToggleReactionRequest,
    ) -> ServiceResult<ReactionId> {
        let access = AccessControl::new(self.ctx);
        let user_id = access.require_user(session)?;
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound)?;
        let member = access.require_member(user_id, message.workspace_id).await?;
        if !access.can_use_target(&member, message.target).await? {
            return Err(ServiceError::unauthorized());
        }

        if let Some(existing) = self
            .ctx
            .reaction_repo()
            .find(message_id, member.id, &request.value)
            .await?
        {
            self.ctx.reaction_repo().delete(existing.id).await?;
            self.ctx.publish(Collection::Reactions, message.workspace_id);
            info!(reaction_id = %existing.id, message_id = %message_id, "Reaction removed");
            return Ok(existing.id);
        }

        let reaction_id = ReactionId::from(self.ctx.generate_id());
        let reaction = Reaction::new(
            reaction_id,
            message.workspace_id,
            message_id,
            member.id,
            request.value,
        );
        self.ctx.reaction_repo().create(&reaction).await?;
        self.ctx.publish(Collection::Reactions, message.workspace_id);

        info!(reaction_id = %reaction_id, message_id = %message_id, "Reaction added");
        Ok(reaction_id)
    }
}
