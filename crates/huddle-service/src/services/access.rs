//! Access control
//!
//! Every operation resolves authorization in the same order: session
//! identity, target existence (done by the calling service), membership
//! through the `(workspace_id, user_id)` index, then role. Write paths use
//! the `require_*` methods and fail with `Unauthorized`; read paths use
//! [`AccessControl::viewer`], which answers `None` instead of failing.

use huddle_core::{authorize, Member, MessageTarget, Requirement, Session, UserId, WorkspaceId};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Access-control checks bound to one service context
pub struct AccessControl<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessControl<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's identity, or `Unauthorized` for an anonymous session
    pub fn require_user(&self, session: &Session) -> ServiceResult<UserId> {
        session.user_id().ok_or_else(|| {
            debug!("Rejected anonymous write");
            ServiceError::unauthorized()
        })
    }

    /// The unique membership of `user_id` in the workspace, if any
    pub async fn find_membership(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> ServiceResult<Option<Member>> {
        Ok(self
            .ctx
            .member_repo()
            .find_by_workspace_and_user(workspace_id, user_id)
            .await?)
    }

    /// Membership with at least the given role, or `Unauthorized`
    #[instrument(skip(self))]
    pub async fn require(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
        requirement: Requirement,
    ) -> ServiceResult<Member> {
        let membership = self.find_membership(workspace_id, user_id).await?;
        match authorize(membership.as_ref(), requirement) {
            Ok(member) => {
                debug!(member_id = %member.id, role = %member.role, "Access granted");
                Ok(member.clone())
            }
            Err(e) => {
                debug!(reason = %e, "Access denied");
                Err(e.into())
            }
        }
    }

    pub async fn require_member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<Member> {
        self.require(user_id, workspace_id, Requirement::Member).await
    }

    pub async fn require_admin(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<Member> {
        self.require(user_id, workspace_id, Requirement::Admin).await
    }

    /// The caller's membership for a read path
    ///
    /// `None` for anonymous sessions and non-members. Store failures still
    /// propagate.
    pub async fn viewer(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<Option<Member>> {
        let Some(user_id) = session.user_id() else {
            return Ok(None);
        };
        let membership = self.find_membership(workspace_id, user_id).await?;
        if membership.is_none() {
            debug!(workspace_id = %workspace_id, user_id = %user_id, "Read hidden from non-member");
        }
        Ok(membership)
    }

    /// Whether `member` may see, post in, and react in `target`.
    /// Channels are open to the whole workspace; conversations only to
    /// their two participants.
    pub async fn can_use_target(
        &self,
        member: &Member,
        target: MessageTarget,
    ) -> ServiceResult<bool> {
        let allowed = match target {
            MessageTarget::Channel(channel_id) => {
                let channel = self.ctx.channel_repo().find_by_id(channel_id).await?;
                channel.is_some_and(|c| c.workspace_id == member.workspace_id)
            }
            MessageTarget::Conversation(conversation_id) => {
                let conversation = self
                    .ctx
                    .conversation_repo()
                    .find_by_id(conversation_id)
                    .await?;
                conversation.is_some_and(|c| {
                    c.workspace_id == member.workspace_id && c.involves(member.id)
                })
            }
        };
        if !allowed {
            debug!(member_id = %member.id, "Target hidden from member");
        }
        Ok(allowed)
    }
}
