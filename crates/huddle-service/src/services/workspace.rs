//! Workspace service
//!
//! Creation, membership-scoped reads, admin management, join codes, and the
//! cascading removal of a whole workspace.

use huddle_core::{
    Channel, ChannelId, DomainError, Member, MemberId, MemberRole, Session, Workspace, WorkspaceId,
};
use tracing::{info, instrument};

use crate::dto::{
    CreateWorkspaceRequest, JoinWorkspaceRequest, UpdateWorkspaceRequest, WorkspaceInfoResponse,
    WorkspaceResponse,
};
use crate::live::Collection;

use super::access::AccessControl;
use super::cascade::CascadeDelete;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

/// Workspace service
pub struct WorkspaceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WorkspaceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn access(&self) -> AccessControl<'a> {
        AccessControl::new(self.ctx)
    }

    async fn find(&self, workspace_id: WorkspaceId) -> ServiceResult<Workspace> {
        self.ctx
            .workspace_repo()
            .find_by_id(workspace_id)
            .await?
            .ok_or_else(|| DomainError::WorkspaceNotFound.into())
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Create a workspace with the caller as admin and a "general" channel
    ///
    /// The three rows are inserted in order with no rollback. If the member
    /// or channel insert fails, the workspace row stays behind without them.
    #[instrument(skip(self, session, request))]
    pub async fn create(
        &self,
        session: &Session,
        request: CreateWorkspaceRequest,
    ) -> ServiceResult<WorkspaceId> {
        let user_id = self.access().require_user(session)?;
        UserService::new(self.ctx).ensure_exists(user_id).await?;

        let workspace_id = WorkspaceId::from(self.ctx.generate_id());
        let workspace = Workspace::new(workspace_id, request.name, user_id);
        self.ctx.workspace_repo().create(&workspace).await?;

        let member = Member::new(
            MemberId::from(self.ctx.generate_id()),
            user_id,
            workspace_id,
            MemberRole::Admin,
        );
        self.ctx.member_repo().create(&member).await?;

        let channel = Channel::new(
            ChannelId::from(self.ctx.generate_id()),
            workspace_id,
            Workspace::DEFAULT_CHANNEL,
        );
        self.ctx.channel_repo().create(&channel).await?;

        self.ctx.publish(Collection::Workspaces, workspace_id);
        self.ctx.publish(Collection::Members, workspace_id);
        self.ctx.publish(Collection::Channels, workspace_id);

        info!(workspace_id = %workspace_id, owner_id = %user_id, "Workspace created successfully");
        Ok(workspace_id)
    }

    /// Rename a workspace (admin)
    #[instrument(skip(self, session, request))]
    pub async fn update(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
        request: UpdateWorkspaceRequest,
    ) -> ServiceResult<WorkspaceId> {
        let user_id = self.access().require_user(session)?;
        let mut workspace = self.find(workspace_id).await?;
        self.access().require_admin(user_id, workspace_id).await?;

        workspace.rename(request.name);
        self.ctx.workspace_repo().update(&workspace).await?;
        self.ctx.publish(Collection::Workspaces, workspace_id);

        info!(workspace_id = %workspace_id, "Workspace updated successfully");
        Ok(workspace_id)
    }

    /// Remove a workspace and everything in it (admin)
    #[instrument(skip(self, session))]
    pub async fn remove(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<WorkspaceId> {
        let user_id = self.access().require_user(session)?;
        self.find(workspace_id).await?;
        self.access().require_admin(user_id, workspace_id).await?;

        CascadeDelete::new(self.ctx).workspace(workspace_id).await?;

        info!(workspace_id = %workspace_id, removed_by = %user_id, "Workspace removed successfully");
        Ok(workspace_id)
    }

    /// Replace the join code (admin); the old code stops working at once
    #[instrument(skip(self, session))]
    pub async fn new_join_code(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<WorkspaceId> {
        let user_id = self.access().require_user(session)?;
        let mut workspace = self.find(workspace_id).await?;
        self.access().require_admin(user_id, workspace_id).await?;

        workspace.regenerate_join_code();
        self.ctx.workspace_repo().update(&workspace).await?;
        self.ctx.publish(Collection::Workspaces, workspace_id);

        info!(workspace_id = %workspace_id, "Join code regenerated");
        Ok(workspace_id)
    }

    /// Join with a code; the caller becomes a plain member
    #[instrument(skip(self, session, request))]
    pub async fn join(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
        request: JoinWorkspaceRequest,
    ) -> ServiceResult<WorkspaceId> {
        let user_id = self.access().require_user(session)?;
        let workspace = self.find(workspace_id).await?;

        if !workspace.join_code.matches(&request.join_code) {
            return Err(DomainError::InvalidJoinCode.into());
        }
        if self
            .access()
            .find_membership(workspace_id, user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyMember.into());
        }

        UserService::new(self.ctx).ensure_exists(user_id).await?;
        let member = Member::new(
            MemberId::from(self.ctx.generate_id()),
            user_id,
            workspace_id,
            MemberRole::Member,
        );
        // The unique index still rejects a concurrent duplicate join
        self.ctx.member_repo().create(&member).await?;
        self.ctx.publish(Collection::Members, workspace_id);

        info!(workspace_id = %workspace_id, user_id = %user_id, "Member joined workspace");
        Ok(workspace_id)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Workspaces the caller is a member of
    #[instrument(skip(self, session))]
    pub async fn get(&self, session: &Session) -> ServiceResult<Vec<WorkspaceResponse>> {
        let Some(user_id) = session.user_id() else {
            return Ok(Vec::new());
        };
        let memberships = self.ctx.member_repo().find_by_user(user_id).await?;
        let ids: Vec<WorkspaceId> = memberships.iter().map(|m| m.workspace_id).collect();
        let workspaces = self.ctx.workspace_repo().find_by_ids(&ids).await?;
        Ok(workspaces.iter().map(WorkspaceResponse::from).collect())
    }

    /// The workspace, or `None` unless the caller is a member
    #[instrument(skip(self, session))]
    pub async fn get_by_id(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<Option<WorkspaceResponse>> {
        if self.access().viewer(session, workspace_id).await?.is_none() {
            return Ok(None);
        }
        let workspace = self.ctx.workspace_repo().find_by_id(workspace_id).await?;
        Ok(workspace.as_ref().map(WorkspaceResponse::from))
    }

    /// Name and membership flag shown on the join screen
    #[instrument(skip(self, session))]
    pub async fn get_info_by_id(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<Option<WorkspaceInfoResponse>> {
        if !session.is_authenticated() {
            return Ok(None);
        }
        let workspace = self.ctx.workspace_repo().find_by_id(workspace_id).await?;
        let is_member = self.access().viewer(session, workspace_id).await?.is_some();
        Ok(Some(WorkspaceInfoResponse {
            name: workspace.map(|w| w.name),
            is_member,
        }))
    }
}
