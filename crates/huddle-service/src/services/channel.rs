//! Channel service
//!
//! Channels are created, renamed, and removed by admins; any member can list
//! them. Names are normalized on create and on rename.

use huddle_core::{normalize_channel_name, Channel, ChannelId, DomainError, Session, WorkspaceId};
use tracing::{info, instrument};

use crate::dto::{ChannelResponse, CreateChannelRequest, UpdateChannelRequest};
use crate::live::Collection;

use super::access::AccessControl;
use super::cascade::CascadeDelete;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn access(&self) -> AccessControl<'a> {
        AccessControl::new(self.ctx)
    }

    async fn find(&self, channel_id: ChannelId) -> ServiceResult<Channel> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| DomainError::ChannelNotFound.into())
    }

    fn normalized(name: &str) -> ServiceResult<String> {
        let name = normalize_channel_name(name);
        if name.is_empty() {
            return Err(ServiceError::validation("Channel name cannot be blank"));
        }
        Ok(name)
    }

    /// Create a channel (admin)
    #[instrument(skip(self, session, request))]
    pub async fn create(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelId> {
        let user_id = self.access().require_user(session)?;
        if self.ctx.workspace_repo().find_by_id(workspace_id).await?.is_none() {
            return Err(DomainError::WorkspaceNotFound.into());
        }
        self.access().require_admin(user_id, workspace_id).await?;

        let name = Self::normalized(&request.name)?;
        let channel_id = ChannelId::from(self.ctx.generate_id());
        let channel = Channel::new(channel_id, workspace_id, &name);
        self.ctx.channel_repo().create(&channel).await?;
        self.ctx.publish(Collection::Channels, workspace_id);

        info!(channel_id = %channel_id, workspace_id = %workspace_id, name = %channel.name, "Channel created successfully");
        Ok(channel_id)
    }

    /// Channels of a workspace; empty unless the caller is a member
    #[instrument(skip(self, session))]
    pub async fn get(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<Vec<ChannelResponse>> {
        if self.access().viewer(session, workspace_id).await?.is_none() {
            return Ok(Vec::new());
        }
        let channels = self.ctx.channel_repo().find_by_workspace(workspace_id).await?;
        Ok(channels.iter().map(ChannelResponse::from).collect())
    }

    /// A channel, or `None` unless the caller is a member of its workspace
    #[instrument(skip(self, session))]
    pub async fn get_by_id(
        &self,
        session: &Session,
        channel_id: ChannelId,
    ) -> ServiceResult<Option<ChannelResponse>> {
        if !session.is_authenticated() {
            return Ok(None);
        }
        let Some(channel) = self.ctx.channel_repo().find_by_id(channel_id).await? else {
            return Ok(None);
        };
        if self
            .access()
            .viewer(session, channel.workspace_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        Ok(Some(ChannelResponse::from(&channel)))
    }

    /// Rename a channel (admin)
    #[instrument(skip(self, session, request))]
    pub async fn update(
        &self,
        session: &Session,
        channel_id: ChannelId,
        request: UpdateChannelRequest,
    ) -> ServiceResult<ChannelId> {
        let user_id = self.access().require_user(session)?;
        let mut channel = self.find(channel_id).await?;
        self.access()
            .require_admin(user_id, channel.workspace_id)
            .await?;

        let name = Self::normalized(&request.name)?;
        channel.rename(&name);
        self.ctx.channel_repo().update(&channel).await?;
        self.ctx.publish(Collection::Channels, channel.workspace_id);

        info!(channel_id = %channel_id, name = %channel.name, "Channel updated successfully");
        Ok(channel_id)
    }

    /// Remove a channel with its messages and their reactions (admin)
    #[instrument(skip(self, session))]
    pub async fn remove(&self, session: &Session, channel_id: ChannelId) -> ServiceResult<ChannelId> {
        let user_id = self.access().require_user(session)?;
        let channel = self.find(channel_id).await?;
        self.access()
            .require_admin(user_id, channel.workspace_id)
            .await?;

        CascadeDelete::new(self.ctx)
            .channel(channel.workspace_id, channel_id)
            .await?;

        info!(channel_id = %channel_id, "Channel removed successfully");
        Ok(channel_id)
    }
}
