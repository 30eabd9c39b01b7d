//! Shared fixtures for service tests
#![allow(dead_code)]

use huddle_core::{ChannelId, MemberId, MessageId, Session, UserId, WorkspaceId};
use huddle_service::dto::{
    CreateMessageRequest, CreateWorkspaceRequest, JoinWorkspaceRequest, MessageListQuery,
};
use huddle_service::{
    ChannelService, MemberService, MessageService, ServiceContext, WorkspaceService,
};

pub fn session(user: i64) -> Session {
    Session::authenticated(UserId::new(user))
}

pub async fn create_workspace(ctx: &ServiceContext, owner: &Session, name: &str) -> WorkspaceId {
    WorkspaceService::new(ctx)
        .create(
            owner,
            CreateWorkspaceRequest {
                name: name.to_string(),
            },
        )
        .await
        .unwrap()
}

pub async fn join_code(ctx: &ServiceContext, admin: &Session, workspace: WorkspaceId) -> String {
    WorkspaceService::new(ctx)
        .get_by_id(admin, workspace)
        .await
        .unwrap()
        .unwrap()
        .join_code
}

/// Join with the current code and return the new member id
pub async fn join(
    ctx: &ServiceContext,
    admin: &Session,
    user: &Session,
    workspace: WorkspaceId,
) -> MemberId {
    let code = join_code(ctx, admin, workspace).await;
    WorkspaceService::new(ctx)
        .join(user, workspace, JoinWorkspaceRequest { join_code: code })
        .await
        .unwrap();
    member_id(ctx, user, workspace).await
}

pub async fn member_id(ctx: &ServiceContext, user: &Session, workspace: WorkspaceId) -> MemberId {
    MemberService::new(ctx)
        .current(user, workspace)
        .await
        .unwrap()
        .unwrap()
        .id
        .parse()
        .unwrap()
}

pub async fn general_channel(
    ctx: &ServiceContext,
    user: &Session,
    workspace: WorkspaceId,
) -> ChannelId {
    ChannelService::new(ctx)
        .get(user, workspace)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "general")
        .unwrap()
        .id
        .parse()
        .unwrap()
}

pub async fn post(
    ctx: &ServiceContext,
    user: &Session,
    workspace: WorkspaceId,
    channel: ChannelId,
    body: &str,
) -> MessageId {
    MessageService::new(ctx)
        .create(
            user,
            workspace,
            CreateMessageRequest {
                body: body.to_string(),
                channel_id: Some(channel),
                ..CreateMessageRequest::default()
            },
        )
        .await
        .unwrap()
}

/// Reply in the parent's thread
pub async fn reply(
    ctx: &ServiceContext,
    user: &Session,
    workspace: WorkspaceId,
    parent: MessageId,
    body: &str,
) -> MessageId {
    MessageService::new(ctx)
        .create(
            user,
            workspace,
            CreateMessageRequest {
                body: body.to_string(),
                parent_message_id: Some(parent),
                ..CreateMessageRequest::default()
            },
        )
        .await
        .unwrap()
}

pub fn channel_query(channel: ChannelId) -> MessageListQuery {
    MessageListQuery {
        channel_id: Some(channel),
        ..MessageListQuery::default()
    }
}

/// Rows of every workspace-scoped collection that still reference `workspace`
pub async fn rows_referencing(ctx: &ServiceContext, workspace: WorkspaceId) -> usize {
    ctx.member_repo().find_by_workspace(workspace).await.unwrap().len()
        + ctx.channel_repo().find_by_workspace(workspace).await.unwrap().len()
        + ctx
            .conversation_repo()
            .find_by_workspace(workspace)
            .await
            .unwrap()
            .len()
        + ctx.message_repo().find_by_workspace(workspace).await.unwrap().len()
        + ctx.reaction_repo().find_by_workspace(workspace).await.unwrap().len()
}
