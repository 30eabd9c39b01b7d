//! Cascading deletes: completeness, idempotence, races, and partial failure

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    create_workspace, general_channel, join, post, reply, rows_referencing, session,
};
use huddle_core::{
    ChannelId, ConversationId, DomainError, MemberId, Message, MessageId, MessageQuery,
    MessageRepository, RepoResult, WorkspaceId,
};
use huddle_db::Repositories;
use huddle_service::dto::{CreateConversationRequest, CreateMessageRequest, ToggleReactionRequest};
use huddle_service::{
    CascadeDelete, ConversationService, MessageService, ReactionService, ServiceContext,
    ServiceError, WorkspaceService,
};

/// A workspace with a second member, a conversation, messages, replies and reactions
async fn populated_workspace(ctx: &ServiceContext) -> WorkspaceId {
    let admin = session(1);
    let user = session(2);
    let workspace = create_workspace(ctx, &admin, "Acme").await;
    let other = join(ctx, &admin, &user, workspace).await;
    let channel = general_channel(ctx, &admin, workspace).await;

    let first = post(ctx, &admin, workspace, channel, "first").await;
    post(ctx, &user, workspace, channel, "second").await;
    MessageService::new(ctx)
        .create(
            &user,
            workspace,
            CreateMessageRequest {
                body: "reply".into(),
                parent_message_id: Some(first),
                ..CreateMessageRequest::default()
            },
        )
        .await
        .unwrap();

    let conversation = ConversationService::new(ctx)
        .create_or_get(&admin, workspace, CreateConversationRequest { member_id: other })
        .await
        .unwrap();
    MessageService::new(ctx)
        .create(
            &admin,
            workspace,
            CreateMessageRequest {
                body: "psst".into(),
                conversation_id: Some(conversation),
                ..CreateMessageRequest::default()
            },
        )
        .await
        .unwrap();

    for (who, value) in [(&admin, "👍"), (&user, "👍"), (&user, "🎉")] {
        ReactionService::new(ctx)
            .toggle(who, first, ToggleReactionRequest { value: value.into() })
            .await
            .unwrap();
    }
    workspace
}

#[tokio::test]
async fn workspace_remove_leaves_no_rows() {
    let ctx = ServiceContext::in_memory();
    let workspace = populated_workspace(&ctx).await;
    assert!(rows_referencing(&ctx, workspace).await > 0);

    let removed = WorkspaceService::new(&ctx)
        .remove(&session(1), workspace)
        .await
        .unwrap();
    assert_eq!(removed, workspace);

    assert_eq!(rows_referencing(&ctx, workspace).await, 0);
    assert!(ctx.workspace_repo().find_by_id(workspace).await.unwrap().is_none());
    assert!(WorkspaceService::new(&ctx).get(&session(2)).await.unwrap().is_empty());
}

#[tokio::test]
async fn cascade_report_counts_every_row() {
    let ctx = ServiceContext::in_memory();
    let workspace = populated_workspace(&ctx).await;

    let report = CascadeDelete::new(&ctx).workspace(workspace).await.unwrap();
    assert_eq!(report.members, 2);
    assert_eq!(report.channels, 1);
    assert_eq!(report.conversations, 1);
    assert_eq!(report.messages, 4);
    assert_eq!(report.reactions, 3);
    assert!(report.root_deleted);

    // Running it again touches nothing
    let again = CascadeDelete::new(&ctx).workspace(workspace).await.unwrap();
    assert_eq!(again.children(), 0);
    assert!(!again.root_deleted);
}

#[tokio::test]
async fn second_remove_fails_without_recreating_rows() {
    let ctx = ServiceContext::in_memory();
    let workspace = populated_workspace(&ctx).await;
    let service = WorkspaceService::new(&ctx);

    service.remove(&session(1), workspace).await.unwrap();
    let err = service.remove(&session(1), workspace).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::WorkspaceNotFound)));
    assert_eq!(rows_referencing(&ctx, workspace).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_removes_are_safe() {
    for _ in 0..20 {
        let ctx = ServiceContext::in_memory();
        let workspace = populated_workspace(&ctx).await;

        let tasks: Vec<_> = (0..2)
            .map(|_| {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    WorkspaceService::new(&ctx)
                        .remove(&session(1), workspace)
                        .await
                })
            })
            .collect();

        let mut succeeded = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(id) => {
                    assert_eq!(id, workspace);
                    succeeded += 1;
                }
                // The loser may find the workspace or its own membership already gone
                Err(ServiceError::Domain(
                    DomainError::WorkspaceNotFound | DomainError::Unauthorized,
                )) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(succeeded >= 1);
        assert_eq!(rows_referencing(&ctx, workspace).await, 0);
        assert!(ctx.workspace_repo().find_by_id(workspace).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn channel_remove_cascades_reactions() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    let channel = general_channel(&ctx, &admin, workspace).await;
    let message = post(&ctx, &admin, workspace, channel, "hi").await;
    ReactionService::new(&ctx)
        .toggle(&admin, message, ToggleReactionRequest { value: "👍".into() })
        .await
        .unwrap();

    huddle_service::ChannelService::new(&ctx)
        .remove(&admin, channel)
        .await
        .unwrap();

    assert!(ctx.message_repo().find_by_id(message).await.unwrap().is_none());
    assert!(ctx.reaction_repo().find_by_message(message).await.unwrap().is_empty());
    assert!(ctx
        .reaction_repo()
        .find_by_workspace(workspace)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn message_remove_cascades_reactions() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    let channel = general_channel(&ctx, &admin, workspace).await;
    let message = post(&ctx, &admin, workspace, channel, "hi").await;
    ReactionService::new(&ctx)
        .toggle(&admin, message, ToggleReactionRequest { value: "🎉".into() })
        .await
        .unwrap();

    MessageService::new(&ctx).remove(&admin, message).await.unwrap();
    assert!(ctx.reaction_repo().find_by_message(message).await.unwrap().is_empty());
}

#[tokio::test]
async fn message_remove_takes_its_thread() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let user = session(2);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    join(&ctx, &admin, &user, workspace).await;
    let channel = general_channel(&ctx, &admin, workspace).await;

    let root = post(&ctx, &admin, workspace, channel, "root").await;
    let answer = reply(&ctx, &user, workspace, root, "answer").await;
    let nested = reply(&ctx, &admin, workspace, answer, "nested").await;
    let bystander = post(&ctx, &user, workspace, channel, "unrelated").await;
    ReactionService::new(&ctx)
        .toggle(&admin, answer, ToggleReactionRequest { value: "👍".into() })
        .await
        .unwrap();

    let report = CascadeDelete::new(&ctx)
        .message(&ctx.message_repo().find_by_id(root).await.unwrap().unwrap())
        .await
        .unwrap();
    assert_eq!(report.messages, 2);
    assert_eq!(report.reactions, 1);
    assert!(report.root_deleted);

    for id in [root, answer, nested] {
        assert!(ctx.message_repo().find_by_id(id).await.unwrap().is_none());
    }
    assert!(ctx.message_repo().find_by_parent(root).await.unwrap().is_empty());
    assert!(ctx.reaction_repo().find_by_message(answer).await.unwrap().is_empty());
    assert!(ctx.message_repo().find_by_id(bystander).await.unwrap().is_some());
}

#[tokio::test]
async fn author_removing_a_root_removes_replies_by_others() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let user = session(2);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    join(&ctx, &admin, &user, workspace).await;
    let channel = general_channel(&ctx, &admin, workspace).await;

    let root = post(&ctx, &admin, workspace, channel, "root").await;
    let answer = reply(&ctx, &user, workspace, root, "answer").await;

    MessageService::new(&ctx).remove(&admin, root).await.unwrap();
    assert!(ctx.message_repo().find_by_id(answer).await.unwrap().is_none());
    assert_eq!(
        ctx.message_repo().find_by_workspace(workspace).await.unwrap().len(),
        0
    );
}

// ============================================================================
// Partial failure
// ============================================================================

/// Message store whose deletes start failing after a number of successes
struct FlakyMessages {
    inner: Arc<dyn MessageRepository>,
    deletes_left: AtomicUsize,
}

#[async_trait]
impl MessageRepository for FlakyMessages {
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Message>> {
        self.inner.find_by_workspace(workspace_id).await
    }

    async fn find_by_channel(&self, channel_id: ChannelId) -> RepoResult<Vec<Message>> {
        self.inner.find_by_channel(channel_id).await
    }

    async fn find_by_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> RepoResult<Vec<Message>> {
        self.inner.find_by_conversation(conversation_id).await
    }

    async fn find_by_author(&self, member_id: MemberId) -> RepoResult<Vec<Message>> {
        self.inner.find_by_author(member_id).await
    }

    async fn find_by_parent(&self, parent_id: MessageId) -> RepoResult<Vec<Message>> {
        self.inner.find_by_parent(parent_id).await
    }

    async fn find_page(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        self.inner.find_page(query).await
    }

    async fn thread_stats(
        &self,
        parent_id: MessageId,
    ) -> RepoResult<(usize, Option<DateTime<Utc>>)> {
        self.inner.thread_stats(parent_id).await
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.inner.create(message).await
    }

    async fn update(&self, message: &Message) -> RepoResult<()> {
        self.inner.update(message).await
    }

    async fn delete(&self, id: MessageId) -> RepoResult<bool> {
        let left = self.deletes_left.load(Ordering::SeqCst);
        if left == 0 {
            return Err(DomainError::DatabaseError("connection reset".into()));
        }
        self.deletes_left.store(left - 1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn failure_mid_cascade_aborts_and_keeps_earlier_deletes() {
    let mut repositories = Repositories::in_memory();
    repositories.messages = Arc::new(FlakyMessages {
        inner: Arc::clone(&repositories.messages),
        deletes_left: AtomicUsize::new(1),
    });
    let ctx = ServiceContext::builder()
        .repositories(repositories)
        .build()
        .unwrap();
    let workspace = populated_workspace(&ctx).await;

    let err = WorkspaceService::new(&ctx)
        .remove(&session(1), workspace)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 500);

    // Members, channels and conversations go before messages
    assert!(ctx.member_repo().find_by_workspace(workspace).await.unwrap().is_empty());
    assert!(ctx.channel_repo().find_by_workspace(workspace).await.unwrap().is_empty());
    assert!(ctx
        .conversation_repo()
        .find_by_workspace(workspace)
        .await
        .unwrap()
        .is_empty());
    // One message was deleted before the failure; the rest and the root remain
    assert_eq!(
        ctx.message_repo().find_by_workspace(workspace).await.unwrap().len(),
        3
    );
    assert_eq!(
        ctx.reaction_repo().find_by_workspace(workspace).await.unwrap().len(),
        3
    );
    assert!(ctx.workspace_repo().find_by_id(workspace).await.unwrap().is_some());
}
