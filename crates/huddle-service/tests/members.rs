//! Member roles, removal, and leaving

mod common;

use common::{create_workspace, general_channel, join, member_id, post, reply, session};
use huddle_core::{DomainError, MemberRole};
use huddle_service::dto::{CreateConversationRequest, ToggleReactionRequest, UpdateMemberRequest};
use huddle_service::{
    ConversationService, MemberService, ReactionService, ServiceContext, ServiceError,
    WorkspaceService,
};

#[tokio::test]
async fn members_are_listed_with_users() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    join(&ctx, &admin, &session(2), workspace).await;

    let members = MemberService::new(&ctx).get(&admin, workspace).await.unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m.user.is_some()));

    let id = member_id(&ctx, &session(2), workspace).await;
    let member = MemberService::new(&ctx).get_by_id(&admin, id).await.unwrap().unwrap();
    assert_eq!(member.user_id, "2");
    assert!(MemberService::new(&ctx)
        .get_by_id(&session(3), id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn admin_promotes_and_demotes() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let user = session(2);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    let member = join(&ctx, &admin, &user, workspace).await;
    let service = MemberService::new(&ctx);

    service
        .update(&admin, member, UpdateMemberRequest { role: MemberRole::Admin })
        .await
        .unwrap();
    let current = service.current(&user, workspace).await.unwrap().unwrap();
    assert_eq!(current.role, MemberRole::Admin);

    // The promoted member can now create channels
    huddle_service::ChannelService::new(&ctx)
        .create(
            &user,
            workspace,
            huddle_service::dto::CreateChannelRequest {
                name: "ops".into(),
            },
        )
        .await
        .unwrap();

    service
        .update(&admin, member, UpdateMemberRequest { role: MemberRole::Member })
        .await
        .unwrap();
    let current = service.current(&user, workspace).await.unwrap().unwrap();
    assert_eq!(current.role, MemberRole::Member);
}

#[tokio::test]
async fn last_admin_cannot_be_demoted_or_leave() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    let admin_member = member_id(&ctx, &admin, workspace).await;
    join(&ctx, &admin, &session(2), workspace).await;
    let service = MemberService::new(&ctx);

    let err = service
        .update(&admin, admin_member, UpdateMemberRequest { role: MemberRole::Member })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::LastAdmin)));
    assert_eq!(err.status_code(), 400);

    let err = service.remove(&admin, admin_member).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::LastAdmin)));
    assert!(service.current(&admin, workspace).await.unwrap().is_some());
}

#[tokio::test]
async fn owner_cannot_be_removed_by_another_admin() {
    let ctx = ServiceContext::in_memory();
    let owner = session(1);
    let other = session(2);
    let workspace = create_workspace(&ctx, &owner, "Acme").await;
    let owner_member = member_id(&ctx, &owner, workspace).await;
    let other_member = join(&ctx, &owner, &other, workspace).await;
    let service = MemberService::new(&ctx);
    service
        .update(&owner, other_member, UpdateMemberRequest { role: MemberRole::Admin })
        .await
        .unwrap();

    let err = service.remove(&other, owner_member).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::CannotRemoveOwner)));

    // With a second admin present the owner may leave
    service.remove(&owner, owner_member).await.unwrap();
    assert!(service.current(&owner, workspace).await.unwrap().is_none());
}

#[tokio::test]
async fn member_can_leave_and_loses_access() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let user = session(2);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    let member = join(&ctx, &admin, &user, workspace).await;

    MemberService::new(&ctx).remove(&user, member).await.unwrap();
    assert!(WorkspaceService::new(&ctx)
        .get_by_id(&user, workspace)
        .await
        .unwrap()
        .is_none());
    let err = MemberService::new(&ctx).remove(&user, member).await.unwrap_err();
    assert_eq!(err.to_string(), "Member not Found");
}

#[tokio::test]
async fn removing_a_member_cascades_their_rows() {
    let ctx = ServiceContext::in_memory();
    let admin = session(1);
    let user = session(2);
    let workspace = create_workspace(&ctx, &admin, "Acme").await;
    let member = join(&ctx, &admin, &user, workspace).await;
    let channel = general_channel(&ctx, &admin, workspace).await;

    let own = post(&ctx, &user, workspace, channel, "mine").await;
    let admins = post(&ctx, &admin, workspace, channel, "admin's").await;
    let reply_to_own = reply(&ctx, &admin, workspace, own, "reply to theirs").await;
    let reply_by_user = reply(&ctx, &user, workspace, admins, "their reply").await;
    ReactionService::new(&ctx)
        .toggle(&admin, reply_to_own, ToggleReactionRequest { value: "🎉".into() })
        .await
        .unwrap();
    ReactionService::new(&ctx)
        .toggle(&user, admins, ToggleReactionRequest { value: "👀".into() })
        .await
        .unwrap();
    ReactionService::new(&ctx)
        .toggle(&admin, own, ToggleReactionRequest { value: "👍".into() })
        .await
        .unwrap();
    let conversation = ConversationService::new(&ctx)
        .create_or_get(&admin, workspace, CreateConversationRequest { member_id: member })
        .await
        .unwrap();

    MemberService::new(&ctx).remove(&admin, member).await.unwrap();

    assert!(ctx.message_repo().find_by_id(own).await.unwrap().is_none());
    assert!(ctx.message_repo().find_by_id(admins).await.unwrap().is_some());
    // Replies under a removed root go with it; the member's own replies go too
    assert!(ctx.message_repo().find_by_id(reply_to_own).await.unwrap().is_none());
    assert!(ctx.reaction_repo().find_by_message(reply_to_own).await.unwrap().is_empty());
    assert!(ctx.message_repo().find_by_id(reply_by_user).await.unwrap().is_none());
    assert!(ctx.message_repo().find_by_parent(admins).await.unwrap().is_empty());
    assert!(ctx.reaction_repo().find_by_member(member).await.unwrap().is_empty());
    assert!(ctx.reaction_repo().find_by_message(own).await.unwrap().is_empty());
    assert!(ctx
        .conversation_repo()
        .find_by_id(conversation)
        .await
        .unwrap()
        .is_none());
}
