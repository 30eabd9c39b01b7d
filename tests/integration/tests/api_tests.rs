//! API Integration Tests
//!
//! Each test spawns its own server on an ephemeral port with the in-memory
//! store. Run with: cargo test -p integration-tests --test api_tests

use huddle_common::IdentityProfile;
use integration_tests::{
    assert_json, assert_status, channel_message, fixtures::*, join_code as join_body, name,
    reaction, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Create a workspace and return its id and generated join code
async fn create_workspace(server: &TestServer, token: &str, workspace: &str) -> (String, String) {
    let response = server
        .post("/workspaces", Some(token), &name(workspace))
        .await
        .unwrap();
    let created: IdBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get(&format!("/workspaces/{}", created.id), Some(token))
        .await
        .unwrap();
    let body: WorkspaceBody = assert_json(response, StatusCode::OK).await.unwrap();
    (created.id, body.join_code)
}

async fn join(server: &TestServer, token: &str, workspace_id: &str, code: &str) -> StatusCode {
    server
        .post(
            &format!("/workspaces/{workspace_id}/join"),
            Some(token),
            &join_body(code),
        )
        .await
        .unwrap()
        .status()
}

async fn channels(server: &TestServer, token: Option<&str>, workspace_id: &str) -> Vec<ChannelBody> {
    let response = server
        .get(&format!("/workspaces/{workspace_id}/channels"), token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn post_message(server: &TestServer, token: &str, workspace_id: &str, body: Value) -> String {
    let response = server
        .post(&format!("/workspaces/{workspace_id}/messages"), Some(token), &body)
        .await
        .unwrap();
    let created: IdBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.id
}

async fn current_member(server: &TestServer, token: &str, workspace_id: &str) -> Option<MemberBody> {
    let response = server
        .get(&format!("/workspaces/{workspace_id}/members/@me"), Some(token))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["store"], "up");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/workspaces", None).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Anonymous Callers
// ============================================================================

#[tokio::test]
async fn test_anonymous_reads_are_empty_and_writes_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let owner = server.token(1);
    let (workspace_id, _) = create_workspace(&server, &owner, "Acme").await;

    let listed: Vec<WorkspaceBody> =
        assert_json(server.get("/workspaces", None).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert!(listed.is_empty());

    let single: Option<WorkspaceBody> = assert_json(
        server
            .get(&format!("/workspaces/{workspace_id}"), None)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(single.is_none());
    assert!(channels(&server, None, &workspace_id).await.is_empty());

    let response = server.post("/workspaces", None, &name("Nope")).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "UNAUTHORIZED");
    assert_eq!(error.error.message, "Unauthorized");
}

#[tokio::test]
async fn test_invalid_token_is_anonymous() {
    let server = TestServer::start().await.unwrap();

    let me: Option<UserBody> = assert_json(
        server.get("/users/@me", Some("not.a.token")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(me.is_none());

    let response = server
        .post("/workspaces", Some("not.a.token"), &name("Acme"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_profile_sync_merges_token_claims() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_with_profile(
        7,
        IdentityProfile {
            name: Some("Ann".into()),
            email: Some("ann@example.com".into()),
            image: None,
        },
    );

    let response = server.put("/users/@me", Some(&token), &json!({})).await.unwrap();
    let id: IdBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(id.id, "7");

    let me: Option<UserBody> =
        assert_json(server.get("/users/@me", Some(&token)).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    let me = me.unwrap();
    assert_eq!(me.id, "7");
    assert_eq!(me.name.as_deref(), Some("Ann"));
    assert_eq!(me.email.as_deref(), Some("ann@example.com"));

    // Body fields take precedence over claims
    let response = server
        .put("/users/@me", Some(&token), &json!({ "name": "Annie" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let me: Option<UserBody> =
        assert_json(server.get("/users/@me", Some(&token)).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(me.unwrap().name.as_deref(), Some("Annie"));
}

// ============================================================================
// Workspaces
// ============================================================================

#[tokio::test]
async fn test_acme_scenario() {
    let server = TestServer::start().await.unwrap();
    let a = server.token(1);
    let b = server.token(2);

    let (acme, code) = create_workspace(&server, &a, "Acme").await;
    assert_eq!(code.len(), 6);
    let general = channels(&server, Some(&a), &acme).await;
    assert_eq!(general.len(), 1);
    assert_eq!(general[0].name, "general");
    let general = general[0].id.clone();

    assert_eq!(join(&server, &b, &acme, &code.to_uppercase()).await, StatusCode::OK);
    assert_eq!(current_member(&server, &b, &acme).await.unwrap().role, "member");

    let response = server
        .post(&format!("/workspaces/{acme}/channels"), Some(&b), &name("new-chan"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let message = post_message(&server, &b, &acme, channel_message(&general, "hello from b")).await;

    let response = server
        .delete(&format!("/channels/{general}"), Some(&a))
        .await
        .unwrap();
    let removed: IdBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(removed.id, general);

    assert!(channels(&server, Some(&a), &acme).await.is_empty());
    let gone: Option<MessageBody> = assert_json(
        server
            .get(&format!("/messages/{message}"), Some(&a))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_join_errors() {
    let server = TestServer::start().await.unwrap();
    let owner = server.token(1);
    let user = server.token(2);
    let (workspace_id, code) = create_workspace(&server, &owner, "Acme").await;
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let response = server
        .post(
            &format!("/workspaces/{workspace_id}/join"),
            Some(&user),
            &join_body(wrong),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_JOIN_CODE");
    assert_eq!(error.error.message, "Invalid Join Code");

    assert_eq!(join(&server, &user, &workspace_id, &code).await, StatusCode::OK);
    let response = server
        .post(
            &format!("/workspaces/{workspace_id}/join"),
            Some(&user),
            &join_body(&code),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.message, "Already A Member of this Workspace");
}

#[tokio::test]
async fn test_workspace_info_and_rename() {
    let server = TestServer::start().await.unwrap();
    let owner = server.token(1);
    let outsider = server.token(2);
    let (workspace_id, _) = create_workspace(&server, &owner, "Acme").await;

    let info: Option<WorkspaceInfoBody> = assert_json(
        server
            .get(&format!("/workspaces/{workspace_id}/info"), Some(&outsider))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(
        info,
        Some(WorkspaceInfoBody {
            name: Some("Acme".into()),
            is_member: false,
        })
    );

    let response = server
        .patch(
            &format!("/workspaces/{workspace_id}"),
            Some(&owner),
            &name("Acme Corp"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .patch(
            &format!("/workspaces/{workspace_id}"),
            Some(&outsider),
            &name("Mine now"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let listed: Vec<WorkspaceBody> =
        assert_json(server.get("/workspaces", Some(&owner)).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Acme Corp");
    assert_eq!(listed[0].owner_id, "1");
}

#[tokio::test]
async fn test_validation_errors_carry_details() {
    let server = TestServer::start().await.unwrap();
    let token = server.token(1);

    let response = server.post("/workspaces", Some(&token), &name("")).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
    assert!(error.error.details.is_some());

    let response = server.get("/channels/abc", Some(&token)).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_workspace_delete_cascades() {
    let server = TestServer::start().await.unwrap();
    let owner = server.token(1);
    let user = server.token(2);
    let (workspace_id, code) = create_workspace(&server, &owner, "Acme").await;
    join(&server, &user, &workspace_id, &code).await;
    let channel = channels(&server, Some(&owner), &workspace_id).await[0].id.clone();
    let message = post_message(&server, &user, &workspace_id, channel_message(&channel, "hi")).await;
    let response = server
        .post(&format!("/messages/{message}/reactions"), Some(&owner), &reaction("👍"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // A plain member may not delete the workspace
    let response = server
        .delete(&format!("/workspaces/{workspace_id}"), Some(&user))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .delete(&format!("/workspaces/{workspace_id}"), Some(&owner))
        .await
        .unwrap();
    let removed: IdBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(removed.id, workspace_id);

    let channel: Option<ChannelBody> = assert_json(
        server
            .get(&format!("/channels/{channel}"), Some(&owner))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(channel.is_none());
    assert!(current_member(&server, &user, &workspace_id).await.is_none());

    let response = server
        .delete(&format!("/workspaces/{workspace_id}"), Some(&owner))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.message, "Workspace not Found");
}

// ============================================================================
// Members
// ============================================================================

#[tokio::test]
async fn test_member_listing_promotion_and_leave() {
    let server = TestServer::start().await.unwrap();
    let owner = server.token(1);
    let user = server.token(2);
    let (workspace_id, code) = create_workspace(&server, &owner, "Acme").await;
    join(&server, &user, &workspace_id, &code).await;

    let members: Vec<MemberBody> = assert_json(
        server
            .get(&format!("/workspaces/{workspace_id}/members"), Some(&owner))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m.user.is_some()));

    let member = current_member(&server, &user, &workspace_id).await.unwrap();
    let response = server
        .patch(
            &format!("/members/{}", member.id),
            Some(&owner),
            &json!({ "role": "admin" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert_eq!(current_member(&server, &user, &workspace_id).await.unwrap().role, "admin");

    let response = server
        .delete(&format!("/members/{}", member.id), Some(&user))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert!(current_member(&server, &user, &workspace_id).await.is_none());

    // The owner is now the only admin again and cannot leave
    let owner_member = current_member(&server, &owner, &workspace_id).await.unwrap();
    let response = server
        .delete(&format!("/members/{}", owner_member.id), Some(&owner))
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "LAST_ADMIN");
}

// ============================================================================
// Conversations and Messages
// ============================================================================

#[tokio::test]
async fn test_conversation_is_shared_and_private() {
    let server = TestServer::start().await.unwrap();
    let a = server.token(1);
    let b = server.token(2);
    let c = server.token(3);
    let (workspace_id, code) = create_workspace(&server, &a, "Acme").await;
    join(&server, &b, &workspace_id, &code).await;
    join(&server, &c, &workspace_id, &code).await;
    let a_member = current_member(&server, &a, &workspace_id).await.unwrap();
    let b_member = current_member(&server, &b, &workspace_id).await.unwrap();

    let path = format!("/workspaces/{workspace_id}/conversations");
    let first: IdBody = assert_json(
        server
            .post(&path, Some(&a), &json!({ "member_id": b_member.id }))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let second: IdBody = assert_json(
        server
            .post(&path, Some(&b), &json!({ "member_id": a_member.id }))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(first.id, second.id);

    post_message(
        &server,
        &a,
        &workspace_id,
        json!({ "body": "psst", "conversation_id": first.id }),
    )
    .await;

    let page: PageBody<MessageBody> = assert_json(
        server
            .get(&format!("/messages?conversation_id={}", first.id), Some(&b))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].conversation_id.as_deref(), Some(first.id.as_str()));

    let page: PageBody<MessageBody> = assert_json(
        server
            .get(&format!("/messages?conversation_id={}", first.id), Some(&c))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(page.data.is_empty());

    let hidden: Option<Value> = assert_json(
        server
            .get(&format!("/conversations/{}", first.id), Some(&c))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(hidden.is_none());
}

#[tokio::test]
async fn test_message_paging() {
    let server = TestServer::start().await.unwrap();
    let token = server.token(1);
    let (workspace_id, _) = create_workspace(&server, &token, "Acme").await;
    let channel = channels(&server, Some(&token), &workspace_id).await[0].id.clone();

    for i in 0..25 {
        post_message(
            &server,
            &token,
            &workspace_id,
            channel_message(&channel, &format!("message {i}")),
        )
        .await;
    }

    let first: PageBody<MessageBody> = assert_json(
        server
            .get(&format!("/messages?channel_id={channel}"), Some(&token))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(first.data.len(), 20);
    assert_eq!(first.pagination.limit, 20);
    assert!(first.pagination.has_more);
    assert_eq!(first.data[0].body, "message 24");
    assert_eq!(first.data[0].member.user_id, "1");

    let cursor = first.pagination.before.unwrap();
    let second: PageBody<MessageBody> = assert_json(
        server
            .get(
                &format!("/messages?channel_id={channel}&before={cursor}"),
                Some(&token),
            )
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(second.data.len(), 5);
    assert!(!second.pagination.has_more);
    assert_eq!(second.data[4].body, "message 0");

    let response = server
        .get(&format!("/messages?channel_id={channel}&limit=500"), Some(&token))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_threads_edits_and_reactions() {
    let server = TestServer::start().await.unwrap();
    let author = server.token(1);
    let other = server.token(2);
    let (workspace_id, code) = create_workspace(&server, &author, "Acme").await;
    join(&server, &other, &workspace_id, &code).await;
    let channel = channels(&server, Some(&author), &workspace_id).await[0].id.clone();
    let parent = post_message(&server, &author, &workspace_id, channel_message(&channel, "root")).await;

    let reply = post_message(
        &server,
        &other,
        &workspace_id,
        json!({ "body": "reply", "parent_message_id": parent }),
    )
    .await;

    // Only the author may edit
    let response = server
        .patch(&format!("/messages/{parent}"), Some(&other), &json!({ "body": "x" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    let response = server
        .patch(
            &format!("/messages/{parent}"),
            Some(&author),
            &json!({ "body": "root, edited" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    for (token, value) in [(&author, "👍"), (&other, "👍"), (&other, "🎉")] {
        let response = server
            .post(&format!("/messages/{parent}/reactions"), Some(token.as_str()), &reaction(value))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
    // Toggling again takes the reaction back
    let response = server
        .post(&format!("/messages/{parent}/reactions"), Some(&other), &reaction("🎉"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let message: Option<MessageBody> = assert_json(
        server
            .get(&format!("/messages/{parent}"), Some(&other))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let message = message.unwrap();
    assert_eq!(message.body, "root, edited");
    assert!(message.updated_at.is_some());
    assert_eq!(message.thread.count, 1);
    assert_eq!(message.reactions.len(), 1);
    assert_eq!(message.reactions[0].value, "👍");
    assert_eq!(message.reactions[0].count, 2);
    assert_eq!(message.reactions[0].member_ids.len(), 2);

    let thread: PageBody<MessageBody> = assert_json(
        server
            .get(&format!("/messages?parent_message_id={parent}"), Some(&author))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(thread.data.len(), 1);
    assert_eq!(thread.data[0].id, reply);
    assert_eq!(thread.data[0].channel_id.as_deref(), Some(channel.as_str()));
    assert_eq!(thread.data[0].parent_message_id.as_deref(), Some(parent.as_str()));

    let response = server
        .delete(&format!("/messages/{parent}"), Some(&author))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_outsider_cannot_post() {
    let server = TestServer::start().await.unwrap();
    let owner = server.token(1);
    let outsider = server.token(9);
    let (workspace_id, _) = create_workspace(&server, &owner, "Acme").await;
    let channel = channels(&server, Some(&owner), &workspace_id).await[0].id.clone();

    let response = server
        .post(
            &format!("/workspaces/{workspace_id}/messages"),
            Some(&outsider),
            &channel_message(&channel, "let me in"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let page: PageBody<MessageBody> = assert_json(
        server
            .get(&format!("/messages?channel_id={channel}"), Some(&outsider))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert!(page.data.is_empty());
    assert!(!page.pagination.has_more);
}
