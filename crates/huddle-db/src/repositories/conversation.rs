//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::Conversation;
use huddle_core::traits::{ConversationRepository, RepoResult};
use huddle_core::value_objects::{ConversationId, MemberId, WorkspaceId};

use crate::models::ConversationModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ConversationId) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, workspace_id, member_one_id, member_two_id, created_at
            FROM conversations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> RepoResult<Vec<Conversation>> {
        let results = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, workspace_id, member_one_id, member_two_id, created_at
            FROM conversations
            WHERE workspace_id = $1
            ORDER BY id
            ",
        )
        .bind(workspace_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Conversation>> {
        let results = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, workspace_id, member_one_id, member_two_id, created_at
            FROM conversations
            WHERE member_one_id = $1 OR member_two_id = $1
            ORDER BY id
            ",
        )
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_between(
        &self,
        workspace_id: WorkspaceId,
        a: MemberId,
        b: MemberId,
    ) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, workspace_id, member_one_id, member_two_id, created_at
            FROM conversations
            WHERE workspace_id = $1
              AND ((member_one_id = $2 AND member_two_id = $3)
                OR (member_one_id = $3 AND member_two_id = $2))
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(workspace_id.into_inner())
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn create(&self, conversation: &Conversation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO conversations (id, workspace_id, member_one_id, member_two_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(conversation.id.into_inner())
        .bind(conversation.workspace_id.into_inner())
        .bind(conversation.member_one_id.into_inner())
        .bind(conversation.member_two_id.into_inner())
        .bind(conversation.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ConversationId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
