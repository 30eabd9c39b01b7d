//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::Reaction;
use huddle_core::traits::{ReactionRepository, RepoResult};
use huddle_core::value_objects::{MemberId, MessageId, ReactionId, WorkspaceId};

use crate::models::ReactionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &'static str, value: i64) -> RepoResult<Vec<Reaction>> {
        let sql = format!(
            "SELECT id, workspace_id, message_id, member_id, value, created_at \
             FROM reactions WHERE {column} = $1 ORDER BY id"
        );
        let results = sqlx::query_as::<_, ReactionModel>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReactionId) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, workspace_id, message_id, member_id, value, created_at
            FROM reactions
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn find_by_message(&self, message_id: MessageId) -> RepoResult<Vec<Reaction>> {
        self.find_where("message_id", message_id.into_inner()).await
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Reaction>> {
        self.find_where("workspace_id", workspace_id.into_inner())
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Reaction>> {
        self.find_where("member_id", member_id.into_inner()).await
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        message_id: MessageId,
        member_id: MemberId,
        value: &str,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT id, workspace_id, message_id, member_id, value, created_at
            FROM reactions
            WHERE message_id = $1 AND member_id = $2 AND value = $3
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(message_id.into_inner())
        .bind(member_id.into_inner())
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self, reaction), fields(reaction_id = %reaction.id))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reactions (id, workspace_id, message_id, member_id, value, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(reaction.id.into_inner())
        .bind(reaction.workspace_id.into_inner())
        .bind(reaction.message_id.into_inner())
        .bind(reaction.member_id.into_inner())
        .bind(&reaction.value)
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ReactionId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM reactions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
