//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::Message;
use huddle_core::error::DomainError;
use huddle_core::traits::{MessageQuery, MessageRepository, RepoResult};
use huddle_core::value_objects::{ChannelId, ConversationId, MemberId, MessageId, WorkspaceId};

use crate::models::{MessageModel, ThreadStatsModel};

use super::error::{map_db_error, try_map_rows};

const COLUMNS: &str = "id, workspace_id, author_member_id, body, image, channel_id, \
                       conversation_id, parent_message_id, created_at, updated_at";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All messages whose `column` equals `value`, oldest first
    async fn find_where(&self, column: &'static str, value: i64) -> RepoResult<Vec<Message>> {
        let sql = format!("SELECT {COLUMNS} FROM messages WHERE {column} = $1 ORDER BY id");
        let results = sqlx::query_as::<_, MessageModel>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        try_map_rows(results)
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let sql = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        let result = sqlx::query_as::<_, MessageModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Message::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Message>> {
        self.find_where("workspace_id", workspace_id.into_inner())
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_channel(&self, channel_id: ChannelId) -> RepoResult<Vec<Message>> {
        self.find_where("channel_id", channel_id.into_inner()).await
    }

    #[instrument(skip(self))]
    async fn find_by_conversation(
        &self,
        conversation_id: ConversationId,
    ) -> RepoResult<Vec<Message>> {
        self.find_where("conversation_id", conversation_id.into_inner())
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, member_id: MemberId) -> RepoResult<Vec<Message>> {
        self.find_where("author_member_id", member_id.into_inner())
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_parent(&self, parent_id: MessageId) -> RepoResult<Vec<Message>> {
        self.find_where("parent_message_id", parent_id.into_inner())
            .await
    }

    #[instrument(skip(self))]
    async fn find_page(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        // IS NOT DISTINCT FROM matches NULL against NULL, so an absent
        // parent selects top-level messages only
        let sql = format!(
            r"
            SELECT {COLUMNS}
            FROM messages
            WHERE channel_id IS NOT DISTINCT FROM $1
              AND conversation_id IS NOT DISTINCT FROM $2
              AND parent_message_id IS NOT DISTINCT FROM $3
              AND ($4::BIGINT IS NULL OR id < $4)
            ORDER BY id DESC
            LIMIT $5
            "
        );
        let results = sqlx::query_as::<_, MessageModel>(&sql)
            .bind(query.channel_id.map(ChannelId::into_inner))
            .bind(query.conversation_id.map(ConversationId::into_inner))
            .bind(query.parent_message_id.map(MessageId::into_inner))
            .bind(query.before.map(MessageId::into_inner))
            .bind(query.limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        try_map_rows(results)
    }

    #[instrument(skip(self))]
    async fn thread_stats(
        &self,
        parent_id: MessageId,
    ) -> RepoResult<(usize, Option<DateTime<Utc>>)> {
        let stats = sqlx::query_as::<_, ThreadStatsModel>(
            r"
            SELECT COUNT(*) AS reply_count, MAX(created_at) AS last_reply_at
            FROM messages
            WHERE parent_message_id = $1
            ",
        )
        .bind(parent_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((stats.reply_count.max(0) as usize, stats.last_reply_at))
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO messages (id, workspace_id, author_member_id, body, image, channel_id,
                                  conversation_id, parent_message_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.workspace_id.into_inner())
        .bind(message.author_member_id.into_inner())
        .bind(&message.body)
        .bind(&message.image)
        .bind(message.channel_id().map(ChannelId::into_inner))
        .bind(message.conversation_id().map(ConversationId::into_inner))
        .bind(message.parent_message_id.map(MessageId::into_inner))
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn update(&self, message: &Message) -> RepoResult<()> {
        let result = sqlx::query("UPDATE messages SET body = $2, updated_at = $3 WHERE id = $1")
            .bind(message.id.into_inner())
            .bind(&message.body)
            .bind(message.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MessageNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MessageId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
