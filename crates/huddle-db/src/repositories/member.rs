//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::Member;
use huddle_core::error::DomainError;
use huddle_core::traits::{MemberRepository, RepoResult};
use huddle_core::value_objects::{MemberId, UserId, WorkspaceId};

use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation, try_map_rows};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            "SELECT id, user_id, workspace_id, role, joined_at FROM members WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_workspace_and_user(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, user_id, workspace_id, role, joined_at
            FROM members
            WHERE workspace_id = $1 AND user_id = $2
            ",
        )
        .bind(workspace_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, user_id, workspace_id, role, joined_at
            FROM members
            WHERE workspace_id = $1
            ORDER BY id
            ",
        )
        .bind(workspace_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        try_map_rows(results)
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, user_id, workspace_id, role, joined_at
            FROM members
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        try_map_rows(results)
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO members (id, user_id, workspace_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.workspace_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query("UPDATE members SET role = $2 WHERE id = $1")
            .bind(member.id.into_inner())
            .bind(member.role.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MemberId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
