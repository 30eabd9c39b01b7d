//! In-memory MemberRepository
//!
//! Maintains `by_workspace`, `by_user` and the unique
//! `(workspace_id, user_id)` index.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::instrument;

use huddle_core::entities::Member;
use huddle_core::error::DomainError;
use huddle_core::traits::{MemberRepository, RepoResult};
use huddle_core::value_objects::{MemberId, UserId, WorkspaceId};

use super::index::Index;

#[derive(Debug, Default)]
struct MemberTable {
    rows: HashMap<MemberId, Member>,
    by_workspace: Index<WorkspaceId, MemberId>,
    by_user: Index<UserId, MemberId>,
    by_workspace_user: HashMap<(WorkspaceId, UserId), MemberId>,
}

impl MemberTable {
    fn collect(&self, ids: impl Iterator<Item = MemberId>) -> Vec<Member> {
        ids.filter_map(|id| self.rows.get(&id).cloned()).collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryMemberRepository {
    table: RwLock<MemberTable>,
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_workspace_and_user(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> RepoResult<Option<Member>> {
        let table = self.table.read();
        Ok(table
            .by_workspace_user
            .get(&(workspace_id, user_id))
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: WorkspaceId) -> RepoResult<Vec<Member>> {
        let table = self.table.read();
        Ok(table.collect(table.by_workspace.get(&workspace_id)))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Member>> {
        let table = self.table.read();
        Ok(table.collect(table.by_user.get(&user_id)))
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        let mut table = self.table.write();
        let key = (member.workspace_id, member.user_id);
        if table.by_workspace_user.contains_key(&key) {
            return Err(DomainError::AlreadyMember);
        }
        table.by_workspace_user.insert(key, member.id);
        table.by_workspace.insert(member.workspace_id, member.id);
        table.by_user.insert(member.user_id, member.id);
        table.rows.insert(member.id, member.clone());
        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut table = self.table.write();
        let existing = table
            .rows
            .get_mut(&member.id)
            .ok_or(DomainError::MemberNotFound)?;
        existing.role = member.role;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: MemberId) -> RepoResult<bool> {
        let mut table = self.table.write();
        let Some(member) = table.rows.remove(&id) else {
            return Ok(false);
        };
        table
            .by_workspace_user
            .remove(&(member.workspace_id, member.user_id));
        table.by_workspace.remove(&member.workspace_id, &id);
        table.by_user.remove(&member.user_id, &id);
        Ok(true)
    }
}
