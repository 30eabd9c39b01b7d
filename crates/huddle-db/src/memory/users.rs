//! In-memory UserRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::instrument;

use huddle_core::entities::User;
use huddle_core::traits::{RepoResult, UserRepository};
use huddle_core::value_objects::UserId;

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    rows: RwLock<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        let rows = self.rows.read();
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn upsert(&self, user: &User) -> RepoResult<()> {
        let mut rows = self.rows.write();
        match rows.get_mut(&user.id) {
            Some(existing) => {
                existing.name.clone_from(&user.name);
                existing.email.clone_from(&user.email);
                existing.image.clone_from(&user.image);
            }
            None => {
                rows.insert(user.id, user.clone());
            }
        }
        Ok(())
    }
}
