//! In-memory entity store
//!
//! Each repository owns its rows plus the secondary indexes its lookups
//! need, all behind one `parking_lot::RwLock`. Index maintenance happens
//! under the same write lock as the row change, so a lookup never sees a
//! row without its index entries or the reverse. No lock is ever held
//! across an `.await`.

mod channels;
mod conversations;
mod index;
mod members;
mod messages;
mod reactions;
mod users;
mod workspaces;

use async_trait::async_trait;
use huddle_core::traits::{RepoResult, StoreHealth};

pub use channels::MemoryChannelRepository;
pub use conversations::MemoryConversationRepository;
pub use members::MemoryMemberRepository;
pub use messages::MemoryMessageRepository;
pub use reactions::MemoryReactionRepository;
pub use users::MemoryUserRepository;
pub use workspaces::MemoryWorkspaceRepository;

/// The in-memory store is always ready
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryHealth;

#[async_trait]
impl StoreHealth for MemoryHealth {
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
