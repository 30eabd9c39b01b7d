//! One handle per collection, as trait objects

use std::sync::Arc;

use huddle_core::traits::{
    ChannelRepository, ConversationRepository, MemberRepository, MessageRepository,
    ReactionRepository, StoreHealth, UserRepository, WorkspaceRepository,
};

use crate::memory::{
    MemoryChannelRepository, MemoryConversationRepository, MemoryHealth, MemoryMemberRepository,
    MemoryMessageRepository, MemoryReactionRepository, MemoryUserRepository,
    MemoryWorkspaceRepository,
};
use crate::pool::PgPool;
use crate::repositories::{
    PgChannelRepository, PgConversationRepository, PgHealth, PgMemberRepository,
    PgMessageRepository, PgReactionRepository, PgUserRepository, PgWorkspaceRepository,
};

/// Every repository the services need, backed by a single store
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub workspaces: Arc<dyn WorkspaceRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub channels: Arc<dyn ChannelRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub health: Arc<dyn StoreHealth>,
}

impl Repositories {
    /// Fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::default()),
            workspaces: Arc::new(MemoryWorkspaceRepository::default()),
            members: Arc::new(MemoryMemberRepository::default()),
            channels: Arc::new(MemoryChannelRepository::default()),
            conversations: Arc::new(MemoryConversationRepository::default()),
            messages: Arc::new(MemoryMessageRepository::default()),
            reactions: Arc::new(MemoryReactionRepository::default()),
            health: Arc::new(MemoryHealth),
        }
    }

    /// PostgreSQL store sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            workspaces: Arc::new(PgWorkspaceRepository::new(pool.clone())),
            members: Arc::new(PgMemberRepository::new(pool.clone())),
            channels: Arc::new(PgChannelRepository::new(pool.clone())),
            conversations: Arc::new(PgConversationRepository::new(pool.clone())),
            messages: Arc::new(PgMessageRepository::new(pool.clone())),
            reactions: Arc::new(PgReactionRepository::new(pool.clone())),
            health: Arc::new(PgHealth::new(pool)),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
