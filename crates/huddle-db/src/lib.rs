//! # huddle-db
//!
//! Entity store backends implementing the repository traits from `huddle-core`.
//!
//! - [`memory`]: process-local tables with explicit secondary indexes,
//!   including the unique `(workspace_id, user_id)` member index
//! - [`repositories`]: PostgreSQL via SQLx, with models and mappers
//!
//! Both are bundled behind [`Repositories`], which the service layer consumes.
//!
//! ```rust,ignore
//! use huddle_db::{create_pool, run_migrations, Repositories};
//!
//! let repos = Repositories::in_memory();
//! // or
//! let pool = create_pool(&config).await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::postgres(pool);
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

mod bundle;

// Re-export commonly used types
pub use bundle::Repositories;
pub use memory::{
    MemoryChannelRepository, MemoryConversationRepository, MemoryHealth,
    MemoryMemberRepository, MemoryMessageRepository, MemoryReactionRepository,
    MemoryUserRepository, MemoryWorkspaceRepository,
};
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgChannelRepository, PgConversationRepository, PgHealth, PgMemberRepository,
    PgMessageRepository, PgReactionRepository, PgUserRepository, PgWorkspaceRepository,
};
