//! Service context - dependency container for services
//!
//! Holds the repositories of one Entity Store, the id generator, and the
//! change feed that live queries listen on.

use std::sync::Arc;

use huddle_core::traits::{
    ChannelRepository, ConversationRepository, MemberRepository, MessageRepository,
    ReactionRepository, StoreHealth, UserRepository, WorkspaceRepository,
};
use huddle_core::{Snowflake, SnowflakeGenerator, WorkspaceId};
use huddle_db::Repositories;

use super::error::{ServiceError, ServiceResult};
use crate::live::{ChangeEvent, ChangeFeed, Collection};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    repositories: Repositories,
    snowflake_generator: Arc<SnowflakeGenerator>,
    feed: ChangeFeed,
}

impl ServiceContext {
    pub fn new(
        repositories: Repositories,
        snowflake_generator: Arc<SnowflakeGenerator>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            repositories,
            snowflake_generator,
            feed,
        }
    }

    /// Context over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(
            Repositories::in_memory(),
            Arc::new(SnowflakeGenerator::default()),
            ChangeFeed::default(),
        )
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.repositories.users.as_ref()
    }

    pub fn workspace_repo(&self) -> &dyn WorkspaceRepository {
        self.repositories.workspaces.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.repositories.members.as_ref()
    }

    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.repositories.channels.as_ref()
    }

    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.repositories.conversations.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.repositories.messages.as_ref()
    }

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.repositories.reactions.as_ref()
    }

    pub fn store_health(&self) -> &dyn StoreHealth {
        self.repositories.health.as_ref()
    }

    // === Ids ===

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    // === Change feed ===

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Announce a committed change to live queries
    pub fn publish(&self, collection: Collection, workspace_id: impl Into<Option<WorkspaceId>>) {
        self.feed.publish(ChangeEvent {
            collection,
            workspace_id: workspace_id.into(),
        });
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &self.repositories)
            .field("snowflake_generator", &self.snowflake_generator)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    repositories: Option<Repositories>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    feed: Option<ChangeFeed>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(mut self, repositories: Repositories) -> Self {
        self.repositories = Some(repositories);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn feed(mut self, feed: ChangeFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the repositories are missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let repositories = self
            .repositories
            .ok_or_else(|| ServiceError::validation("repositories are required"))?;
        Ok(ServiceContext::new(
            repositories,
            self.snowflake_generator.unwrap_or_default(),
            self.feed.unwrap_or_default(),
        ))
    }
}
