//! Live queries
//!
//! Every successful mutation publishes a [`ChangeEvent`] on the
//! [`ChangeFeed`]. A [`LiveQuery`] re-runs its read whenever an event touches
//! one of the collections it depends on, and hands the newest value out
//! through a `watch` channel.

use std::future::Future;

use huddle_core::WorkspaceId;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::services::ServiceResult;

/// Collections a read can depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Workspaces,
    Members,
    Channels,
    Conversations,
    Messages,
    Reactions,
}

/// A committed change to one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    /// Workspace the changed rows belong to; `None` for user records
    pub workspace_id: Option<WorkspaceId>,
}

impl ChangeEvent {
    /// Whether a query scoped to `scope` over `collections` must recompute
    pub fn touches(&self, scope: Option<WorkspaceId>, collections: &[Collection]) -> bool {
        if !collections.contains(&self.collection) {
            return false;
        }
        match (self.workspace_id, scope) {
            (Some(changed), Some(scope)) => changed == scope,
            _ => true,
        }
    }
}

/// In-process broadcast of change events
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: ChangeEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// A read kept up to date by the change feed
///
/// Dropping the handle ends the subscription.
pub struct LiveQuery<T> {
    receiver: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> LiveQuery<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Run `compute` once, then again after every relevant change
    ///
    /// # Errors
    /// Returns the error of the initial computation. Later failures are
    /// logged and the previous value is kept.
    pub async fn spawn<F, Fut>(
        feed: &ChangeFeed,
        scope: Option<WorkspaceId>,
        collections: &[Collection],
        compute: F,
    ) -> ServiceResult<Self>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ServiceResult<T>> + Send + 'static,
    {
        // Subscribe first so nothing committed during the initial read is missed
        let mut events = feed.subscribe();
        let initial = compute().await?;
        let (sender, receiver) = watch::channel(initial);
        let collections = collections.to_vec();

        let task = tokio::spawn(async move {
            loop {
                let relevant = match events.recv().await {
                    Ok(event) => event.touches(scope, &collections),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Live query lagged behind the change feed");
                        true
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if !relevant {
                    continue;
                }
                match compute().await {
                    Ok(value) => {
                        if sender.send(value).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "Live query recompute failed"),
                }
            }
        });

        Ok(Self { receiver, task })
    }

    /// The most recently computed value
    pub fn current(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Wait for the next recomputed value; `false` once the query has ended
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Another receiver of the same value stream
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.receiver.clone()
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<T> std::fmt::Debug for LiveQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveQuery").finish_non_exhaustive()
    }
}
