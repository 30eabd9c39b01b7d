//! Channel entity - a named topic room within a workspace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ChannelId, WorkspaceId};

/// Collapse every whitespace run into one hyphen and lowercase the result.
///
/// Leading and trailing whitespace produce no hyphens.
pub fn normalize_channel_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Create a channel; the name is normalized on the way in
    pub fn new(id: ChannelId, workspace_id: WorkspaceId, name: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            workspace_id,
            name: normalize_channel_name(name),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: &str) {
        self.name = normalize_channel_name(name);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace_runs() {
        assert_eq!(normalize_channel_name("Team  Updates"), "team-updates");
        assert_eq!(normalize_channel_name("  Team   Updates  "), "team-updates");
        assert_eq!(normalize_channel_name("a\tb\nc"), "a-b-c");
    }

    #[test]
    fn test_normalize_keeps_existing_hyphens() {
        assert_eq!(normalize_channel_name("new-chan"), "new-chan");
        assert_eq!(normalize_channel_name("General"), "general");
    }

    #[test]
    fn test_rename_normalizes() {
        let mut channel = Channel::new(ChannelId::new(1), WorkspaceId::new(2), "General");
        assert_eq!(channel.name, "general");
        channel.rename("Release  Notes");
        assert_eq!(channel.name, "release-notes");
    }
}
