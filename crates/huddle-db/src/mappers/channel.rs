//! Channel and conversation entity <-> model mappers

use huddle_core::entities::{Channel, Conversation};
use huddle_core::value_objects::{ChannelId, ConversationId, MemberId, WorkspaceId};

use crate::models::{ChannelModel, ConversationModel};

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: ChannelId::new(model.id),
            workspace_id: WorkspaceId::new(model.workspace_id),
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: ConversationId::new(model.id),
            workspace_id: WorkspaceId::new(model.workspace_id),
            member_one_id: MemberId::new(model.member_one_id),
            member_two_id: MemberId::new(model.member_two_id),
            created_at: model.created_at,
        }
    }
}
