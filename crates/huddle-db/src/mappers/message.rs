//! Message and reaction entity <-> model mappers

use huddle_core::entities::{Message, MessageTarget, Reaction};
use huddle_core::error::DomainError;
use huddle_core::value_objects::{
    ChannelId, ConversationId, MemberId, MessageId, ReactionId, WorkspaceId,
};

use crate::models::{MessageModel, ReactionModel};

impl TryFrom<MessageModel> for Message {
    type Error = DomainError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let target = match (model.channel_id, model.conversation_id) {
            (Some(channel), None) => MessageTarget::Channel(ChannelId::new(channel)),
            (None, Some(conversation)) => {
                MessageTarget::Conversation(ConversationId::new(conversation))
            }
            _ => {
                return Err(DomainError::DatabaseError(format!(
                    "message {} has no single context",
                    model.id
                )))
            }
        };

        Ok(Message {
            id: MessageId::new(model.id),
            workspace_id: WorkspaceId::new(model.workspace_id),
            author_member_id: MemberId::new(model.author_member_id),
            body: model.body,
            image: model.image,
            target,
            parent_message_id: model.parent_message_id.map(MessageId::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: ReactionId::new(model.id),
            workspace_id: WorkspaceId::new(model.workspace_id),
            message_id: MessageId::new(model.message_id),
            member_id: MemberId::new(model.member_id),
            value: model.value,
            created_at: model.created_at,
        }
    }
}
