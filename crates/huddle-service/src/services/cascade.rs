//! Cascading deletes
//!
//! Children are fetched through their secondary indexes, deleted one row at
//! a time, and the root goes last. There is no transaction: the first failed
//! delete aborts the cascade and earlier deletions stay in place. Store
//! deletes are idempotent, so a cascade racing another cascade over the same
//! rows simply counts fewer rows. Removing a message removes its whole reply
//! tree, deepest replies first.

use std::collections::HashSet;

use huddle_core::{ChannelId, ConversationId, Member, Message, MessageId, WorkspaceId};
use serde::Serialize;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use crate::live::Collection;

/// Rows removed by one cascade
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub members: usize,
    pub channels: usize,
    pub conversations: usize,
    pub messages: usize,
    pub reactions: usize,
    /// Whether this call removed the root row itself
    pub root_deleted: bool,
}

impl CascadeReport {
    /// Total child rows removed
    pub fn children(&self) -> usize {
        self.members + self.channels + self.conversations + self.messages + self.reactions
    }
}

/// Cascade orchestrator bound to one service context
pub struct CascadeDelete<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CascadeDelete<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Remove a workspace and every row carrying its id
    #[instrument(skip(self))]
    pub async fn workspace(&self, workspace_id: WorkspaceId) -> ServiceResult<CascadeReport> {
        let (members, channels, conversations, messages, reactions) = tokio::try_join!(
            self.ctx.member_repo().find_by_workspace(workspace_id),
            self.ctx.channel_repo().find_by_workspace(workspace_id),
            self.ctx.conversation_repo().find_by_workspace(workspace_id),
            self.ctx.message_repo().find_by_workspace(workspace_id),
            self.ctx.reaction_repo().find_by_workspace(workspace_id),
        )?;

        let mut report = CascadeReport::default();
        for member in &members {
            report.members += usize::from(self.ctx.member_repo().delete(member.id).await?);
        }
        for channel in &channels {
            report.channels += usize::from(self.ctx.channel_repo().delete(channel.id).await?);
        }
        for conversation in &conversations {
            report.conversations +=
                usize::from(self.ctx.conversation_repo().delete(conversation.id).await?);
        }
        for message in &messages {
            report.messages += usize::from(self.ctx.message_repo().delete(message.id).await?);
        }
        for reaction in &reactions {
            report.reactions += usize::from(self.ctx.reaction_repo().delete(reaction.id).await?);
        }
        report.root_deleted = self.ctx.workspace_repo().delete(workspace_id).await?;

        for collection in [
            Collection::Members,
            Collection::Channels,
            Collection::Conversations,
            Collection::Messages,
            Collection::Reactions,
            Collection::Workspaces,
        ] {
            self.ctx.publish(collection, workspace_id);
        }

        info!(
            workspace_id = %workspace_id,
            members = report.members,
            channels = report.channels,
            conversations = report.conversations,
            messages = report.messages,
            reactions = report.reactions,
            root_deleted = report.root_deleted,
            "Workspace cascade finished"
        );
        Ok(report)
    }

    /// Remove a channel, its messages and their reactions
    #[instrument(skip(self))]
    pub async fn channel(
        &self,
        workspace_id: WorkspaceId,
        channel_id: ChannelId,
    ) -> ServiceResult<CascadeReport> {
        let messages = self.ctx.message_repo().find_by_channel(channel_id).await?;

        let mut report = CascadeReport::default();
        self.delete_messages(&messages, &mut report).await?;
        report.root_deleted = self.ctx.channel_repo().delete(channel_id).await?;

        for collection in [Collection::Channels, Collection::Messages, Collection::Reactions] {
            self.ctx.publish(collection, workspace_id);
        }
        info!(
            channel_id = %channel_id,
            messages = report.messages,
            reactions = report.reactions,
            "Channel cascade finished"
        );
        Ok(report)
    }

    /// Remove a conversation, its messages and their reactions
    #[instrument(skip(self))]
    pub async fn conversation(
        &self,
        workspace_id: WorkspaceId,
        conversation_id: ConversationId,
    ) -> ServiceResult<CascadeReport> {
        let messages = self
            .ctx
            .message_repo()
            .find_by_conversation(conversation_id)
            .await?;

        let mut report = CascadeReport::default();
        self.delete_messages(&messages, &mut report).await?;
        report.root_deleted = self.ctx.conversation_repo().delete(conversation_id).await?;

        for collection in [Collection::Conversations, Collection::Messages, Collection::Reactions] {
            self.ctx.publish(collection, workspace_id);
        }
        info!(
            conversation_id = %conversation_id,
            messages = report.messages,
            reactions = report.reactions,
            "Conversation cascade finished"
        );
        Ok(report)
    }

    /// Remove a message, its replies, and the reactions on all of them
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn message(&self, message: &Message) -> ServiceResult<CascadeReport> {
        let replies = self.replies_of(message.id).await?;

        let mut report = CascadeReport::default();
        self.delete_rows(&replies, &mut report).await?;
        report.reactions += self.delete_reactions_of(message.id).await?;
        report.root_deleted = self.ctx.message_repo().delete(message.id).await?;

        self.ctx.publish(Collection::Messages, message.workspace_id);
        self.ctx.publish(Collection::Reactions, message.workspace_id);
        info!(
            message_id = %message.id,
            replies = report.messages,
            reactions = report.reactions,
            "Message cascade finished"
        );
        Ok(report)
    }

    /// Remove a member together with everything only they account for:
    /// authored messages and their reactions, reactions they placed, and
    /// conversations they are part of
    #[instrument(skip(self, member), fields(member_id = %member.id))]
    pub async fn member(&self, member: &Member) -> ServiceResult<CascadeReport> {
        let (authored, placed, conversations) = tokio::try_join!(
            self.ctx.message_repo().find_by_author(member.id),
            self.ctx.reaction_repo().find_by_member(member.id),
            self.ctx.conversation_repo().find_by_member(member.id),
        )?;

        let mut report = CascadeReport::default();
        for conversation in &conversations {
            let removed = self
                .conversation(member.workspace_id, conversation.id)
                .await?;
            report.messages += removed.messages;
            report.reactions += removed.reactions;
            report.conversations += usize::from(removed.root_deleted);
        }
        self.delete_messages(&authored, &mut report).await?;
        for reaction in &placed {
            report.reactions += usize::from(self.ctx.reaction_repo().delete(reaction.id).await?);
        }
        report.root_deleted = self.ctx.member_repo().delete(member.id).await?;

        for collection in [
            Collection::Members,
            Collection::Conversations,
            Collection::Messages,
            Collection::Reactions,
        ] {
            self.ctx.publish(collection, member.workspace_id);
        }
        info!(
            member_id = %member.id,
            workspace_id = %member.workspace_id,
            conversations = report.conversations,
            messages = report.messages,
            reactions = report.reactions,
            "Member cascade finished"
        );
        Ok(report)
    }

    async fn delete_messages(
        &self,
        messages: &[Message],
        report: &mut CascadeReport,
    ) -> ServiceResult<()> {
        for message in messages {
            let replies = self.replies_of(message.id).await?;
            self.delete_rows(&replies, report).await?;
            self.delete_rows(std::slice::from_ref(message), report).await?;
        }
        Ok(())
    }

    /// Every reply below `root`, parents before their replies
    async fn replies_of(&self, root: MessageId) -> ServiceResult<Vec<Message>> {
        let mut seen = HashSet::from([root]);
        let mut pending = vec![root];
        let mut replies = Vec::new();
        while let Some(parent) = pending.pop() {
            for reply in self.ctx.message_repo().find_by_parent(parent).await? {
                if seen.insert(reply.id) {
                    pending.push(reply.id);
                    replies.push(reply);
                }
            }
        }
        Ok(replies)
    }

    /// Delete messages and their reactions, last row first
    async fn delete_rows(
        &self,
        messages: &[Message],
        report: &mut CascadeReport,
    ) -> ServiceResult<()> {
        for message in messages.iter().rev() {
            report.reactions += self.delete_reactions_of(message.id).await?;
            report.messages += usize::from(self.ctx.message_repo().delete(message.id).await?);
        }
        Ok(())
    }

    async fn delete_reactions_of(&self, message_id: MessageId) -> ServiceResult<usize> {
        let reactions = self.ctx.reaction_repo().find_by_message(message_id).await?;
        let mut deleted = 0;
        for reaction in &reactions {
            deleted += usize::from(self.ctx.reaction_repo().delete(reaction.id).await?);
        }
        Ok(deleted)
    }
}
