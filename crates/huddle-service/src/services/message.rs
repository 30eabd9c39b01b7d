//! Message service
//!
//! Messages live in exactly one channel or conversation, optionally as a
//! thread reply. Any member can post to channels; conversations are limited
//! to their two participants. Only the author can edit or remove a message.

use futures::future::try_join_all;
use huddle_core::{
    DomainError, Member, Message, MessageId, MessageQuery, MessageTarget, Session, WorkspaceId,
};
use tracing::{info, instrument};

use crate::dto::{
    CreateMessageRequest, MemberWithUser, MessageListQuery, MessageResponse, MessageWithDetails,
    PaginatedResponse, UpdateMessageRequest,
};
use crate::live::Collection;

use super::access::AccessControl;
use super::cascade::CascadeDelete;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn access(&self) -> AccessControl<'a> {
        AccessControl::new(self.ctx)
    }

    async fn find(&self, message_id: MessageId) -> ServiceResult<Message> {
        self.ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| DomainError::MessageNotFound.into())
    }

    fn check_body(body: &str) -> ServiceResult<()> {
        if body.trim().is_empty() {
            return Err(ServiceError::validation("Message body cannot be empty"));
        }
        if body.chars().count() > Message::MAX_BODY_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: Message::MAX_BODY_LENGTH,
            }
            .into());
        }
        Ok(())
    }

    /// Where a new message goes. A reply without an explicit context
    /// inherits its parent's.
    async fn resolve_target(
        &self,
        author: &Member,
        request: &CreateMessageRequest,
    ) -> ServiceResult<(MessageTarget, Option<MessageId>)> {
        let parent = match request.parent_message_id {
            Some(parent_id) => Some(
                self.ctx
                    .message_repo()
                    .find_by_id(parent_id)
                    .await?
                    .filter(|p| p.workspace_id == author.workspace_id)
                    .ok_or(DomainError::MessageNotFound)?,
            ),
            None => None,
        };

        let target = match (request.channel_id, request.conversation_id, &parent) {
            (Some(channel_id), None, _) => MessageTarget::Channel(channel_id),
            (None, Some(conversation_id), _) => MessageTarget::Conversation(conversation_id),
            (None, None, Some(parent)) => parent.target,
            _ => return Err(DomainError::InvalidMessageTarget.into()),
        };
        if parent.as_ref().is_some_and(|p| p.target != target) {
            return Err(DomainError::InvalidMessageTarget.into());
        }

        if !self.access().can_use_target(author, target).await? {
            return Err(match target {
                MessageTarget::Channel(_) => DomainError::ChannelNotFound.into(),
                MessageTarget::Conversation(_) => ServiceError::unauthorized(),
            });
        }
        Ok((target, parent.map(|p| p.id)))
    }

    async fn populate(&self, message: Message) -> ServiceResult<Option<MessageWithDetails>> {
        let Some(member) = self
            .ctx
            .member_repo()
            .find_by_id(message.author_member_id)
            .await?
        else {
            return Ok(None);
        };
        let (user, reactions, (thread_count, last_reply_at)) = tokio::try_join!(
            self.ctx.user_repo().find_by_id(member.user_id),
            self.ctx.reaction_repo().find_by_message(message.id),
            self.ctx.message_repo().thread_stats(message.id),
        )?;
        Ok(Some(MessageWithDetails {
            message,
            author: MemberWithUser { member, user },
            reactions,
            thread_count,
            last_reply_at,
        }))
    }

    async fn populate_all(&self, messages: Vec<Message>) -> ServiceResult<Vec<MessageResponse>> {
        let populated = try_join_all(messages.into_iter().map(|m| self.populate(m))).await?;
        Ok(populated
            .iter()
            .flatten()
            .map(MessageResponse::from)
            .collect())
    }

    /// The page query for a read, or `None` if the caller may not see the context
    async fn readable_query(
        &self,
        session: &Session,
        query: &MessageListQuery,
    ) -> ServiceResult<Option<MessageQuery>> {
        if !session.is_authenticated() {
            return Ok(None);
        }

        let (workspace_id, target) = if let Some(parent_id) = query.parent_message_id {
            let Some(parent) = self.ctx.message_repo().find_by_id(parent_id).await? else {
                return Ok(None);
            };
            let conflicting = query.channel_id.is_some_and(|c| parent.channel_id() != Some(c))
                || query
                    .conversation_id
                    .is_some_and(|c| parent.conversation_id() != Some(c));
            if conflicting {
                return Ok(None);
            }
            (parent.workspace_id, parent.target)
        } else {
            match (query.channel_id, query.conversation_id) {
                (Some(channel_id), None) => {
                    let Some(channel) = self.ctx.channel_repo().find_by_id(channel_id).await?
                    else {
                        return Ok(None);
                    };
                    (channel.workspace_id, MessageTarget::Channel(channel_id))
                }
                (None, Some(conversation_id)) => {
                    let Some(conversation) = self
                        .ctx
                        .conversation_repo()
                        .find_by_id(conversation_id)
                        .await?
                    else {
                        return Ok(None);
                    };
                    (
                        conversation.workspace_id,
                        MessageTarget::Conversation(conversation_id),
                    )
                }
                _ => return Ok(None),
            }
        };

        let Some(viewer) = self.access().viewer(session, workspace_id).await? else {
            return Ok(None);
        };
        if !self.access().can_use_target(&viewer, target).await? {
            return Ok(None);
        }

        Ok(Some(MessageQuery {
            channel_id: target.channel_id(),
            conversation_id: target.conversation_id(),
            parent_message_id: query.parent_message_id,
            before: query.before,
            limit: Self::page_limit(query),
        }))
    }

    fn page_limit(query: &MessageListQuery) -> usize {
        query
            .limit
            .unwrap_or(MessageQuery::DEFAULT_LIMIT)
            .clamp(1, MessageQuery::MAX_LIMIT)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Post a message (member)
    #[instrument(skip(self, session, request))]
    pub async fn create(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageId> {
        let user_id = self.access().require_user(session)?;
        if self.ctx.workspace_repo().find_by_id(workspace_id).await?.is_none() {
            return Err(DomainError::WorkspaceNotFound.into());
        }
        let author = self.access().require_member(user_id, workspace_id).await?;
        Self::check_body(&request.body)?;

        let (target, parent) = self.resolve_target(&author, &request).await?;
        let message_id = MessageId::from(self.ctx.generate_id());
        let message = Message::new(message_id, workspace_id, author.id, request.body, target)
            .with_image(request.image)
            .in_reply_to(parent);
        self.ctx.message_repo().create(&message).await?;
        self.ctx.publish(Collection::Messages, workspace_id);

        info!(
            message_id = %message_id,
            workspace_id = %workspace_id,
            author_member_id = %author.id,
            reply = message.is_reply(),
            "Message created successfully"
        );
        Ok(message_id)
    }

    /// Edit a message body (author)
    #[instrument(skip(self, session, request))]
    pub async fn update(
        &self,
        session: &Session,
        message_id: MessageId,
        request: UpdateMessageRequest,
    ) -> ServiceResult<MessageId> {
        let user_id = self.access().require_user(session)?;
        let mut message = self.find(message_id).await?;
        let member = self
            .access()
            .require_member(user_id, message.workspace_id)
            .await?;
        if member.id != message.author_member_id {
            return Err(ServiceError::unauthorized());
        }
        Self::check_body(&request.body)?;

        message.edit(request.body);
        self.ctx.message_repo().update(&message).await?;
        self.ctx.publish(Collection::Messages, message.workspace_id);

        info!(message_id = %message_id, "Message updated successfully");
        Ok(message_id)
    }

    /// Remove a message and its reactions (author)
    #[instrument(skip(self, session))]
    pub async fn remove(&self, session: &Session, message_id: MessageId) -> ServiceResult<MessageId> {
        let user_id = self.access().require_user(session)?;
        let message = self.find(message_id).await?;
        let member = self
            .access()
            .require_member(user_id, message.workspace_id)
            .await?;
        if member.id != message.author_member_id {
            return Err(ServiceError::unauthorized());
        }

        CascadeDelete::new(self.ctx).message(&message).await?;

        info!(message_id = %message_id, "Message removed successfully");
        Ok(message_id)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Newest-first page of a channel, conversation, or thread
    #[instrument(skip(self, session))]
    pub async fn get(
        &self,
        session: &Session,
        query: MessageListQuery,
    ) -> ServiceResult<PaginatedResponse<MessageResponse>> {
        let limit = Self::page_limit(&query);
        let Some(mut page_query) = self.readable_query(session, &query).await? else {
            return Ok(PaginatedResponse::empty(limit));
        };

        // One extra row tells whether an older page exists
        page_query.limit = limit + 1;
        let mut messages = self.ctx.message_repo().find_page(&page_query).await?;
        let has_more = messages.len() > limit;
        messages.truncate(limit);
        let before = if has_more {
            messages.last().map(|m| m.id.to_string())
        } else {
            None
        };

        let data = self.populate_all(messages).await?;
        Ok(PaginatedResponse::new(data, before, has_more, limit))
    }

    /// A single populated message
    #[instrument(skip(self, session))]
    pub async fn get_by_id(
        &self,
        session: &Session,
        message_id: MessageId,
    ) -> ServiceResult<Option<MessageResponse>> {
        if !session.is_authenticated() {
            return Ok(None);
        }
        let Some(message) = self.ctx.message_repo().find_by_id(message_id).await? else {
            return Ok(None);
        };
        let Some(viewer) = self.access().viewer(session, message.workspace_id).await? else {
            return Ok(None);
        };
        if !self.access().can_use_target(&viewer, message.target).await? {
            return Ok(None);
        }
        let populated = self.populate(message).await?;
        Ok(populated.as_ref().map(MessageResponse::from))
    }
}
