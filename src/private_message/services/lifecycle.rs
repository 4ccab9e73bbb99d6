//! Service layer for the private message lifecycle.
//!
//! Provides [`PrivateMessageService`], which sends messages, records read
//! receipts, applies two-sided deletion, and lists mailboxes.

use crate::private_message::{
    domain::{
        MessageContent, MessageDomainError, MessageId, MessageQuery, Participant, ParticipantId,
        PrivateMessage, ReadFilter,
    },
    ports::{PrivateMessageRepository, PrivateMessageRepositoryError},
};
use mockable::Clock;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for sending a private message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest<P> {
    sender_id: P,
    recipient_id: P,
    subject: String,
    body: String,
}

impl<P: ParticipantId> SendMessageRequest<P> {
    /// Creates a request from the two participants and the message text.
    #[must_use]
    pub fn new(
        sender: &impl Participant<Id = P>,
        recipient: &impl Participant<Id = P>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender_id: sender.participant_id(),
            recipient_id: recipient.participant_id(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Result of [`PrivateMessageService::mark_deleted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome<P> {
    /// At least one side still keeps the message; its flags were saved.
    Retained(PrivateMessage<P>),
    /// Both sides deleted the message and it was removed from storage.
    Destroyed(MessageId),
}

/// Service-level errors for private message operations.
#[derive(Debug, Error)]
pub enum PrivateMessageServiceError {
    /// The message does not exist or the caller is not one of its
    /// participants. The two cases are reported identically.
    #[error("message not found: {0}")]
    NotFound(MessageId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MessageDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PrivateMessageRepositoryError),
}

/// Result type for private message service operations.
pub type PrivateMessageServiceResult<T> = Result<T, PrivateMessageServiceError>;

/// Private message lifecycle orchestration service.
#[derive(Clone)]
pub struct PrivateMessageService<P, R, C>
where
    P: ParticipantId,
    R: PrivateMessageRepository<P>,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    participant: PhantomData<fn() -> P>,
}

impl<P, R, C> PrivateMessageService<P, R, C>
where
    P: ParticipantId,
    R: PrivateMessageRepository<P>,
    C: Clock + Send + Sync,
{
    /// Creates a new private message service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            participant: PhantomData,
        }
    }

    /// Sends a new, unread message.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageServiceError::Domain`] when the subject or body
    /// is invalid, or [`PrivateMessageServiceError::Repository`] when the
    /// repository rejects persistence.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, request),
        fields(sender_id = %request.sender_id, recipient_id = %request.recipient_id)
    )]
    pub async fn send(
        &self,
        request: SendMessageRequest<P>,
    ) -> PrivateMessageServiceResult<PrivateMessage<P>> {
        let SendMessageRequest {
            sender_id,
            recipient_id,
            subject,
            body,
        } = request;

        let content = MessageContent::new(subject, body)?;
        let message = PrivateMessage::new(sender_id, recipient_id, content, &*self.clock);
        self.repository.insert(&message).await?;
        tracing::debug!(message_id = %message.id(), "Private message stored");
        Ok(message)
    }

    /// Returns a message to one of its participants, recording the read when
    /// the reader is the recipient.
    ///
    /// Only the first read by the recipient sets `read_at`; reads by the
    /// sender never do.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageServiceError::NotFound`] when the message does
    /// not exist or `reader` is neither its sender nor its recipient, or
    /// [`PrivateMessageServiceError::Repository`] when lookup or saving the
    /// read timestamp fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, reader),
        fields(message_id = %id, reader_id = %reader.participant_id())
    )]
    pub async fn read_message(
        &self,
        id: MessageId,
        reader: &impl Participant<Id = P>,
    ) -> PrivateMessageServiceResult<PrivateMessage<P>> {
        let reader_id = reader.participant_id();
        let mut message = self.find_for_participant(id, reader_id).await?;
        if message.mark_read_by(reader_id, &*self.clock) {
            self.repository.update(&message).await?;
            tracing::debug!("Private message marked read");
        }
        Ok(message)
    }

    /// Flags `message` as deleted on each side `user` occupies.
    ///
    /// Only the deletion flags of `message` are written, so a copy loaded
    /// before a later read keeps the stored `read_at`. When the stored
    /// message ends up deleted by both sides it is removed from storage.
    /// Otherwise the flags are saved, even when `user` is not a participant
    /// and nothing changed, and the stored message is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageServiceError::Repository`] when saving or
    /// removing the message fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, message, user),
        fields(message_id = %message.id(), user_id = %user.participant_id())
    )]
    pub async fn mark_deleted(
        &self,
        mut message: PrivateMessage<P>,
        user: &impl Participant<Id = P>,
    ) -> PrivateMessageServiceResult<DeletionOutcome<P>> {
        let user_id = user.participant_id();
        if !message.mark_deleted_by(user_id, &*self.clock) {
            tracing::debug!(
                participant = message.involves(user_id),
                "Deletion flags unchanged"
            );
        }

        let id = message.id();
        let stored = if message.is_deleted_by_both() {
            message
        } else {
            self.repository.update_deletion_flags(&message).await?
        };

        if stored.is_deleted_by_both() {
            self.repository.delete(id).await?;
            tracing::debug!("Private message destroyed");
            return Ok(DeletionOutcome::Destroyed(id));
        }

        tracing::debug!(
            sender_deleted = stored.sender_deleted(),
            recipient_deleted = stored.recipient_deleted(),
            "Private message deletion flags saved"
        );
        Ok(DeletionOutcome::Retained(stored))
    }

    /// Locates a message the way [`Self::read_message`] does, without
    /// recording a read, and then applies [`Self::mark_deleted`].
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageServiceError::NotFound`] when the message does
    /// not exist or `user` is not a participant, or
    /// [`PrivateMessageServiceError::Repository`] when persistence fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, user),
        fields(message_id = %id, user_id = %user.participant_id())
    )]
    pub async fn mark_deleted_by_id(
        &self,
        id: MessageId,
        user: &impl Participant<Id = P>,
    ) -> PrivateMessageServiceResult<DeletionOutcome<P>> {
        let message = self.find_for_participant(id, user.participant_id()).await?;
        self.mark_deleted(message, user).await
    }

    /// Lists messages received by `user` that the user has not deleted,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageServiceError::Repository`] when persistence
    /// lookup fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, user),
        fields(user_id = %user.participant_id(), filter = %filter)
    )]
    pub async fn inbox(
        &self,
        user: &impl Participant<Id = P>,
        filter: ReadFilter,
    ) -> PrivateMessageServiceResult<Vec<PrivateMessage<P>>> {
        let query = Self::inbox_query(user.participant_id()).with_read_filter(filter);
        Ok(self.repository.list(&query).await?)
    }

    /// Lists messages sent by `user` that the user has not deleted, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageServiceError::Repository`] when persistence
    /// lookup fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, user),
        fields(user_id = %user.participant_id(), filter = %filter)
    )]
    pub async fn sent(
        &self,
        user: &impl Participant<Id = P>,
        filter: ReadFilter,
    ) -> PrivateMessageServiceResult<Vec<PrivateMessage<P>>> {
        let query = MessageQuery::new()
            .sent_by(user.participant_id())
            .hide_sender_deleted()
            .with_read_filter(filter);
        Ok(self.repository.list(&query).await?)
    }

    /// Counts unread messages in `user`'s inbox.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageServiceError::Repository`] when persistence
    /// lookup fails.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, user),
        fields(user_id = %user.participant_id())
    )]
    pub async fn unread_count(
        &self,
        user: &impl Participant<Id = P>,
    ) -> PrivateMessageServiceResult<u64> {
        let query = Self::inbox_query(user.participant_id()).unread();
        Ok(self.repository.count(&query).await?)
    }

    /// Returns `true` when `user` has at least one unread message.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn has_unread(
        &self,
        user: &impl Participant<Id = P>,
    ) -> PrivateMessageServiceResult<bool> {
        Ok(self.unread_count(user).await? > 0)
    }

    fn inbox_query(user_id: P) -> MessageQuery<P> {
        MessageQuery::new()
            .received_by(user_id)
            .hide_recipient_deleted()
    }

    async fn find_for_participant(
        &self,
        id: MessageId,
        user_id: P,
    ) -> PrivateMessageServiceResult<PrivateMessage<P>> {
        let query = MessageQuery::new().involving(user_id);
        self.repository
            .find_matching(id, &query)
            .await?
            .ok_or(PrivateMessageServiceError::NotFound(id))
    }
}
