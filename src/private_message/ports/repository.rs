//! Repository port for private message persistence.

use crate::private_message::domain::{MessageId, MessageQuery, ParticipantId, PrivateMessage};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for private message repository operations.
pub type PrivateMessageRepositoryResult<T> = Result<T, PrivateMessageRepositoryError>;

/// Private message persistence contract.
///
/// Every write is a single-record operation. Implementations apply no
/// concurrency control, so the last write to a message wins.
#[async_trait]
pub trait PrivateMessageRepository<P: ParticipantId>: Send + Sync {
    /// Stores a new message.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageRepositoryError::DuplicateMessage`] when the
    /// message ID already exists.
    async fn insert(&self, message: &PrivateMessage<P>) -> PrivateMessageRepositoryResult<()>;

    /// Persists the mutable state of an existing message (read timestamp,
    /// deletion flags, change timestamp).
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageRepositoryError::NotFound`] when the message
    /// does not exist.
    async fn update(&self, message: &PrivateMessage<P>) -> PrivateMessageRepositoryResult<()>;

    /// Raises the deletion flags set on `message` and stores its change
    /// timestamp. The read timestamp and any flag already raised in storage
    /// are left untouched, so a copy loaded before a later read or deletion
    /// cannot undo it.
    ///
    /// Returns the message as stored after the write.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageRepositoryError::NotFound`] when the message
    /// does not exist.
    async fn update_deletion_flags(
        &self,
        message: &PrivateMessage<P>,
    ) -> PrivateMessageRepositoryResult<PrivateMessage<P>>;

    /// Permanently removes a message.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageRepositoryError::NotFound`] when the message
    /// does not exist.
    async fn delete(&self, id: MessageId) -> PrivateMessageRepositoryResult<()>;

    /// Finds the message with the given identifier, provided it also matches
    /// `query`.
    ///
    /// Returns `None` when no such message exists or when it fails the query.
    async fn find_matching(
        &self,
        id: MessageId,
        query: &MessageQuery<P>,
    ) -> PrivateMessageRepositoryResult<Option<PrivateMessage<P>>>;

    /// Returns every message matching `query`, newest first.
    async fn list(
        &self,
        query: &MessageQuery<P>,
    ) -> PrivateMessageRepositoryResult<Vec<PrivateMessage<P>>>;

    /// Counts messages matching `query`.
    async fn count(&self, query: &MessageQuery<P>) -> PrivateMessageRepositoryResult<u64>;
}

/// Errors returned by private message repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PrivateMessageRepositoryError {
    /// A message with the same identifier already exists.
    #[error("duplicate message identifier: {0}")]
    DuplicateMessage(MessageId),

    /// The message was not found.
    #[error("message not found: {0}")]
    NotFound(MessageId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PrivateMessageRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
