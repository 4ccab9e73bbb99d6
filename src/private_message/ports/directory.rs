//! Lookup port resolving participant identifiers to host user records.

use crate::private_message::domain::Participant;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for participant directory operations.
pub type ParticipantDirectoryResult<T> = Result<T, ParticipantDirectoryError>;

/// Source of user records referenced by private messages.
#[async_trait]
pub trait ParticipantDirectory<U: Participant>: Send + Sync {
    /// Finds the user with the given identifier.
    ///
    /// Returns `None` when the user no longer exists. Messages keep their
    /// identifiers after a user is removed.
    async fn find_participant(&self, id: U::Id) -> ParticipantDirectoryResult<Option<U>>;
}

/// Errors returned by participant directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ParticipantDirectoryError {
    /// Lookup failure in the backing store.
    #[error("participant lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl ParticipantDirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
