//! In-memory repository for private messages.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::private_message::{
    domain::{AccountId, MessageId, MessageQuery, ParticipantId, PrivateMessage},
    ports::{
        PrivateMessageRepository, PrivateMessageRepositoryError, PrivateMessageRepositoryResult,
    },
};

/// Thread-safe in-memory private message repository.
#[derive(Clone)]
pub struct InMemoryPrivateMessageRepository<P = AccountId> {
    state: Arc<RwLock<InMemoryMessageState<P>>>,
}

struct InMemoryMessageState<P> {
    messages: HashMap<MessageId, StoredMessage<P>>,
    next_sequence: u64,
}

struct StoredMessage<P> {
    sequence: u64,
    message: PrivateMessage<P>,
}

impl<P: ParticipantId> InMemoryPrivateMessageRepository<P> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryMessageState {
                messages: HashMap::new(),
                next_sequence: 0,
            })),
        }
    }

    /// Returns the number of stored messages.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageRepositoryError::Persistence`] when the state
    /// lock is poisoned.
    pub fn len(&self) -> PrivateMessageRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            PrivateMessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.messages.len())
    }

    /// Returns `true` when no messages are stored.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateMessageRepositoryError::Persistence`] when the state
    /// lock is poisoned.
    pub fn is_empty(&self) -> PrivateMessageRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<P: ParticipantId> Default for InMemoryPrivateMessageRepository<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for InMemoryPrivateMessageRepository<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryPrivateMessageRepository")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<P: ParticipantId> PrivateMessageRepository<P> for InMemoryPrivateMessageRepository<P> {
    async fn insert(&self, message: &PrivateMessage<P>) -> PrivateMessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PrivateMessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.messages.contains_key(&message.id()) {
            return Err(PrivateMessageRepositoryError::DuplicateMessage(message.id()));
        }

        let sequence = state.next_sequence;
        state.next_sequence = sequence.saturating_add(1);
        state.messages.insert(
            message.id(),
            StoredMessage {
                sequence,
                message: message.clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, message: &PrivateMessage<P>) -> PrivateMessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PrivateMessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let stored = state
            .messages
            .get_mut(&message.id())
            .ok_or(PrivateMessageRepositoryError::NotFound(message.id()))?;
        stored.message = message.clone();
        Ok(())
    }

    async fn update_deletion_flags(
        &self,
        message: &PrivateMessage<P>,
    ) -> PrivateMessageRepositoryResult<PrivateMessage<P>> {
        let mut state = self.state.write().map_err(|err| {
            PrivateMessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let stored = state
            .messages
            .get_mut(&message.id())
            .ok_or(PrivateMessageRepositoryError::NotFound(message.id()))?;
        stored.message.absorb_deletion_flags(message);
        Ok(stored.message.clone())
    }

    async fn delete(&self, id: MessageId) -> PrivateMessageRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PrivateMessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        state
            .messages
            .remove(&id)
            .map(|_| ())
            .ok_or(PrivateMessageRepositoryError::NotFound(id))
    }

    async fn find_matching(
        &self,
        id: MessageId,
        query: &MessageQuery<P>,
    ) -> PrivateMessageRepositoryResult<Option<PrivateMessage<P>>> {
        let state = self.state.read().map_err(|err| {
            PrivateMessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .messages
            .get(&id)
            .map(|stored| &stored.message)
            .filter(|message| query.matches(message))
            .cloned())
    }

    async fn list(
        &self,
        query: &MessageQuery<P>,
    ) -> PrivateMessageRepositoryResult<Vec<PrivateMessage<P>>> {
        let state = self.state.read().map_err(|err| {
            PrivateMessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matching: Vec<&StoredMessage<P>> = state
            .messages
            .values()
            .filter(|stored| query.matches(&stored.message))
            .collect();
        matching.sort_by_key(|stored| Reverse((stored.message.created_at(), stored.sequence)));
        Ok(matching
            .into_iter()
            .map(|stored| stored.message.clone())
            .collect())
    }

    async fn count(&self, query: &MessageQuery<P>) -> PrivateMessageRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            PrivateMessageRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let matching = state
            .messages
            .values()
            .filter(|stored| query.matches(&stored.message))
            .count();
        u64::try_from(matching).map_err(PrivateMessageRepositoryError::persistence)
    }
}
