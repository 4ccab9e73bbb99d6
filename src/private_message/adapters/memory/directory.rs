//! In-memory participant directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::private_message::{
    domain::Participant,
    ports::{ParticipantDirectory, ParticipantDirectoryError, ParticipantDirectoryResult},
};

/// Thread-safe in-memory map from participant identifiers to users.
pub struct InMemoryParticipantDirectory<U: Participant> {
    users: Arc<RwLock<HashMap<U::Id, U>>>,
}

impl<U: Participant + Clone> InMemoryParticipantDirectory<U> {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Adds or replaces a user.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantDirectoryError::Lookup`] when the state lock is
    /// poisoned.
    pub fn insert(&self, user: U) -> ParticipantDirectoryResult<()> {
        let mut users = self.users.write().map_err(|err| {
            ParticipantDirectoryError::lookup(std::io::Error::other(err.to_string()))
        })?;
        users.insert(user.participant_id(), user);
        Ok(())
    }

    /// Removes a user, leaving any messages that reference it in place.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantDirectoryError::Lookup`] when the state lock is
    /// poisoned.
    pub fn remove(&self, id: U::Id) -> ParticipantDirectoryResult<Option<U>> {
        let mut users = self.users.write().map_err(|err| {
            ParticipantDirectoryError::lookup(std::io::Error::other(err.to_string()))
        })?;
        Ok(users.remove(&id))
    }
}

impl<U: Participant + Clone> Default for InMemoryParticipantDirectory<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Participant> Clone for InMemoryParticipantDirectory<U> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl<U: Participant> fmt::Debug for InMemoryParticipantDirectory<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryParticipantDirectory")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<U: Participant + Clone> ParticipantDirectory<U> for InMemoryParticipantDirectory<U> {
    async fn find_participant(&self, id: U::Id) -> ParticipantDirectoryResult<Option<U>> {
        let users = self.users.read().map_err(|err| {
            ParticipantDirectoryError::lookup(std::io::Error::other(err.to_string()))
        })?;
        Ok(users.get(&id).cloned())
    }
}
