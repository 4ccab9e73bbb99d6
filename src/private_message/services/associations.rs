//! Sender and recipient associations of a private message.

use crate::private_message::{
    domain::{Participant, PrivateMessage},
    ports::{ParticipantDirectory, ParticipantDirectoryResult},
};
use std::marker::PhantomData;
use std::sync::Arc;

/// Loads the users a message refers to.
///
/// A message only stores identifiers. A user removed from the directory
/// resolves to `None` and the message is unaffected.
pub struct ParticipantResolver<U, D>
where
    U: Participant,
    D: ParticipantDirectory<U>,
{
    directory: Arc<D>,
    user: PhantomData<fn() -> U>,
}

impl<U, D> ParticipantResolver<U, D>
where
    U: Participant,
    D: ParticipantDirectory<U>,
{
    /// Creates a resolver backed by `directory`.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            user: PhantomData,
        }
    }

    /// Loads the sender of `message`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::private_message::ports::ParticipantDirectoryError`]
    /// when the directory lookup fails.
    pub async fn sender(
        &self,
        message: &PrivateMessage<U::Id>,
    ) -> ParticipantDirectoryResult<Option<U>> {
        self.directory.find_participant(message.sender_id()).await
    }

    /// Loads the recipient of `message`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::private_message::ports::ParticipantDirectoryError`]
    /// when the directory lookup fails.
    pub async fn recipient(
        &self,
        message: &PrivateMessage<U::Id>,
    ) -> ParticipantDirectoryResult<Option<U>> {
        self.directory.find_participant(message.recipient_id()).await
    }
}

impl<U, D> Clone for ParticipantResolver<U, D>
where
    U: Participant,
    D: ParticipantDirectory<U>,
{
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.directory))
    }
}
