//! The user side of a private message.
//!
//! Messages never own their participants. They hold only identifiers, so the
//! host application chooses its own user type by implementing [`Participant`]
//! and naming its identifier type as the message's type parameter.

use std::fmt;
use std::hash::Hash;

/// Identifier of a message participant.
///
/// Implemented for every small, comparable, thread-safe value type.
pub trait ParticipantId:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

impl<T> ParticipantId for T where
    T: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
}

/// A user that can send and receive private messages.
///
/// Two participants are the same user exactly when their identifiers are
/// equal.
pub trait Participant: Send + Sync + 'static {
    /// Identifier stored in the message's `sender_id` and `recipient_id`.
    type Id: ParticipantId;

    /// Returns the participant identifier.
    fn participant_id(&self) -> Self::Id;
}
