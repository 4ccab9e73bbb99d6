//! Private message aggregate root.

use super::{AccountId, MessageContent, MessageId, ParticipantId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Private message aggregate root.
///
/// `read_at` is set at most once, and only by the recipient. Each side
/// deletes the message independently; a message flagged by both sides is
/// expected to be removed from storage rather than kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessage<P = AccountId> {
    id: MessageId,
    sender_id: P,
    recipient_id: P,
    content: MessageContent,
    read_at: Option<DateTime<Utc>>,
    sender_deleted: bool,
    recipient_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted private message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPrivateMessageData<P> {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Persisted sender identifier.
    pub sender_id: P,
    /// Persisted recipient identifier.
    pub recipient_id: P,
    /// Persisted subject and body.
    pub content: MessageContent,
    /// Persisted read timestamp, if the recipient has read the message.
    pub read_at: Option<DateTime<Utc>>,
    /// Persisted sender deletion flag.
    pub sender_deleted: bool,
    /// Persisted recipient deletion flag.
    pub recipient_deleted: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl<P: ParticipantId> PrivateMessage<P> {
    /// Creates a new unread message that neither side has deleted.
    #[must_use]
    pub fn new(sender_id: P, recipient_id: P, content: MessageContent, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: MessageId::new(),
            sender_id,
            recipient_id,
            content,
            read_at: None,
            sender_deleted: false,
            recipient_deleted: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPrivateMessageData<P>) -> Self {
        Self {
            id: data.id,
            sender_id: data.sender_id,
            recipient_id: data.recipient_id,
            content: data.content,
            read_at: data.read_at,
            sender_deleted: data.sender_deleted,
            recipient_deleted: data.recipient_deleted,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sender identifier.
    #[must_use]
    pub const fn sender_id(&self) -> P {
        self.sender_id
    }

    /// Returns the recipient identifier.
    #[must_use]
    pub const fn recipient_id(&self) -> P {
        self.recipient_id
    }

    /// Returns the subject and body.
    #[must_use]
    pub const fn content(&self) -> &MessageContent {
        &self.content
    }

    /// Returns when the recipient first read the message.
    #[must_use]
    pub const fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    /// Returns `true` once the recipient has read the message.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Returns whether the sender has deleted the message.
    #[must_use]
    pub const fn sender_deleted(&self) -> bool {
        self.sender_deleted
    }

    /// Returns whether the recipient has deleted the message.
    #[must_use]
    pub const fn recipient_deleted(&self) -> bool {
        self.recipient_deleted
    }

    /// Returns `true` when both sides have deleted the message.
    #[must_use]
    pub const fn is_deleted_by_both(&self) -> bool {
        self.sender_deleted && self.recipient_deleted
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `user` sent the message.
    #[must_use]
    pub fn is_sender(&self, user: P) -> bool {
        self.sender_id == user
    }

    /// Returns `true` when `user` received the message.
    #[must_use]
    pub fn is_recipient(&self, user: P) -> bool {
        self.recipient_id == user
    }

    /// Returns `true` when `user` is the sender or the recipient.
    #[must_use]
    pub fn involves(&self, user: P) -> bool {
        self.is_sender(user) || self.is_recipient(user)
    }

    /// Records that `reader` has read the message.
    ///
    /// Only the first read by the recipient sets `read_at`. Reads by the
    /// sender and repeat reads leave the message untouched. Returns `true`
    /// when the message changed and must be saved.
    pub fn mark_read_by(&mut self, reader: P, clock: &impl Clock) -> bool {
        if self.is_read() || !self.is_recipient(reader) {
            return false;
        }
        let timestamp = clock.utc();
        self.read_at = Some(timestamp);
        self.updated_at = timestamp;
        true
    }

    /// Flags the message as deleted on each side `user` occupies.
    ///
    /// A user who both sent and received the message sets both flags.
    /// Non-participants change nothing. Returns `true` when a flag changed.
    pub fn mark_deleted_by(&mut self, user: P, clock: &impl Clock) -> bool {
        let mut changed = false;
        if self.is_sender(user) && !self.sender_deleted {
            self.sender_deleted = true;
            changed = true;
        }
        if self.is_recipient(user) && !self.recipient_deleted {
            self.recipient_deleted = true;
            changed = true;
        }
        if changed {
            self.updated_at = clock.utc();
        }
        changed
    }

    /// Carries over the deletion flags set on `other`, a copy of the same
    /// message.
    ///
    /// Flags are only ever raised, never cleared, and `read_at` is left as
    /// stored.
    pub fn absorb_deletion_flags(&mut self, other: &Self) {
        self.sender_deleted |= other.sender_deleted;
        self.recipient_deleted |= other.recipient_deleted;
        self.updated_at = other.updated_at;
    }
}
