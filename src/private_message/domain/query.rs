//! Composable filters over stored private messages.
//!
//! A [`MessageQuery`] is an inert value. Repositories evaluate it, either in
//! memory through [`MessageQuery::matches`] or by compiling it to SQL.

use super::{AccountId, ParticipantId, PrivateMessage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named read-state filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadFilter {
    /// Matches every message.
    #[default]
    Any,
    /// Matches messages whose `read_at` is present.
    AlreadyRead,
    /// Matches messages whose `read_at` is absent.
    Unread,
}

impl ReadFilter {
    /// Returns the filter name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::AlreadyRead => "already_read",
            Self::Unread => "unread",
        }
    }

    /// Returns `true` when a message with the given read state passes.
    #[must_use]
    pub const fn accepts(self, is_read: bool) -> bool {
        match self {
            Self::Any => true,
            Self::AlreadyRead => is_read,
            Self::Unread => !is_read,
        }
    }
}

impl fmt::Display for ReadFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunction of predicates over private messages.
///
/// An empty query matches every stored message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQuery<P = AccountId> {
    participant: Option<P>,
    sender: Option<P>,
    recipient: Option<P>,
    hide_sender_deleted: bool,
    hide_recipient_deleted: bool,
    read_filter: ReadFilter,
}

impl<P: ParticipantId> MessageQuery<P> {
    /// Creates a query that matches every message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            participant: None,
            sender: None,
            recipient: None,
            hide_sender_deleted: false,
            hide_recipient_deleted: false,
            read_filter: ReadFilter::Any,
        }
    }

    /// Restricts to messages `user` sent or received.
    #[must_use]
    pub fn involving(mut self, user: P) -> Self {
        self.participant = Some(user);
        self
    }

    /// Restricts to messages `user` sent.
    #[must_use]
    pub fn sent_by(mut self, user: P) -> Self {
        self.sender = Some(user);
        self
    }

    /// Restricts to messages `user` received.
    #[must_use]
    pub fn received_by(mut self, user: P) -> Self {
        self.recipient = Some(user);
        self
    }

    /// Excludes messages the sender has deleted.
    #[must_use]
    pub const fn hide_sender_deleted(mut self) -> Self {
        self.hide_sender_deleted = true;
        self
    }

    /// Excludes messages the recipient has deleted.
    #[must_use]
    pub const fn hide_recipient_deleted(mut self) -> Self {
        self.hide_recipient_deleted = true;
        self
    }

    /// Restricts to messages the recipient has read.
    #[must_use]
    pub const fn already_read(self) -> Self {
        self.with_read_filter(ReadFilter::AlreadyRead)
    }

    /// Restricts to messages the recipient has not read yet.
    #[must_use]
    pub const fn unread(self) -> Self {
        self.with_read_filter(ReadFilter::Unread)
    }

    /// Replaces the read-state filter.
    #[must_use]
    pub const fn with_read_filter(mut self, filter: ReadFilter) -> Self {
        self.read_filter = filter;
        self
    }

    /// Returns the participant restriction.
    #[must_use]
    pub const fn participant(&self) -> Option<P> {
        self.participant
    }

    /// Returns the sender restriction.
    #[must_use]
    pub const fn sender(&self) -> Option<P> {
        self.sender
    }

    /// Returns the recipient restriction.
    #[must_use]
    pub const fn recipient(&self) -> Option<P> {
        self.recipient
    }

    /// Returns whether sender-deleted messages are excluded.
    #[must_use]
    pub const fn hides_sender_deleted(&self) -> bool {
        self.hide_sender_deleted
    }

    /// Returns whether recipient-deleted messages are excluded.
    #[must_use]
    pub const fn hides_recipient_deleted(&self) -> bool {
        self.hide_recipient_deleted
    }

    /// Returns the read-state filter.
    #[must_use]
    pub const fn read_filter(&self) -> ReadFilter {
        self.read_filter
    }

    /// Evaluates the query against a single message.
    #[must_use]
    pub fn matches(&self, message: &PrivateMessage<P>) -> bool {
        self.participant.is_none_or(|user| message.involves(user))
            && self.sender.is_none_or(|user| message.is_sender(user))
            && self.recipient.is_none_or(|user| message.is_recipient(user))
            && !(self.hide_sender_deleted && message.sender_deleted())
            && !(self.hide_recipient_deleted && message.recipient_deleted())
            && self.read_filter.accepts(message.is_read())
    }
}

impl<P: ParticipantId> Default for MessageQuery<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the `already_read` filter to `query`.
#[must_use]
pub const fn filter_read<P: ParticipantId>(query: MessageQuery<P>) -> MessageQuery<P> {
    query.already_read()
}

/// Applies the `unread` filter to `query`.
#[must_use]
pub const fn filter_unread<P: ParticipantId>(query: MessageQuery<P>) -> MessageQuery<P> {
    query.unread()
}
