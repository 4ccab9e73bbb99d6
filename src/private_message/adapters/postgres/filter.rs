//! Translation of [`MessageQuery`] values into Diesel filters.

use super::schema::private_messages;
use crate::private_message::domain::{MessageQuery, ParticipantId, ReadFilter};
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

/// Owned, `'static` form of a [`MessageQuery`] that can cross into a
/// blocking task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PgMessageFilter {
    participant: Option<Uuid>,
    sender: Option<Uuid>,
    recipient: Option<Uuid>,
    hide_sender_deleted: bool,
    hide_recipient_deleted: bool,
    read_filter: ReadFilter,
}

impl PgMessageFilter {
    pub(super) fn from_query<P>(query: &MessageQuery<P>) -> Self
    where
        P: ParticipantId + Into<Uuid>,
    {
        Self {
            participant: query.participant().map(Into::into),
            sender: query.sender().map(Into::into),
            recipient: query.recipient().map(Into::into),
            hide_sender_deleted: query.hides_sender_deleted(),
            hide_recipient_deleted: query.hides_recipient_deleted(),
            read_filter: query.read_filter(),
        }
    }

    pub(super) fn boxed(self) -> private_messages::BoxedQuery<'static, Pg> {
        let mut statement = private_messages::table.into_boxed();
        if let Some(user) = self.participant {
            statement = statement.filter(
                private_messages::sender_id
                    .eq(user)
                    .or(private_messages::recipient_id.eq(user)),
            );
        }
        if let Some(user) = self.sender {
            statement = statement.filter(private_messages::sender_id.eq(user));
        }
        if let Some(user) = self.recipient {
            statement = statement.filter(private_messages::recipient_id.eq(user));
        }
        if self.hide_sender_deleted {
            statement = statement.filter(private_messages::sender_deleted.eq(false));
        }
        if self.hide_recipient_deleted {
            statement = statement.filter(private_messages::recipient_deleted.eq(false));
        }
        match self.read_filter {
            ReadFilter::Any => statement,
            ReadFilter::AlreadyRead => statement.filter(private_messages::read_at.is_not_null()),
            ReadFilter::Unread => statement.filter(private_messages::read_at.is_null()),
        }
    }
}
