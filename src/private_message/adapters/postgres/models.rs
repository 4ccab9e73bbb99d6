//! Diesel row models for private message persistence.

use super::schema::private_messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for private message records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = private_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PrivateMessageRow {
    /// Internal message identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Sender identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub sender_id: uuid::Uuid,
    /// Recipient identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub recipient_id: uuid::Uuid,
    /// Subject line.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub subject: String,
    /// Message body.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub body: String,
    /// Read timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub read_at: Option<DateTime<Utc>>,
    /// Sender deletion flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub sender_deleted: bool,
    /// Recipient deletion flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub recipient_deleted: bool,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for private message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = private_messages)]
pub struct NewPrivateMessageRow {
    /// Internal message identifier.
    pub id: uuid::Uuid,
    /// Sender identifier.
    pub sender_id: uuid::Uuid,
    /// Recipient identifier.
    pub recipient_id: uuid::Uuid,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Read timestamp.
    pub read_at: Option<DateTime<Utc>>,
    /// Sender deletion flag.
    pub sender_deleted: bool,
    /// Recipient deletion flag.
    pub recipient_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a message is saved after a lifecycle change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = private_messages)]
#[diesel(treat_none_as_null = true)]
pub struct PrivateMessageChangeset {
    /// Read timestamp.
    pub read_at: Option<DateTime<Utc>>,
    /// Sender deletion flag.
    pub sender_deleted: bool,
    /// Recipient deletion flag.
    pub recipient_deleted: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a message is flagged as deleted.
///
/// A `None` flag is left out of the `SET` clause, so a flag raised in
/// storage is never lowered and `read_at` is never written.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = private_messages)]
pub struct DeletionFlagsChangeset {
    /// Raised sender deletion flag.
    pub sender_deleted: Option<bool>,
    /// Raised recipient deletion flag.
    pub recipient_deleted: Option<bool>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
