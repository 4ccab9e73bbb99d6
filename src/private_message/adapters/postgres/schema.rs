//! Diesel schema for private message persistence.

diesel::table! {
    /// Private messages exchanged between two participants.
    private_messages (id) {
        /// Internal message identifier.
        id -> Uuid,
        /// Identifier of the sending participant.
        sender_id -> Uuid,
        /// Identifier of the receiving participant.
        recipient_id -> Uuid,
        /// Subject line.
        #[max_length = 255]
        subject -> Varchar,
        /// Message body.
        body -> Text,
        /// When the recipient first read the message.
        read_at -> Nullable<Timestamptz>,
        /// Whether the sender has deleted the message.
        sender_deleted -> Bool,
        /// Whether the recipient has deleted the message.
        recipient_deleted -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
