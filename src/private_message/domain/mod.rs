//! Domain model for private messages.
//!
//! The domain captures the read-receipt and two-sided deletion rules of a
//! private message. Messages are generic over the identifier type of the
//! participating users, defaulting to [`AccountId`]. All infrastructure
//! concerns are kept outside the domain boundary.

mod account;
mod content;
mod error;
mod ids;
mod message;
mod participant;
mod query;

pub use account::{Account, AccountId};
pub use content::{MAX_SUBJECT_LENGTH, MessageContent};
pub use error::MessageDomainError;
pub use ids::MessageId;
pub use message::{PersistedPrivateMessageData, PrivateMessage};
pub use participant::{Participant, ParticipantId};
pub use query::{MessageQuery, ReadFilter, filter_read, filter_unread};
