//! Port contracts for private message persistence and participant lookup.
//!
//! Ports define infrastructure-agnostic interfaces used by private message
//! services.

pub mod directory;
pub mod repository;

pub use directory::{ParticipantDirectory, ParticipantDirectoryError, ParticipantDirectoryResult};
pub use repository::{
    PrivateMessageRepository, PrivateMessageRepositoryError, PrivateMessageRepositoryResult,
};
