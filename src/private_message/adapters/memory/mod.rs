//! In-memory adapter implementations.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing without database dependencies.

mod directory;
mod repository;

pub use directory::InMemoryParticipantDirectory;
pub use repository::InMemoryPrivateMessageRepository;
