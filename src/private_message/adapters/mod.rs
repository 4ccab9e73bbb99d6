//! Persistence adapters for the private message module.
//!
//! - [`memory::InMemoryPrivateMessageRepository`] and
//!   [`memory::InMemoryParticipantDirectory`]: thread-safe in-memory storage
//!   for tests and embedding
//! - [`postgres::PostgresPrivateMessageRepository`]: `PostgreSQL` persistence
//!   using Diesel ORM

pub mod memory;
pub mod postgres;
