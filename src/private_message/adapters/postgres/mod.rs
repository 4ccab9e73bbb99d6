//! `PostgreSQL` adapters for private message persistence.

mod filter;
mod models;
mod repository;
mod schema;

pub use repository::{PostgresPrivateMessageRepository, PrivateMessagePgPool};
