//! Courier: private messages between users of a host application.
//!
//! This crate turns a stored record into a private message exchanged by two
//! participants. It tracks when the recipient first reads the message and
//! lets sender and recipient delete it independently; the message is
//! removed from storage once both have done so.
//!
//! # Architecture
//!
//! Courier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`private_message`]: Message lifecycle, mailboxes, and persistence

pub mod private_message;
