//! Private messages exchanged between two participants.
//!
//! A private message references a sender and a recipient, tracks when the
//! recipient first read it, and is soft-deleted independently by each side.
//! Once both sides have deleted a message it is removed from storage. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
