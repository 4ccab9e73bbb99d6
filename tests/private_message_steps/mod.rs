//! Step definitions for private message lifecycle scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
