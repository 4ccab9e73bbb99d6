//! Unit tests for the private message module.
