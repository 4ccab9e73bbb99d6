//! Error types for private message domain validation.

use thiserror::Error;

/// Errors returned while constructing private message domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The subject is empty after trimming.
    #[error("message subject must not be empty")]
    EmptySubject,

    /// The subject exceeds the storage limit.
    #[error("message subject exceeds {max} character limit: {length}")]
    SubjectTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Actual length in characters.
        length: usize,
    },

    /// The body is empty after trimming.
    #[error("message body must not be empty")]
    EmptyBody,
}
