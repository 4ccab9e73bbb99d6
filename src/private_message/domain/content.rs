//! Subject and body of a private message.

use super::MessageDomainError;
use serde::{Deserialize, Serialize};

/// Maximum subject length in characters, matching the storage column.
pub const MAX_SUBJECT_LENGTH: usize = 255;

/// Validated subject and body of a private message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    subject: String,
    body: String,
}

impl MessageContent {
    /// Creates validated message content.
    ///
    /// The subject is trimmed. The body is kept verbatim but must contain
    /// something other than whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptySubject`] or
    /// [`MessageDomainError::EmptyBody`] for blank input and
    /// [`MessageDomainError::SubjectTooLong`] when the trimmed subject exceeds
    /// [`MAX_SUBJECT_LENGTH`] characters.
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, MessageDomainError> {
        let raw_subject = subject.into();
        let trimmed = raw_subject.trim();
        if trimmed.is_empty() {
            return Err(MessageDomainError::EmptySubject);
        }
        let length = trimmed.chars().count();
        if length > MAX_SUBJECT_LENGTH {
            return Err(MessageDomainError::SubjectTooLong {
                max: MAX_SUBJECT_LENGTH,
                length,
            });
        }

        let body_text = body.into();
        if body_text.trim().is_empty() {
            return Err(MessageDomainError::EmptyBody);
        }

        Ok(Self {
            subject: trimmed.to_owned(),
            body: body_text,
        })
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the message body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}
