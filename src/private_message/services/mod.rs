//! Application services for private messages.

mod associations;
mod lifecycle;

pub use associations::ParticipantResolver;
pub use lifecycle::{
    DeletionOutcome, PrivateMessageService, PrivateMessageServiceError,
    PrivateMessageServiceResult, SendMessageRequest,
};
