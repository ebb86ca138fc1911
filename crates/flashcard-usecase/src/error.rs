//! Error types for the study use cases

use flashcard_domain::{CardError, SessionError, StoreError};
use thiserror::Error;

/// Everything a use case can report back to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    /// A required field was empty; nothing was sent to the store
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{collection} record not found: {id}")]
    NotFound { collection: String, id: String },

    /// Remote I/O failed; the same call may be retried
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("No active card: the deck is empty")]
    NoActiveCard,
}

impl StudyError {
    /// Only transient store failures are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, StudyError::StoreUnavailable(_))
    }
}

impl From<StoreError> for StudyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => StudyError::NotFound { collection, id },
            StoreError::Validation { message } => StudyError::Validation(message),
            StoreError::Unavailable { message } => StudyError::StoreUnavailable(message),
        }
    }
}

impl From<CardError> for StudyError {
    fn from(err: CardError) -> Self {
        StudyError::Validation(err.to_string())
    }
}

impl From<SessionError> for StudyError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoActiveCard => StudyError::NoActiveCard,
        }
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;
