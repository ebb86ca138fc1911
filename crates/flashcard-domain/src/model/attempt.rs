//! Attempt - One answer submission
//!
//! Attempts are append-only. They are never updated or deleted, and they
//! outlive the card they refer to so the history stays auditable.

use super::card::CardId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    card_id: CardId,
    is_correct: bool,
    /// RFC 3339 timestamp, assigned by the store on insert
    recorded_at: Option<String>,
}

impl Attempt {
    /// A fresh attempt, not yet persisted
    pub fn new(card_id: CardId, is_correct: bool) -> Self {
        Self {
            card_id,
            is_correct,
            recorded_at: None,
        }
    }

    /// An attempt as read back from a store
    pub fn recorded(card_id: CardId, is_correct: bool, recorded_at: impl Into<String>) -> Self {
        Self {
            card_id,
            is_correct,
            recorded_at: Some(recorded_at.into()),
        }
    }

    pub fn card_id(&self) -> &CardId {
        &self.card_id
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    pub fn recorded_at(&self) -> Option<&str> {
        self.recorded_at.as_deref()
    }
}
