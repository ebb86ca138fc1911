//! Attempt Logger - Records answer attempts and aggregates them
//!
//! The logger is the only writer of attempt records. Statistics are never
//! cached: every read folds the whole history again, so attempts written by
//! other clients are always counted.

use flashcard_domain::{Attempt, AttemptStore, CardId, Statistics};
use tracing::{debug, warn};

use crate::error::Result;

pub struct AttemptLogger<S> {
    store: S,
}

impl<S> AttemptLogger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Pure fold over an attempt history
    ///
    /// Cards without attempts have no entry; read them as zero counts.
    pub fn compute_statistics(attempts: &[Attempt]) -> Statistics {
        Statistics::from_attempts(attempts)
    }
}

impl<S: AttemptStore> AttemptLogger<S> {
    /// Append one attempt
    pub async fn record_attempt(&self, card_id: &CardId, is_correct: bool) -> Result<Attempt> {
        let attempt = Attempt::new(card_id.clone(), is_correct);
        match self.store.insert_attempt(&attempt).await {
            Ok(stored) => {
                debug!(card_id = %card_id, is_correct, "attempt recorded");
                Ok(stored)
            }
            Err(e) => {
                warn!(card_id = %card_id, error = %e, "failed to record attempt");
                Err(e.into())
            }
        }
    }

    pub async fn load_attempts(&self) -> Result<Vec<Attempt>> {
        let attempts = self.store.select_attempts().await?;
        debug!(count = attempts.len(), "loaded attempts");
        Ok(attempts)
    }

    /// Load the full history and fold it
    pub async fn statistics(&self) -> Result<Statistics> {
        let attempts = self.load_attempts().await?;
        Ok(Self::compute_statistics(&attempts))
    }
}
