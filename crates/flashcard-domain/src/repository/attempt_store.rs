//! Attempt Store - Append-only access to `card_attempts`

use super::StoreError;
use crate::model::attempt::Attempt;

/// Attempts are append-only and may outlive the card they refer to.
pub trait AttemptStore {
    /// Fetch the whole attempt history
    fn select_attempts(
        &self,
    ) -> impl core::future::Future<Output = Result<Vec<Attempt>, StoreError>> + Send;

    /// Append one attempt and return it with its store timestamp
    fn insert_attempt(
        &self,
        attempt: &Attempt,
    ) -> impl core::future::Future<Output = Result<Attempt, StoreError>> + Send;
}
