//! Card Store - Abstract persistence for Cards
//!
//! This trait defines what operations the domain needs.
//! How they're implemented (HTTP, memory) is not our concern here.

use super::StoreError;
use crate::model::card::{Card, CardId, CardUpdate, NewCard};
use crate::model::category::CategoryId;

/// Card Store Trait
///
/// Payloads arrive already validated (`NewCard`, `CardUpdate`), so an
/// implementation only reports what the backend itself rejects.
pub trait CardStore {
    /// Fetch every card
    fn select_cards(
        &self,
    ) -> impl core::future::Future<Output = Result<Vec<Card>, StoreError>> + Send;

    /// Fetch the cards of one category
    fn select_cards_in(
        &self,
        category: &CategoryId,
    ) -> impl core::future::Future<Output = Result<Vec<Card>, StoreError>> + Send;

    /// Insert a card and return the stored row, including its new id
    fn insert_card(
        &self,
        card: &NewCard,
    ) -> impl core::future::Future<Output = Result<Card, StoreError>> + Send;

    /// Replace question and answer of an existing card
    ///
    /// Fails with `StoreError::NotFound` if the id is unknown.
    fn update_card(
        &self,
        id: &CardId,
        update: &CardUpdate,
    ) -> impl core::future::Future<Output = Result<Card, StoreError>> + Send;

    /// Delete a card
    ///
    /// Fails with `StoreError::NotFound` if the id is unknown. Either way the
    /// id is absent once this resolves.
    fn delete_card(
        &self,
        id: &CardId,
    ) -> impl core::future::Future<Output = Result<(), StoreError>> + Send;
}
