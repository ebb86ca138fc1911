//! Card Repository - Loading, filtering and editing cards
//!
//! Wraps an injected `CardStore`. Required-field validation happens here,
//! before any store call is issued.

use flashcard_domain::{
    filter_by_category, Card, CardId, CardStore, CardUpdate, Category, CategoryId, CategoryStore,
    NewCard,
};
use tracing::{debug, info, warn};

use crate::error::{Result, StudyError};

pub struct CardRepository<S> {
    store: S,
}

impl<S> CardRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All cards when `category` is `None`, else only that category's cards
    pub fn filter_by_category(cards: &[Card], category: Option<&CategoryId>) -> Vec<Card> {
        filter_by_category(cards, category)
    }
}

impl<S: CardStore> CardRepository<S> {
    /// Fetch every card
    pub async fn load_cards(&self) -> Result<Vec<Card>> {
        let cards = self.store.select_cards().await.map_err(|e| {
            warn!(error = %e, "failed to load cards");
            StudyError::from(e)
        })?;
        debug!(count = cards.len(), "loaded cards");
        Ok(cards)
    }

    /// Fetch one category's cards, letting the store do the filtering
    pub async fn load_cards_in(&self, category: &CategoryId) -> Result<Vec<Card>> {
        let cards = self.store.select_cards_in(category).await.map_err(|e| {
            warn!(error = %e, category = %category, "failed to load cards");
            StudyError::from(e)
        })?;
        debug!(count = cards.len(), category = %category, "loaded cards");
        Ok(cards)
    }

    pub async fn add_card(
        &self,
        question: &str,
        answer: &str,
        category_id: CategoryId,
    ) -> Result<Card> {
        let new_card = NewCard::new(question, answer, category_id)?;
        let card = self.store.insert_card(&new_card).await?;
        info!(card_id = %card.id(), category = %card.category_id(), "card added");
        Ok(card)
    }

    pub async fn update_card(&self, id: &CardId, question: &str, answer: &str) -> Result<Card> {
        let update = CardUpdate::new(question, answer)?;
        let card = self.store.update_card(id, &update).await?;
        info!(card_id = %id, "card updated");
        Ok(card)
    }

    /// Delete a card
    ///
    /// An unknown id yields `StudyError::NotFound`; the id is absent from
    /// the store afterwards in every non-`StoreUnavailable` outcome.
    pub async fn delete_card(&self, id: &CardId) -> Result<()> {
        match self.store.delete_card(id).await {
            Ok(()) => {
                info!(card_id = %id, "card deleted");
                Ok(())
            }
            Err(e) => {
                warn!(card_id = %id, error = %e, "card delete failed");
                Err(e.into())
            }
        }
    }
}

impl<S: CategoryStore> CardRepository<S> {
    pub async fn load_categories(&self) -> Result<Vec<Category>> {
        let categories = self.store.select_categories().await?;
        debug!(count = categories.len(), "loaded categories");
        Ok(categories)
    }
}
