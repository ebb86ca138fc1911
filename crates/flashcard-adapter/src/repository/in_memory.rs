//! In-Memory Record Store
//!
//! Simple in-memory implementation of all three store traits.
//! Useful for testing, demos and the `--memory` mode of the CLI.
//!
//! Rows keep insertion order. `set_available(false)` makes every call fail
//! with `StoreError::Unavailable`, which is how outages are rehearsed.

use std::future::{ready, Future};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use flashcard_domain::{
    Attempt, AttemptStore, Card, CardId, CardStore, CardUpdate, Category, CategoryId,
    CategoryStore, NewCard, StoreError,
};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    cards: Vec<Card>,
    attempts: Vec<Attempt>,
}

/// In-memory record store
///
/// Thread-safe implementation using RwLock. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<Tables>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a simulated outage
    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        !self.offline.load(Ordering::SeqCst)
    }

    /// Create a category directly; categories have no insert path otherwise
    pub fn seed_category(&self, name: impl Into<String>) -> Result<Category, StoreError> {
        self.write(|t| {
            let category = Category::new(CategoryId::new(new_id()), name);
            t.categories.push(category.clone());
            category
        })
    }

    /// Create a card without going through the async trait
    pub fn seed_card(
        &self,
        question: &str,
        answer: &str,
        category: &CategoryId,
    ) -> Result<Card, StoreError> {
        let new_card = NewCard::new(question, answer, category.clone()).map_err(|e| {
            StoreError::Validation {
                message: e.to_string(),
            }
        })?;
        self.write(|t| insert_card(t, &new_card))
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, StoreError> {
        self.ensure_available()?;
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::unavailable("Failed to acquire read lock"))?;
        Ok(f(&*tables))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> Result<T, StoreError> {
        self.ensure_available()?;
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::unavailable("Failed to acquire write lock"))?;
        Ok(f(&mut *tables))
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(StoreError::unavailable("in-memory store is offline"))
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn insert_card(tables: &mut Tables, new_card: &NewCard) -> Card {
    let card = new_card.clone().into_card(CardId::new(new_id()));
    tables.cards.push(card.clone());
    card
}

impl CategoryStore for InMemoryRecordStore {
    fn select_categories(&self) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send {
        ready(self.read(|t| t.categories.clone()))
    }
}

impl CardStore for InMemoryRecordStore {
    fn select_cards(&self) -> impl Future<Output = Result<Vec<Card>, StoreError>> + Send {
        ready(self.read(|t| t.cards.clone()))
    }

    fn select_cards_in(
        &self,
        category: &CategoryId,
    ) -> impl Future<Output = Result<Vec<Card>, StoreError>> + Send {
        ready(self.read(|t| {
            t.cards
                .iter()
                .filter(|c| c.in_category(category))
                .cloned()
                .collect()
        }))
    }

    fn insert_card(&self, card: &NewCard) -> impl Future<Output = Result<Card, StoreError>> + Send {
        ready(self.write(|t| insert_card(t, card)))
    }

    fn update_card(
        &self,
        id: &CardId,
        update: &CardUpdate,
    ) -> impl Future<Output = Result<Card, StoreError>> + Send {
        let result = self
            .write(|t| {
                t.cards.iter_mut().find(|c| c.id() == id).map(|slot| {
                    *slot = slot.clone().with_update(update.clone());
                    slot.clone()
                })
            })
            .and_then(|found| found.ok_or_else(|| StoreError::not_found("cards", id.as_str())));
        ready(result)
    }

    fn delete_card(&self, id: &CardId) -> impl Future<Output = Result<(), StoreError>> + Send {
        let result = self
            .write(|t| {
                let before = t.cards.len();
                t.cards.retain(|c| c.id() != id);
                t.cards.len() < before
            })
            .and_then(|removed| {
                if removed {
                    Ok(())
                } else {
                    Err(StoreError::not_found("cards", id.as_str()))
                }
            });
        ready(result)
    }
}

impl AttemptStore for InMemoryRecordStore {
    fn select_attempts(&self) -> impl Future<Output = Result<Vec<Attempt>, StoreError>> + Send {
        ready(self.read(|t| t.attempts.clone()))
    }

    fn insert_attempt(
        &self,
        attempt: &Attempt,
    ) -> impl Future<Output = Result<Attempt, StoreError>> + Send {
        ready(self.write(|t| {
            let stored = Attempt::recorded(
                attempt.card_id().clone(),
                attempt.is_correct(),
                chrono::Utc::now().to_rfc3339(),
            );
            t.attempts.push(stored.clone());
            stored
        }))
    }
}
