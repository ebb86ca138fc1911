//! In-memory fake store for use case tests, with failure switches

use std::future::{ready, Future};
use std::sync::{Arc, Mutex};

use flashcard_domain::{
    Attempt, AttemptStore, Card, CardId, CardStore, CardUpdate, Category, CategoryId,
    CategoryStore, NewCard, StoreError,
};

#[derive(Debug, Default)]
struct FakeData {
    categories: Vec<Category>,
    cards: Vec<Card>,
    attempts: Vec<Attempt>,
    next_id: usize,
    card_writes: usize,
    cards_down: bool,
    attempts_down: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    data: Arc<Mutex<FakeData>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: &[(&str, &str, &str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut data = store.data.lock().unwrap();
            for (id, question, answer, category) in cards {
                data.cards.push(Card::new(
                    CardId::new(*id),
                    *question,
                    *answer,
                    CategoryId::new(*category),
                ));
            }
        }
        store
    }

    pub fn add_category(&self, id: &str, name: &str) {
        self.data
            .lock()
            .unwrap()
            .categories
            .push(Category::new(CategoryId::new(id), name));
    }

    pub fn add_attempt(&self, card: &str, is_correct: bool) {
        self.data
            .lock()
            .unwrap()
            .attempts
            .push(Attempt::new(CardId::new(card), is_correct));
    }

    pub fn set_cards_down(&self, down: bool) {
        self.data.lock().unwrap().cards_down = down;
    }

    pub fn set_attempts_down(&self, down: bool) {
        self.data.lock().unwrap().attempts_down = down;
    }

    pub fn attempts(&self) -> Vec<Attempt> {
        self.data.lock().unwrap().attempts.clone()
    }

    pub fn card_ids(&self) -> Vec<String> {
        self.data
            .lock()
            .unwrap()
            .cards
            .iter()
            .map(|c| c.id().as_str().to_string())
            .collect()
    }

    /// Number of insert/update/delete calls that reached the store
    pub fn card_writes(&self) -> usize {
        self.data.lock().unwrap().card_writes
    }

    fn with_cards_up<T>(
        &self,
        f: impl FnOnce(&mut FakeData) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut data = self.data.lock().unwrap();
        if data.cards_down {
            return Err(StoreError::unavailable("cards offline"));
        }
        f(&mut *data)
    }

    fn with_attempts_up<T>(
        &self,
        f: impl FnOnce(&mut FakeData) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut data = self.data.lock().unwrap();
        if data.attempts_down {
            return Err(StoreError::unavailable("attempts offline"));
        }
        f(&mut *data)
    }
}

impl CategoryStore for FakeStore {
    fn select_categories(&self) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send {
        ready(self.with_cards_up(|d| Ok(d.categories.clone())))
    }
}

impl CardStore for FakeStore {
    fn select_cards(&self) -> impl Future<Output = Result<Vec<Card>, StoreError>> + Send {
        ready(self.with_cards_up(|d| Ok(d.cards.clone())))
    }

    fn select_cards_in(
        &self,
        category: &CategoryId,
    ) -> impl Future<Output = Result<Vec<Card>, StoreError>> + Send {
        ready(self.with_cards_up(|d| {
            Ok(d.cards.iter().filter(|c| c.in_category(category)).cloned().collect())
        }))
    }

    fn insert_card(&self, card: &NewCard) -> impl Future<Output = Result<Card, StoreError>> + Send {
        ready(self.with_cards_up(|d| {
            d.card_writes += 1;
            d.next_id += 1;
            let stored = card.clone().into_card(CardId::new(format!("new-{}", d.next_id)));
            d.cards.push(stored.clone());
            Ok(stored)
        }))
    }

    fn update_card(
        &self,
        id: &CardId,
        update: &CardUpdate,
    ) -> impl Future<Output = Result<Card, StoreError>> + Send {
        ready(self.with_cards_up(|d| {
            d.card_writes += 1;
            let slot = d
                .cards
                .iter_mut()
                .find(|c| c.id() == id)
                .ok_or_else(|| StoreError::not_found("cards", id.as_str()))?;
            *slot = slot.clone().with_update(update.clone());
            Ok(slot.clone())
        }))
    }

    fn delete_card(&self, id: &CardId) -> impl Future<Output = Result<(), StoreError>> + Send {
        ready(self.with_cards_up(|d| {
            d.card_writes += 1;
            let before = d.cards.len();
            d.cards.retain(|c| c.id() != id);
            if d.cards.len() == before {
                Err(StoreError::not_found("cards", id.as_str()))
            } else {
                Ok(())
            }
        }))
    }
}

impl AttemptStore for FakeStore {
    fn select_attempts(&self) -> impl Future<Output = Result<Vec<Attempt>, StoreError>> + Send {
        ready(self.with_attempts_up(|d| Ok(d.attempts.clone())))
    }

    fn insert_attempt(
        &self,
        attempt: &Attempt,
    ) -> impl Future<Output = Result<Attempt, StoreError>> + Send {
        ready(self.with_attempts_up(|d| {
            let stored = Attempt::recorded(
                attempt.card_id().clone(),
                attempt.is_correct(),
                "2026-01-01T00:00:00+00:00",
            );
            d.attempts.push(stored.clone());
            Ok(stored)
        }))
    }
}
