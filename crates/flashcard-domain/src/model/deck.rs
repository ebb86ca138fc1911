//! Deck - The ordered cards of one practice session
//!
//! A Deck is an immutable snapshot. Adding, removing or re-filtering cards
//! always builds a new Deck; nothing splices the old one in place. Cloning
//! is cheap because the cards sit behind an `Arc`.

use std::sync::Arc;

use super::card::{Card, CardId};
use super::category::CategoryId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Arc<[Card]>,
}

impl Deck {
    pub fn new(cards: impl Into<Vec<Card>>) -> Self {
        Self {
            cards: Arc::from(cards.into()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Build a deck from all known cards, optionally narrowed to one category
    pub fn filtered(cards: &[Card], category: Option<&CategoryId>) -> Self {
        Self::new(filter_by_category(cards, category))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::empty()
    }
}

/// All cards when `category` is `None`, otherwise only the cards in it.
///
/// Keeps the input order.
pub fn filter_by_category(cards: &[Card], category: Option<&CategoryId>) -> Vec<Card> {
    match category {
        None => cards.to_vec(),
        Some(category) => cards
            .iter()
            .filter(|c| c.in_category(category))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, category: &str) -> Card {
        Card::new(CardId::new(id), format!("q-{}", id), "a", CategoryId::new(category))
    }

    #[test]
    fn test_filter_without_category_returns_all() {
        let cards = vec![card("1", "math"), card("2", "geo"), card("3", "math")];
        assert_eq!(filter_by_category(&cards, None), cards);
    }

    #[test]
    fn test_filter_by_category_keeps_order() {
        let cards = vec![card("1", "math"), card("2", "geo"), card("3", "math")];
        let math = filter_by_category(&cards, Some(&CategoryId::new("math")));

        let ids: Vec<&str> = math.iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        let cards = vec![card("1", "math")];
        assert!(filter_by_category(&cards, Some(&CategoryId::new("art"))).is_empty());
    }

    #[test]
    fn test_deck_snapshot_is_independent() {
        let mut cards = vec![card("1", "math"), card("2", "math")];
        let deck = Deck::filtered(&cards, None);

        cards.remove(0);

        assert_eq!(deck.len(), 2);
        assert!(deck.contains(&CardId::new("1")));
        assert_eq!(deck.clone(), deck);
    }
}
