//! Statistics - Per-card correct/wrong counts
//!
//! Always recomputed by folding over the full attempt history; never kept
//! as a running total. A card with no attempts has no entry, and lookups
//! treat a missing entry as zero counts.

use std::collections::HashMap;

use super::attempt::Attempt;
use super::card::CardId;

/// Counts for one card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardStats {
    pub correct_count: u32,
    pub wrong_count: u32,
}

impl CardStats {
    pub fn new(correct_count: u32, wrong_count: u32) -> Self {
        Self {
            correct_count,
            wrong_count,
        }
    }

    pub fn total(&self) -> u32 {
        self.correct_count + self.wrong_count
    }

    /// Share of correct answers in `0.0..=1.0`, `None` without attempts
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(f64::from(self.correct_count) / f64::from(total)),
        }
    }

    fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct_count += 1;
        } else {
            self.wrong_count += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    by_card: HashMap<CardId, CardStats>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an attempt history into per-card counts
    pub fn from_attempts<'a>(attempts: impl IntoIterator<Item = &'a Attempt>) -> Self {
        let mut by_card: HashMap<CardId, CardStats> = HashMap::new();
        for attempt in attempts {
            by_card
                .entry(attempt.card_id().clone())
                .or_default()
                .record(attempt.is_correct());
        }
        Self { by_card }
    }

    /// Counts for `card`, zero when it has never been attempted
    pub fn get(&self, card: &CardId) -> CardStats {
        self.by_card.get(card).copied().unwrap_or_default()
    }

    pub fn contains(&self, card: &CardId) -> bool {
        self.by_card.contains_key(card)
    }

    pub fn len(&self) -> usize {
        self.by_card.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_card.is_empty()
    }

    /// Drop entries for cards that fail `keep`
    ///
    /// Only narrows this view. The attempts themselves are untouched.
    pub fn retain_cards<F>(&mut self, mut keep: F)
    where
        F: FnMut(&CardId) -> bool,
    {
        self.by_card.retain(|id, _| keep(id));
    }

    /// Sum over every card
    pub fn totals(&self) -> CardStats {
        self.by_card
            .values()
            .fold(CardStats::default(), |acc, s| {
                CardStats::new(
                    acc.correct_count + s.correct_count,
                    acc.wrong_count + s.wrong_count,
                )
            })
    }
}
