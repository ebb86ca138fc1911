//! Starter deck for `--memory` mode

use flashcard_adapter::InMemoryRecordStore;
use flashcard_domain::StoreError;

const DECK: &[(&str, &[(&str, &str)])] = &[
    (
        "Math",
        &[("2 + 2", "4"), ("7 x 8", "56"), ("Square root of 81", "9")],
    ),
    (
        "Geography",
        &[
            ("Capital of France", "Paris"),
            ("Capital of Japan", "Tokyo"),
            ("Longest river in Africa", "Nile"),
        ],
    ),
    (
        "Rust",
        &[
            ("Keyword for an immutable binding", "let"),
            ("Macro that formats to a String", "format!"),
        ],
    ),
];

/// Build an in-memory store holding the starter deck
pub fn seeded_store() -> Result<InMemoryRecordStore, StoreError> {
    let store = InMemoryRecordStore::new();
    for (name, cards) in DECK {
        let category = store.seed_category(*name)?;
        for (question, answer) in cards.iter() {
            store.seed_card(question, answer, category.id())?;
        }
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcard_domain::{AttemptStore, CardStore, CategoryStore};

    #[tokio::test]
    async fn test_seeded_store() {
        let store = seeded_store().unwrap();

        let categories = store.select_categories().await.unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].name(), "Math");

        let cards = store.select_cards().await.unwrap();
        assert_eq!(cards.len(), 8);
        let math = store.select_cards_in(categories[0].id()).await.unwrap();
        assert_eq!(math.len(), 3);

        assert!(store.select_attempts().await.unwrap().is_empty());
    }
}
