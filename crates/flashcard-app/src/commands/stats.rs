//! flashcards stats command

use std::collections::HashSet;

use clap::Args;
use flashcard_domain::{AttemptStore, Card, CardId, CardStore, CategoryStore, Statistics};
use flashcard_usecase::{AttemptLogger, CardRepository, StudyError};

use super::{resolve_category, spinner};

#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Only show cards of this category (id or name)
    #[arg(short, long)]
    pub category: Option<String>,
}

impl StatsCommand {
    pub async fn run<S>(&self, store: S) -> anyhow::Result<()>
    where
        S: CategoryStore + CardStore + AttemptStore + Clone,
    {
        let repository = CardRepository::new(store.clone());
        let logger = AttemptLogger::new(store);

        let loading = spinner("Loading statistics...");
        let loaded = async {
            let cards = repository.load_cards().await?;
            let stats = logger.statistics().await?;
            Ok::<_, StudyError>((cards, stats))
        }
        .await;
        loading.finish_and_clear();
        let (cards, stats) = loaded?;

        let cards = match &self.category {
            Some(arg) => {
                let category = resolve_category(&repository, arg).await?;
                CardRepository::<S>::filter_by_category(&cards, Some(&category))
            }
            None => cards,
        };

        for row in render_statistics(&cards, &stats) {
            println!("{}", row);
        }
        Ok(())
    }
}

/// One line per card plus a totals line
///
/// Cards that were never attempted show zero counts.
pub(crate) fn render_statistics(cards: &[Card], stats: &Statistics) -> Vec<String> {
    if cards.is_empty() {
        return vec!["No cards yet.".to_string()];
    }

    let width = cards
        .iter()
        .map(|c| c.question().chars().count())
        .max()
        .unwrap_or(0)
        .max("Question".len());

    let mut rows = vec![format!(
        "{:<width$}  {:>7}  {:>5}  {:>8}",
        "Question",
        "Correct",
        "Wrong",
        "Accuracy",
        width = width
    )];

    for card in cards {
        let s = stats.get(card.id());
        rows.push(format!(
            "{:<width$}  {:>7}  {:>5}  {:>8}",
            card.question(),
            s.correct_count,
            s.wrong_count,
            accuracy(s.accuracy()),
            width = width
        ));
    }

    let shown: HashSet<&CardId> = cards.iter().map(Card::id).collect();
    let mut visible = stats.clone();
    visible.retain_cards(|id| shown.contains(id));
    let total = visible.totals();
    rows.push(format!(
        "{:<width$}  {:>7}  {:>5}  {:>8}",
        "Total",
        total.correct_count,
        total.wrong_count,
        accuracy(total.accuracy()),
        width = width
    ));
    rows
}

fn accuracy(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0}%", v * 100.0),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcard_domain::{Attempt, CategoryId};

    fn card(id: &str, question: &str) -> Card {
        Card::new(CardId::new(id), question, "x", CategoryId::new("math"))
    }

    #[test]
    fn test_render_statistics() {
        let cards = vec![card("a", "2+2"), card("b", "3+3")];
        let attempts = vec![
            Attempt::new(CardId::new("a"), true),
            Attempt::new(CardId::new("a"), false),
        ];
        let rows = render_statistics(&cards, &Statistics::from_attempts(&attempts));

        assert_eq!(rows.len(), 4);
        assert!(rows[1].starts_with("2+2"));
        assert!(rows[1].ends_with("50%"));
        // Never attempted: zero counts, no accuracy
        assert!(rows[2].contains("  0  "));
        assert!(rows[2].ends_with('-'));
        assert!(rows[3].starts_with("Total"));
    }

    #[test]
    fn test_render_statistics_totals_only_listed_cards() {
        let cards = vec![card("a", "2+2")];
        let attempts = vec![
            Attempt::new(CardId::new("a"), true),
            Attempt::new(CardId::new("other"), false),
            Attempt::new(CardId::new("other"), false),
        ];
        let rows = render_statistics(&cards, &Statistics::from_attempts(&attempts));

        assert!(rows[2].starts_with("Total"));
        assert!(rows[2].ends_with("100%"));
    }

    #[test]
    fn test_render_statistics_without_cards() {
        let rows = render_statistics(&[], &Statistics::new());
        assert_eq!(rows, vec!["No cards yet.".to_string()]);
    }
}
