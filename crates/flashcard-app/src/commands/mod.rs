//! CLI Commands

pub mod cards;
pub mod categories;
pub mod practice;
pub mod stats;

pub use cards::CardsCommand;
pub use practice::PracticeCommand;
pub use stats::StatsCommand;

use std::time::Duration;

use anyhow::bail;
use flashcard_domain::{Category, CategoryId, CategoryStore};
use flashcard_usecase::CardRepository;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a store call is in flight
pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner());
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Resolve a `--category` argument given as id or as name
pub(crate) async fn resolve_category<S: CategoryStore>(
    repository: &CardRepository<S>,
    arg: &str,
) -> anyhow::Result<CategoryId> {
    let categories = repository.load_categories().await?;
    match find_category(&categories, arg) {
        Some(category) => Ok(category.id().clone()),
        None => bail!("Unknown category '{}'. Run `flashcards categories` to list them.", arg),
    }
}

fn find_category<'a>(categories: &'a [Category], arg: &str) -> Option<&'a Category> {
    categories
        .iter()
        .find(|c| c.id().as_str() == arg)
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.name().eq_ignore_ascii_case(arg.trim()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_category_by_id_or_name() {
        let categories = vec![
            Category::new(CategoryId::new("1"), "Math"),
            Category::new(CategoryId::new("2"), "Geography"),
        ];

        assert_eq!(find_category(&categories, "2").unwrap().name(), "Geography");
        assert_eq!(find_category(&categories, "math").unwrap().id().as_str(), "1");
        assert!(find_category(&categories, "Art").is_none());
    }
}
