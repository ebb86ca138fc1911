//! flashcards categories command

use flashcard_domain::{Category, CategoryStore};
use flashcard_usecase::CardRepository;

pub async fn run<S: CategoryStore>(store: S) -> anyhow::Result<()> {
    let categories = CardRepository::new(store).load_categories().await?;
    for line in render_categories(&categories) {
        println!("{}", line);
    }
    Ok(())
}

fn render_categories(categories: &[Category]) -> Vec<String> {
    if categories.is_empty() {
        return vec!["No categories yet.".to_string()];
    }
    categories
        .iter()
        .map(|c| format!("{}  {}", c.id(), c.name()))
        .collect()
}
