//! flashcards cards command

use clap::{Args, Subcommand};
use console::style;
use flashcard_domain::{Card, CardId, CardStore, CategoryStore};
use flashcard_usecase::CardRepository;

use super::resolve_category;

#[derive(Debug, Args)]
pub struct CardsCommand {
    #[command(subcommand)]
    pub command: CardsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum CardsSubcommand {
    /// List cards
    List {
        /// Only list cards of this category (id or name)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a new card
    Add {
        question: String,
        answer: String,
        /// Category id or name
        #[arg(short, long)]
        category: String,
    },
    /// Replace question and answer of a card
    Update {
        id: String,
        question: String,
        answer: String,
    },
    /// Delete a card
    Delete { id: String },
}

impl CardsCommand {
    pub async fn run<S>(&self, store: S) -> anyhow::Result<()>
    where
        S: CategoryStore + CardStore,
    {
        let repository = CardRepository::new(store);

        match &self.command {
            CardsSubcommand::List { category } => {
                let cards = match category {
                    Some(arg) => {
                        let category = resolve_category(&repository, arg).await?;
                        repository.load_cards_in(&category).await?
                    }
                    None => repository.load_cards().await?,
                };
                if cards.is_empty() {
                    println!("No cards yet.");
                }
                for card in &cards {
                    println!("{}", card_line(card));
                }
            }
            CardsSubcommand::Add {
                question,
                answer,
                category,
            } => {
                let category = resolve_category(&repository, category).await?;
                let card = repository.add_card(question, answer, category).await?;
                println!("{} Added card {}", style("✓").green(), card.id());
            }
            CardsSubcommand::Update {
                id,
                question,
                answer,
            } => {
                let card = repository
                    .update_card(&CardId::new(id.as_str()), question, answer)
                    .await?;
                println!("{} Updated card {}", style("✓").green(), card.id());
            }
            CardsSubcommand::Delete { id } => {
                repository.delete_card(&CardId::new(id.as_str())).await?;
                println!("{} Deleted card {}", style("✓").green(), id);
            }
        }
        Ok(())
    }
}

fn card_line(card: &Card) -> String {
    format!(
        "{}  {} -> {}  [{}]",
        style(card.id()).dim(),
        card.question(),
        card.answer(),
        card.category_id()
    )
}
