//! flashcards practice - interactive study loop

use clap::Args;
use console::style;
use dialoguer::Input;
use flashcard_adapter::RandIndexSource;
use flashcard_domain::{AttemptStore, CardStore, CategoryStore, OrderingPolicy, SessionEngine};
use flashcard_usecase::{AnswerReport, AttemptLogger, CardRepository, StudyError, StudySession};
use tracing::debug;

use super::stats::render_statistics;
use super::{resolve_category, spinner};

#[derive(Debug, Default, Args)]
pub struct PracticeCommand {
    /// Only practice cards of this category (id or name)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Pick the next card at random instead of in order
    #[arg(short, long)]
    pub random: bool,
}

/// What the learner typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum PracticeInput {
    Quit,
    Stats,
    Help,
    Answer(String),
}

impl PracticeInput {
    fn parse(line: &str) -> Self {
        match line.trim() {
            ":q" | ":quit" => PracticeInput::Quit,
            ":s" | ":stats" => PracticeInput::Stats,
            ":h" | ":help" => PracticeInput::Help,
            _ => PracticeInput::Answer(line.to_string()),
        }
    }
}

impl PracticeCommand {
    fn ordering(&self) -> OrderingPolicy {
        if self.random {
            OrderingPolicy::Random
        } else {
            OrderingPolicy::Sequential
        }
    }

    pub async fn run<S>(&self, store: S, indices: RandIndexSource) -> anyhow::Result<()>
    where
        S: CategoryStore + CardStore + AttemptStore + Clone,
    {
        let repository = CardRepository::new(store.clone());
        let category = match &self.category {
            Some(arg) => Some(resolve_category(&repository, arg).await?),
            None => None,
        };

        let loading = spinner("Loading cards...");
        let opened = StudySession::open(
            repository,
            AttemptLogger::new(store),
            SessionEngine::new(indices),
            self.ordering(),
        )
        .await;
        loading.finish_and_clear();
        let mut session = opened?;
        session.select_category(category);
        debug!(
            category = ?session.category().map(|c| c.as_str()),
            cards = session.state().deck().len(),
            "practice started"
        );

        println!("{}", style("Flashcards").bold());
        println!("Type your answer, :s for statistics, :q to quit");
        println!();

        loop {
            let Some(card) = session.current_card() else {
                println!("No cards to practice. Add some with `flashcards cards add`.");
                return Ok(());
            };

            let line = Input::<String>::new()
                .with_prompt(card.question())
                .allow_empty(true)
                .interact_text()?;

            match PracticeInput::parse(&line) {
                PracticeInput::Quit => {
                    println!("Goodbye!");
                    return Ok(());
                }
                PracticeInput::Help => {
                    println!("Commands:");
                    println!("  :s   - Show statistics");
                    println!("  :q   - Quit");
                }
                PracticeInput::Stats => match session.statistics().await {
                    Ok(stats) => {
                        for row in render_statistics(session.cards(), &stats) {
                            println!("{}", row);
                        }
                    }
                    Err(err) => println!("{}", transient_line("statistics unavailable", &err)),
                },
                PracticeInput::Answer(answer) => {
                    let report = session.submit_answer(&answer).await?;
                    debug!(card_id = %report.card.id(), correct = report.is_correct, "answered");
                    println!("{}", feedback_line(&report));
                    if let Some(err) = &report.log_error {
                        println!("{}", transient_line("attempt not saved", err));
                    }
                }
            }
        }
    }
}

fn feedback_line(report: &AnswerReport) -> String {
    if report.is_correct {
        style("Correct!").green().bold().to_string()
    } else {
        format!(
            "{} The answer is: {}",
            style("Incorrect.").red().bold(),
            report.card.answer()
        )
    }
}

/// Dimmed note for a failure that leaves the session running
fn transient_line(what: &str, err: &StudyError) -> String {
    style(format!("({}: {})", what, err)).dim().to_string()
}
