//! # Flashcards - Study cards from the terminal
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Creates: PostgrestStore or InMemoryRecordStore (adapter)│
//! │    ├── Creates: RandIndexSource (adapter)                      │
//! │    └── Runs: the selected command (presentation)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   flashcards                          - Practice all cards
//!   flashcards practice --random        - Practice in random order
//!   flashcards cards add <q> <a> -c <category>
//!   flashcards categories               - List categories
//!   flashcards stats                    - Per-card results
//!   flashcards --memory                 - Use a seeded in-memory store

mod commands;
mod demo;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{CardsCommand, PracticeCommand, StatsCommand};
use flashcard_adapter::{PostgrestStore, RandIndexSource, StoreConfig};
use flashcard_domain::{AttemptStore, CardStore, CategoryStore};
use tracing::info;

#[derive(Parser)]
#[command(name = "flashcards")]
#[command(about = "Flashcards - practice question/answer cards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Store settings as JSON (url, anonKey, timeoutSecs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use an in-memory store with demo cards
    #[arg(long, global = true)]
    memory: bool,

    /// Seed for random ordering
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice cards interactively
    Practice(PracticeCommand),
    /// Manage cards
    Cards(CardsCommand),
    /// List categories
    Categories,
    /// Show per-card statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Practice(PracticeCommand::default()));
    let indices = match cli.seed {
        Some(seed) => RandIndexSource::seeded(seed),
        None => RandIndexSource::from_entropy(),
    };

    if cli.memory {
        info!("using in-memory store");
        let store = demo::seeded_store().context("Failed to seed in-memory store")?;
        return run(command, store, indices).await;
    }

    let config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => StoreConfig::from_env().context("Failed to read store config from environment")?,
    };
    info!(url = %config.url, "using PostgREST store");
    let store = PostgrestStore::new(&config).context("Failed to create record store")?;
    run(command, store, indices).await
}

async fn run<S>(command: Commands, store: S, indices: RandIndexSource) -> anyhow::Result<()>
where
    S: CategoryStore + CardStore + AttemptStore + Clone,
{
    match command {
        Commands::Practice(cmd) => cmd.run(store, indices).await,
        Commands::Cards(cmd) => cmd.run(store).await,
        Commands::Categories => commands::categories::run(store).await,
        Commands::Stats(cmd) => cmd.run(store).await,
    }
}
