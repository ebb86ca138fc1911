//! # Flashcards Domain Layer
//!
//! The heart of the study app - pure business logic with zero external dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Entities & Value Objects                      ││
//! │  │  repository/- Store port traits (not implementations)       ││
//! │  │  service/   - Domain services (SessionEngine, scoring)      ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate has ZERO external dependencies.**
//!
//! If the record store moves from Supabase to something else, this crate
//! doesn't change.

pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    attempt::Attempt,
    card::{Card, CardError, CardField, CardId, CardUpdate, NewCard},
    category::{Category, CategoryId},
    deck::{filter_by_category, Deck},
    statistics::{CardStats, Statistics},
};

pub use repository::{
    attempt_store::AttemptStore, card_store::CardStore, category_store::CategoryStore, StoreError,
};

pub use service::scoring::answers_match;
pub use service::session_engine::{
    AnswerOutcome, Feedback, IndexSource, OrderingPolicy, ScriptedIndices, SessionEngine,
    SessionError, SessionPhase, SessionState,
};
