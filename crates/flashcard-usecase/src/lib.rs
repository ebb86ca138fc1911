//! # Flashcards Use Case Layer
//!
//! Application-specific business rules.
//! This layer orchestrates the flow of data between the domain and adapters:
//!
//! - `CardRepository` - load, filter and edit cards through a `CardStore`
//! - `AttemptLogger` - append attempts and fold them into statistics
//! - `StudySession` - one learner's practice loop on top of both
//!
//! Stores are injected at construction time; nothing here knows whether it
//! talks to memory or to a remote service.

pub use flashcard_domain;

pub mod attempt_logger;
pub mod card_repository;
pub mod error;
pub mod study_session;

#[cfg(test)]
mod testing;

pub use attempt_logger::AttemptLogger;
pub use card_repository::CardRepository;
pub use error::{Result, StudyError};
pub use study_session::{AnswerReport, StudySession};
