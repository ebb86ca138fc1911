//! Persistence Adapters - Record store implementations
//!
//! These implement the store traits from flashcard-domain.

pub mod in_memory;
pub mod postgrest;
