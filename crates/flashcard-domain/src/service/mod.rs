//! Domain Services - Business logic that doesn't belong to a single entity
//!
//! Services operate on multiple entities and contain the "verbs" of the domain.

pub mod scoring;
pub mod session_engine;
