//! # Flashcards Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `repository/` - Record store implementations (memory, PostgREST)
//! - `random` - `IndexSource` backed by `rand`
//! - `config` - Record store connection settings

pub mod config;
pub mod random;
pub mod repository;

pub use config::{ConfigError, StoreConfig};
pub use random::RandIndexSource;
pub use repository::in_memory::InMemoryRecordStore;
pub use repository::postgrest::PostgrestStore;
