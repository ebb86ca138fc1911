//! Store Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to reach the record store,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait CardStore       │  InMemoryRecordStore
//!   fn select_all()     │  PostgrestStore
//!   fn insert()         │
//! ```
//!
//! Every call is a suspension point, so the traits return futures. The
//! callers keep all local state changes on one side of the `.await`.

pub mod attempt_store;
pub mod card_store;
pub mod category_store;

/// Errors that can occur during store operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced record does not exist
    NotFound { collection: String, id: String },
    /// The store rejected the payload (constraint violation)
    Validation { message: String },
    /// Any transport or backend failure; the caller may retry
    Unavailable { message: String },
}

impl StoreError {
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::NotFound { collection, id } => {
                write!(f, "Record not found in {}: {}", collection, id)
            }
            StoreError::Validation { message } => {
                write!(f, "Store rejected record: {}", message)
            }
            StoreError::Unavailable { message } => {
                write!(f, "Store unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for StoreError {}
