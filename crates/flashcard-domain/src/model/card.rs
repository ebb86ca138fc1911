//! Card - A question/answer pair that belongs to a Category
//!
//! A Card is an Entity: the store assigns its `CardId` on insert and that
//! id stays the same even if the text is later updated.
//!
//! Cards are only built from validated payloads. `NewCard` and
//! `CardUpdate` reject empty required fields before anything reaches a store.

use super::category::CategoryId;

/// Unique identifier for a Card
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted flashcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Unique identifier (Entity identity)
    id: CardId,
    /// Prompt shown to the learner
    question: String,
    /// Expected answer, compared case- and whitespace-insensitively
    answer: String,
    /// Owning category
    category_id: CategoryId,
}

impl Card {
    pub fn new(
        id: CardId,
        question: impl Into<String>,
        answer: impl Into<String>,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
            category_id,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    /// Does this card belong to `category`?
    pub fn in_category(&self, category: &CategoryId) -> bool {
        &self.category_id == category
    }

    /// Apply an update, keeping identity and category
    pub fn with_update(mut self, update: CardUpdate) -> Self {
        self.question = update.question;
        self.answer = update.answer;
        self
    }
}

/// Which required field was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Question,
    Answer,
}

impl core::fmt::Display for CardField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CardField::Question => write!(f, "question"),
            CardField::Answer => write!(f, "answer"),
        }
    }
}

/// Errors raised while building card payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    EmptyField { field: CardField },
}

impl core::fmt::Display for CardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CardError::EmptyField { field } => write!(f, "Card {} must not be empty", field),
        }
    }
}

impl std::error::Error for CardError {}

fn require(value: String, field: CardField) -> Result<String, CardError> {
    if value.trim().is_empty() {
        Err(CardError::EmptyField { field })
    } else {
        Ok(value)
    }
}

/// Insert payload for the `cards` collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    question: String,
    answer: String,
    category_id: CategoryId,
}

impl NewCard {
    /// Validate and build an insert payload
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category_id: CategoryId,
    ) -> Result<Self, CardError> {
        Ok(Self {
            question: require(question.into(), CardField::Question)?,
            answer: require(answer.into(), CardField::Answer)?,
            category_id,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    /// Turn the payload into a Card once the store has assigned an id
    pub fn into_card(self, id: CardId) -> Card {
        Card::new(id, self.question, self.answer, self.category_id)
    }
}

/// Update payload for the `cards` collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardUpdate {
    question: String,
    answer: String,
}

impl CardUpdate {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Result<Self, CardError> {
        Ok(Self {
            question: require(question.into(), CardField::Question)?,
            answer: require(answer.into(), CardField::Answer)?,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}
