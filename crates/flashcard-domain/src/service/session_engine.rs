//! Session Engine - The practice loop's state machine
//!
//! A session is in one of two phases:
//! 1. Empty: the deck has no cards, there is nothing to answer
//! 2. Active: the deck has cards and `position` points at one of them
//!
//! There is no terminal phase. A session keeps cycling until its deck is
//! replaced (category change, card added or removed) or the caller resets it.
//!
//! This is pure domain logic - no I/O, no async, no external dependencies.
//! The engine scores and advances; persisting the attempt is the caller's job.

use crate::model::attempt::Attempt;
use crate::model::card::Card;
use crate::model::deck::Deck;

use super::scoring::answers_match;

/// Which card comes next after an answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// `(position + 1) % len`, every card once per lap
    #[default]
    Sequential,
    /// Uniform pick from the whole deck; immediate repeats are possible
    Random,
}

impl core::fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrderingPolicy::Sequential => write!(f, "sequential"),
            OrderingPolicy::Random => write!(f, "random"),
        }
    }
}

/// Result of the previous answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    Active,
}

/// Snapshot of a practice session
///
/// Only the engine produces new states. `position` is always a valid index
/// while the phase is `Active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    deck: Deck,
    position: usize,
    ordering: OrderingPolicy,
    last_feedback: Option<Feedback>,
}

impl SessionState {
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    pub fn last_feedback(&self) -> Option<Feedback> {
        self.last_feedback
    }

    pub fn phase(&self) -> SessionPhase {
        if self.deck.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Active
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.deck.get(self.position)
    }

    /// Same session, pointed at another card
    ///
    /// Returns `None` when `position` is outside the deck.
    pub fn jump_to(&self, position: usize) -> Option<SessionState> {
        if position >= self.deck.len() {
            return None;
        }
        Some(SessionState {
            position,
            ..self.clone()
        })
    }
}

/// Source of indices for `OrderingPolicy::Random`
///
/// Injected so tests can script the sequence. Implementations should return
/// a value in `0..len`; the engine reduces anything larger modulo `len`.
pub trait IndexSource {
    fn next_index(&mut self, len: usize) -> usize;
}

impl<T: IndexSource + ?Sized> IndexSource for &mut T {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

impl<T: IndexSource + ?Sized> IndexSource for Box<T> {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Deterministic index source that replays a fixed script, looping at the end
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndices {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedIndices {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }
}

impl IndexSource for ScriptedIndices {
    fn next_index(&mut self, _len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let index = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        index
    }
}

/// What `check_answer` produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// The card that was answered
    pub card: Card,
    pub is_correct: bool,
    /// State with the position already advanced
    pub next_state: SessionState,
}

impl AnswerOutcome {
    /// The attempt record the caller should log
    pub fn attempt(&self) -> Attempt {
        Attempt::new(self.card.id().clone(), self.is_correct)
    }
}

/// Errors that can occur in the SessionEngine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `check_answer` on an empty deck
    NoActiveCard,
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::NoActiveCard => write!(f, "No active card: the deck is empty"),
        }
    }
}

impl std::error::Error for SessionError {}

/// SessionEngine - Scores answers and moves through the deck
pub struct SessionEngine<I> {
    indices: I,
}

impl<I: IndexSource> SessionEngine<I> {
    pub fn new(indices: I) -> Self {
        Self { indices }
    }

    /// Start a session on `deck` at its first card
    pub fn initialize(&self, deck: Deck, ordering: OrderingPolicy) -> SessionState {
        SessionState {
            deck,
            position: 0,
            ordering,
            last_feedback: None,
        }
    }

    /// Swap in a new deck, keeping the ordering policy
    ///
    /// Always restarts at position 0; an index into the old deck means
    /// nothing in the new one.
    pub fn replace_deck(&self, state: &SessionState, deck: Deck) -> SessionState {
        self.initialize(deck, state.ordering)
    }

    /// Restart the current deck under another ordering policy
    pub fn reorder(&self, state: &SessionState, ordering: OrderingPolicy) -> SessionState {
        self.initialize(state.deck.clone(), ordering)
    }

    pub fn current_card<'a>(&self, state: &'a SessionState) -> Option<&'a Card> {
        state.current_card()
    }

    /// Score `input` against the current card and advance
    pub fn check_answer(
        &mut self,
        state: &SessionState,
        input: &str,
    ) -> Result<AnswerOutcome, SessionError> {
        let card = state.current_card().ok_or(SessionError::NoActiveCard)?.clone();
        let is_correct = answers_match(input, card.answer());

        let next_state = SessionState {
            deck: state.deck.clone(),
            position: self.next_position(state),
            ordering: state.ordering,
            last_feedback: Some(Feedback::from_correct(is_correct)),
        };

        Ok(AnswerOutcome {
            card,
            is_correct,
            next_state,
        })
    }

    fn next_position(&mut self, state: &SessionState) -> usize {
        let len = state.deck.len();
        match state.ordering {
            OrderingPolicy::Sequential => (state.position + 1) % len,
            OrderingPolicy::Random => self.indices.next_index(len) % len,
        }
    }
}
