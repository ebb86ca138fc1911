//! Study Session - One learner working through a deck
//!
//! Glues the three parts together:
//! 1. CardRepository supplies the cards
//! 2. SessionEngine scores answers and picks the next card
//! 3. AttemptLogger persists each answer
//!
//! Local state only changes entirely before a store call is issued or
//! entirely after its result is known. Every change to the card list
//! rebuilds the deck and restarts the session at position 0.

use std::collections::HashSet;

use flashcard_domain::{
    AttemptStore, Card, CardId, CardStore, CategoryId, Deck, IndexSource, OrderingPolicy,
    SessionEngine, SessionState, Statistics,
};
use tracing::{debug, info, warn};

use crate::attempt_logger::AttemptLogger;
use crate::card_repository::CardRepository;
use crate::error::{Result, StudyError};

/// What the learner sees after submitting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReport {
    /// The card that was answered
    pub card: Card,
    pub is_correct: bool,
    /// Set when the attempt could not be logged; the score above still stands
    pub log_error: Option<StudyError>,
}

impl AnswerReport {
    pub fn logged(&self) -> bool {
        self.log_error.is_none()
    }
}

pub struct StudySession<C, A, I> {
    repository: CardRepository<C>,
    logger: AttemptLogger<A>,
    engine: SessionEngine<I>,
    /// Every known card, the source of each deck
    cards: Vec<Card>,
    category: Option<CategoryId>,
    state: SessionState,
}

impl<C, A, I> StudySession<C, A, I>
where
    C: CardStore,
    A: AttemptStore,
    I: IndexSource,
{
    /// Load all cards and start an unfiltered session
    pub async fn open(
        repository: CardRepository<C>,
        logger: AttemptLogger<A>,
        engine: SessionEngine<I>,
        ordering: OrderingPolicy,
    ) -> Result<Self> {
        let cards = repository.load_cards().await?;
        Ok(Self::with_cards(repository, logger, engine, cards, ordering))
    }

    /// Start an unfiltered session over cards the caller already has
    pub fn with_cards(
        repository: CardRepository<C>,
        logger: AttemptLogger<A>,
        engine: SessionEngine<I>,
        cards: Vec<Card>,
        ordering: OrderingPolicy,
    ) -> Self {
        let state = engine.initialize(Deck::filtered(&cards, None), ordering);
        info!(cards = cards.len(), %ordering, "study session started");
        Self {
            repository,
            logger,
            engine,
            cards,
            category: None,
            state,
        }
    }

    // ========== Getters ==========

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.engine.current_card(&self.state)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    // ========== Session control ==========

    /// Narrow the deck to one category, or widen it back with `None`
    pub fn select_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
        self.rebuild();
        debug!(
            category = ?self.category.as_ref().map(CategoryId::as_str),
            deck = self.state.deck().len(),
            "category selected"
        );
    }

    pub fn set_ordering(&mut self, ordering: OrderingPolicy) {
        self.state = self.engine.reorder(&self.state, ordering);
    }

    /// Re-fetch every card from the store and restart the deck
    pub async fn reload(&mut self) -> Result<()> {
        let cards = self.repository.load_cards().await?;
        self.cards = cards;
        self.rebuild();
        Ok(())
    }

    /// Score an answer, advance, then log the attempt
    ///
    /// A logging failure is returned inside the report, never as `Err`;
    /// the score and the new position stay as computed.
    pub async fn submit_answer(&mut self, input: &str) -> Result<AnswerReport> {
        let outcome = self.engine.check_answer(&self.state, input)?;
        let attempt = outcome.attempt();
        self.state = outcome.next_state;

        let log_error = match self
            .logger
            .record_attempt(attempt.card_id(), attempt.is_correct())
            .await
        {
            Ok(_) => None,
            Err(e) => {
                warn!(card_id = %attempt.card_id(), error = %e, "answer scored but not logged");
                Some(e)
            }
        };

        Ok(AnswerReport {
            card: outcome.card,
            is_correct: outcome.is_correct,
            log_error,
        })
    }

    // ========== Card edits ==========

    pub async fn add_card(
        &mut self,
        question: &str,
        answer: &str,
        category_id: CategoryId,
    ) -> Result<Card> {
        let card = self
            .repository
            .add_card(question, answer, category_id)
            .await?;
        self.cards.push(card.clone());
        self.rebuild();
        Ok(card)
    }

    pub async fn update_card(&mut self, id: &CardId, question: &str, answer: &str) -> Result<Card> {
        let card = self.repository.update_card(id, question, answer).await?;
        if let Some(slot) = self.cards.iter_mut().find(|c| c.id() == id) {
            *slot = card.clone();
        }
        self.rebuild();
        Ok(card)
    }

    /// Delete a card from the store and from this session
    ///
    /// `NotFound` still removes the id locally before being returned.
    /// `StoreUnavailable` leaves everything as it was.
    pub async fn delete_card(&mut self, id: &CardId) -> Result<()> {
        let result = self.repository.delete_card(id).await;
        match &result {
            Ok(()) | Err(StudyError::NotFound { .. }) => {
                self.cards.retain(|c| c.id() != id);
                self.rebuild();
            }
            Err(_) => {}
        }
        result
    }

    // ========== Statistics ==========

    /// Per-card counts for the cards this session still knows about
    ///
    /// Attempts of deleted cards stay in the store; they are only left out
    /// of this view.
    pub async fn statistics(&self) -> Result<Statistics> {
        let mut stats = self.logger.statistics().await?;
        let known: HashSet<&CardId> = self.cards.iter().map(Card::id).collect();
        stats.retain_cards(|id| known.contains(id));
        Ok(stats)
    }

    fn rebuild(&mut self) {
        let deck = Deck::filtered(&self.cards, self.category.as_ref());
        self.state = self.engine.replace_deck(&self.state, deck);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;
    use flashcard_domain::{CardStats, Feedback, ScriptedIndices, SessionPhase};

    type TestSession = StudySession<FakeStore, FakeStore, ScriptedIndices>;

    async fn open(store: &FakeStore, ordering: OrderingPolicy) -> TestSession {
        StudySession::open(
            CardRepository::new(store.clone()),
            AttemptLogger::new(store.clone()),
            SessionEngine::new(ScriptedIndices::new(vec![1, 1, 0])),
            ordering,
        )
        .await
        .unwrap()
    }

    fn arithmetic() -> FakeStore {
        FakeStore::with_cards(&[("card0", "2+2", "4", "math"), ("card1", "3+3", "6", "math")])
    }

    fn mixed() -> FakeStore {
        FakeStore::with_cards(&[
            ("m1", "2+2", "4", "math"),
            ("g1", "Capital of France", "Paris", "geo"),
            ("m2", "3+3", "6", "math"),
        ])
    }

    #[tokio::test]
    async fn test_open_empty_store() {
        let store = FakeStore::new();
        let mut session = open(&store, OrderingPolicy::Sequential).await;

        assert_eq!(session.state().phase(), SessionPhase::Empty);
        assert!(session.current_card().is_none());
        assert_eq!(
            session.submit_answer("x").await.unwrap_err(),
            StudyError::NoActiveCard
        );
        assert!(store.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_open_store_unavailable() {
        let store = arithmetic();
        store.set_cards_down(true);

        let result = StudySession::open(
            CardRepository::new(store.clone()),
            AttemptLogger::new(store.clone()),
            SessionEngine::new(ScriptedIndices::default()),
            OrderingPolicy::Sequential,
        )
        .await;

        assert!(matches!(result, Err(StudyError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_two_card_scenario_with_statistics() {
        let store = arithmetic();
        let mut session = open(&store, OrderingPolicy::Sequential).await;

        let first = session.submit_answer("4").await.unwrap();
        assert!(first.is_correct);
        assert!(first.logged());
        assert_eq!(session.state().position(), 1);

        let second = session.submit_answer("five").await.unwrap();
        assert!(!second.is_correct);
        assert_eq!(session.state().position(), 0);
        assert_eq!(session.state().last_feedback(), Some(Feedback::Incorrect));

        let stats = session.statistics().await.unwrap();
        assert_eq!(stats.get(&CardId::new("card0")), CardStats::new(1, 0));
        assert_eq!(stats.get(&CardId::new("card1")), CardStats::new(0, 1));
    }

    #[tokio::test]
    async fn test_logging_failure_keeps_score_and_position() {
        let store = arithmetic();
        let mut session = open(&store, OrderingPolicy::Sequential).await;
        store.set_attempts_down(true);

        let report = session.submit_answer(" 4 ").await.unwrap();

        assert!(report.is_correct);
        assert!(!report.logged());
        assert!(matches!(
            report.log_error,
            Some(StudyError::StoreUnavailable(_))
        ));
        assert_eq!(session.state().position(), 1);
        assert_eq!(session.state().last_feedback(), Some(Feedback::Correct));
        assert!(store.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_category_change_resets_position() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Sequential).await;

        session.submit_answer("4").await.unwrap();
        session.submit_answer("Paris").await.unwrap();
        assert_eq!(session.state().position(), 2);

        session.select_category(Some(CategoryId::new("geo")));

        assert_eq!(session.state().deck().len(), 1);
        assert_eq!(session.state().position(), 0);
        assert_eq!(session.current_card().unwrap().answer(), "Paris");

        session.select_category(None);
        assert_eq!(session.state().deck().len(), 3);
        assert_eq!(session.state().position(), 0);
    }

    #[tokio::test]
    async fn test_category_with_no_cards_is_empty() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Sequential).await;

        session.select_category(Some(CategoryId::new("art")));

        assert_eq!(session.state().phase(), SessionPhase::Empty);
        assert_eq!(
            session.submit_answer("x").await.unwrap_err(),
            StudyError::NoActiveCard
        );
    }

    #[tokio::test]
    async fn test_random_ordering_uses_index_source() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Random).await;

        session.submit_answer("").await.unwrap();
        assert_eq!(session.state().position(), 1);
        session.submit_answer("").await.unwrap();
        assert_eq!(session.state().position(), 1);
        session.submit_answer("").await.unwrap();
        assert_eq!(session.state().position(), 0);
    }

    #[tokio::test]
    async fn test_set_ordering_restarts_deck() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Sequential).await;
        session.submit_answer("4").await.unwrap();

        session.set_ordering(OrderingPolicy::Random);

        assert_eq!(session.state().ordering(), OrderingPolicy::Random);
        assert_eq!(session.state().position(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_from_filtered_deck_without_reload() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Sequential).await;
        session.select_category(Some(CategoryId::new("math")));
        session.submit_answer("4").await.unwrap();

        session.delete_card(&CardId::new("m1")).await.unwrap();

        let ids: Vec<&str> = session
            .state()
            .deck()
            .iter()
            .map(|c| c.id().as_str())
            .collect();
        assert_eq!(ids, vec!["m2"]);
        assert_eq!(session.state().position(), 0);
        assert!(CardRepository::<FakeStore>::filter_by_category(session.cards(), None)
            .iter()
            .all(|c| c.id().as_str() != "m1"));
    }

    #[tokio::test]
    async fn test_delete_not_found_still_removes_locally() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Sequential).await;

        // Someone else already deleted it
        CardRepository::new(store.clone())
            .delete_card(&CardId::new("g1"))
            .await
            .unwrap();

        let err = session.delete_card(&CardId::new("g1")).await.unwrap_err();

        assert!(matches!(err, StudyError::NotFound { .. }));
        assert!(session.cards().iter().all(|c| c.id().as_str() != "g1"));
    }

    #[tokio::test]
    async fn test_delete_store_unavailable_changes_nothing() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Sequential).await;
        session.submit_answer("4").await.unwrap();
        store.set_cards_down(true);

        let err = session.delete_card(&CardId::new("g1")).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(session.cards().len(), 3);
        assert_eq!(session.state().position(), 1);
    }

    #[tokio::test]
    async fn test_delete_hides_statistics_but_keeps_attempts() {
        let store = arithmetic();
        let mut session = open(&store, OrderingPolicy::Sequential).await;
        session.submit_answer("4").await.unwrap();
        session.submit_answer("6").await.unwrap();

        session.delete_card(&CardId::new("card0")).await.unwrap();

        let stats = session.statistics().await.unwrap();
        assert!(!stats.contains(&CardId::new("card0")));
        assert_eq!(stats.get(&CardId::new("card1")), CardStats::new(1, 0));
        assert_eq!(store.attempts().len(), 2);
    }

    #[tokio::test]
    async fn test_add_card_rebuilds_deck() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Sequential).await;
        session.select_category(Some(CategoryId::new("geo")));
        session.submit_answer("Paris").await.unwrap();

        let card = session
            .add_card("Capital of Italy", "Rome", CategoryId::new("geo"))
            .await
            .unwrap();

        assert_eq!(session.state().deck().len(), 2);
        assert!(session.state().deck().contains(card.id()));
        assert_eq!(session.state().position(), 0);
    }

    #[tokio::test]
    async fn test_add_card_validation_error_keeps_session() {
        let store = mixed();
        let mut session = open(&store, OrderingPolicy::Sequential).await;

        let err = session
            .add_card("Capital of Italy", "", CategoryId::new("geo"))
            .await
            .unwrap_err();

        assert!(matches!(err, StudyError::Validation(_)));
        assert_eq!(session.cards().len(), 3);
        assert_eq!(store.card_writes(), 0);
    }

    #[tokio::test]
    async fn test_update_card_changes_expected_answer() {
        let store = arithmetic();
        let mut session = open(&store, OrderingPolicy::Sequential).await;

        session
            .update_card(&CardId::new("card0"), "2+2", "four")
            .await
            .unwrap();

        assert!(session.submit_answer("FOUR").await.unwrap().is_correct);
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_cards() {
        let store = arithmetic();
        let mut session = open(&store, OrderingPolicy::Sequential).await;

        CardRepository::new(store.clone())
            .add_card("4+4", "8", CategoryId::new("math"))
            .await
            .unwrap();
        assert_eq!(session.cards().len(), 2);

        session.reload().await.unwrap();
        assert_eq!(session.cards().len(), 3);
        assert_eq!(session.state().deck().len(), 3);
    }
}
