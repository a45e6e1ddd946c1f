use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::info;
use vocab_core::{GameEvent, StoryGame};
use vocab_persistence::StoryGameStore;
use vocab_types::{Difficulty, GameLevel, LevelOutcome, StoryGameSnapshot, StoryGameView};

use crate::enrichment::QuoteClient;
use crate::error::ApiError;
use crate::events::EventPublisher;

#[derive(Clone)]
pub struct StoryService {
    game: Arc<Mutex<StoryGame>>,
    store: StoryGameStore,
    quotes: QuoteClient,
    events: Arc<EventPublisher>,
}

impl StoryService {
    pub fn new(
        game: StoryGame,
        store: StoryGameStore,
        quotes: QuoteClient,
        events: Arc<EventPublisher>,
    ) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
            store,
            quotes,
            events,
        }
    }

    pub async fn load(
        store: StoryGameStore,
        quotes: QuoteClient,
        events: Arc<EventPublisher>,
    ) -> anyhow::Result<Self> {
        let snapshot = store.load().await?;
        let mut game = StoryGame::new(StdRng::from_os_rng())?;
        info!(
            "Story restored: {} difficulty, {} levels completed",
            snapshot.difficulty,
            snapshot.game_progress.completed_count()
        );
        game.restore(snapshot);
        Ok(Self::new(game, store, quotes, events))
    }

    pub async fn view(&self) -> StoryGameView {
        self.game.lock().await.view()
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) -> Result<StoryGameView, ApiError> {
        self.update(|game| game.set_difficulty(difficulty)).await
    }

    pub async fn start(&self) -> StoryGameView {
        let mut game = self.game.lock().await;
        game.start();
        game.view()
    }

    pub async fn reset(&self) -> Result<StoryGameView, ApiError> {
        self.update(|game| game.reset()).await
    }

    /// A chapter the player may enter
    pub async fn level(&self, level_id: u8) -> Result<GameLevel, ApiError> {
        let game = self.game.lock().await;
        let session = game.enter_level(level_id)?;
        Ok(session.level().clone())
    }

    /// Grade one attempt at a level from the chosen option indexes
    pub async fn complete_level(
        &self,
        level_id: u8,
        answers: &[usize],
    ) -> Result<LevelOutcome, ApiError> {
        let (outcome, difficulty, snapshot) = {
            let mut game = self.game.lock().await;
            let mut session = game.enter_level(level_id)?;
            session.begin_quiz()?;
            for answer in answers {
                session.answer(*answer)?;
            }
            let outcome = game.finish_level(&session)?;
            (outcome, game.difficulty(), game.snapshot())
        };

        let event = if outcome.passed {
            GameEvent::LevelCompleted {
                difficulty,
                level_id,
                correct_count: outcome.correct_count,
            }
        } else {
            GameEvent::LevelFailed {
                difficulty,
                level_id,
                correct_count: outcome.correct_count,
            }
        };
        self.events.publish(event);

        self.save(&snapshot).await?;
        Ok(outcome)
    }

    /// Fetch quotes for the current tier and weave them into its chapters.
    /// Without quotes the tier falls back to the base story.
    pub async fn enrich(&self) -> Result<StoryGameView, ApiError> {
        let difficulty = self.game.lock().await.difficulty();

        let quotes = self.quotes.quotes_or_empty().await;

        let mut game = self.game.lock().await;
        game.apply_enrichment(difficulty, &quotes);
        Ok(game.view())
    }

    async fn update<F>(&self, change: F) -> Result<StoryGameView, ApiError>
    where
        F: FnOnce(&mut StoryGame),
    {
        let (view, snapshot) = {
            let mut game = self.game.lock().await;
            change(&mut game);
            (game.view(), game.snapshot())
        };

        self.save(&snapshot).await?;
        Ok(view)
    }

    async fn save(&self, snapshot: &StoryGameSnapshot) -> Result<(), ApiError> {
        self.store.save(snapshot).await.map_err(ApiError::storage)
    }
}
