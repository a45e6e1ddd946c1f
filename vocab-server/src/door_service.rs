use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};
use vocab_core::{DoorGame, GameEvent};
use vocab_persistence::DoorGameStore;
use vocab_types::{Difficulty, DoorGameState, ExerciseError};

use crate::error::ApiError;
use crate::events::EventPublisher;
use crate::timers::CountdownHandle;

const TICK: Duration = Duration::from_secs(1);

struct DoorState {
    game: DoorGame,
    countdown: Option<CountdownHandle>,
}

struct DoorInner {
    state: Mutex<DoorState>,
    store: DoorGameStore,
    events: Arc<EventPublisher>,
}

/// Runs the door game and owns its countdown
#[derive(Clone)]
pub struct DoorService {
    inner: Arc<DoorInner>,
    default_total_rounds: u32,
}

impl DoorService {
    pub fn new(
        game: DoorGame,
        store: DoorGameStore,
        events: Arc<EventPublisher>,
        default_total_rounds: u32,
    ) -> Self {
        Self {
            inner: Arc::new(DoorInner {
                state: Mutex::new(DoorState {
                    game,
                    countdown: None,
                }),
                store,
                events,
            }),
            default_total_rounds,
        }
    }

    /// Restore difficulty and high score from the store
    pub async fn load(
        store: DoorGameStore,
        events: Arc<EventPublisher>,
        default_total_rounds: u32,
    ) -> anyhow::Result<Self> {
        let snapshot = store.load().await?;
        let mut game = DoorGame::new(StdRng::from_os_rng());
        game.restore(snapshot);
        info!(
            "Door game restored: {} difficulty, high score {}",
            snapshot.difficulty, snapshot.high_score
        );
        Ok(Self::new(game, store, events, default_total_rounds))
    }

    pub async fn state(&self) -> DoorGameState {
        self.inner.state.lock().await.game.state()
    }

    pub async fn start(
        &self,
        difficulty: Difficulty,
        total_rounds: Option<u32>,
    ) -> Result<DoorGameState, ApiError> {
        let total_rounds = total_rounds.unwrap_or(self.default_total_rounds);
        self.run_command(|game| game.initialize(difficulty, total_rounds))
            .await
    }

    pub async fn reset(&self) -> Result<DoorGameState, ApiError> {
        self.run_command(|game| game.reset()).await
    }

    pub async fn select_door(&self, index: usize) -> Result<DoorGameState, ApiError> {
        self.run_command(|game| game.select_door(index).map(|_| ()))
            .await
    }

    pub async fn next_round(&self) -> Result<DoorGameState, ApiError> {
        self.run_command(|game| game.start_next_round().map(|_| ()))
            .await
    }

    /// Apply a command, publish what it produced, re-arm the countdown and
    /// persist when the high score or difficulty may have changed
    async fn run_command<F>(&self, command: F) -> Result<DoorGameState, ApiError>
    where
        F: FnOnce(&mut DoorGame) -> Result<(), ExerciseError>,
    {
        let (state, events, snapshot) = {
            let mut door = self.inner.state.lock().await;
            let epoch_before = door.game.epoch();
            let snapshot_before = door.game.snapshot();

            command(&mut door.game)?;

            if door.game.epoch() != epoch_before {
                if let Some(previous) = door.countdown.take() {
                    previous.cancel();
                }
                door.countdown = door
                    .game
                    .active_timer()
                    .map(|timer| self.spawn_countdown(timer.epoch));
            }

            let events = door.game.drain_events();
            self.inner.events.publish_all(events.clone());

            let snapshot = door.game.snapshot();
            let changed = snapshot != snapshot_before
                || events.iter().any(|e| matches!(e, GameEvent::GameCompleted { .. }));
            (door.game.state(), events, changed.then_some(snapshot))
        };

        debug!("Door command produced {} events", events.len());

        if let Some(snapshot) = snapshot {
            self.inner
                .store
                .save(&snapshot)
                .await
                .map_err(ApiError::storage)?;
        }

        Ok(state)
    }

    /// One-second ticks for the timer armed at `epoch`. The task follows the
    /// game from memorizing into choosing and stops once no timer is armed or
    /// another command has taken over.
    fn spawn_countdown(&self, epoch: u64) -> CountdownHandle {
        let inner = self.inner.clone();

        CountdownHandle::spawn(async move {
            let mut epoch = epoch;
            let mut ticks = interval_at(Instant::now() + TICK, TICK);

            loop {
                ticks.tick().await;

                let mut door = inner.state.lock().await;
                if !door.game.tick(epoch) {
                    break;
                }
                let events = door.game.drain_events();
                inner.events.publish_all(events);

                match door.game.active_timer() {
                    Some(timer) => epoch = timer.epoch,
                    None => break,
                }
            }
        })
    }
}
