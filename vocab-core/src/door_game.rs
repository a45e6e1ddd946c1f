use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info};
use vocab_types::{
    DOOR_COUNT, Difficulty, Door, DoorGamePhase, DoorGameSnapshot, DoorGameState, ExerciseError,
    GameRound,
};

use crate::door_content::word_pairs;
use crate::game_events::GameEvent;
use crate::sampler::sample_without_replacement;

pub const DEFAULT_TOTAL_ROUNDS: u32 = 10;

/// Countdown lengths for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorTimings {
    pub memorize_seconds: u32,
    pub choosing_seconds: u32,
}

impl DoorTimings {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                memorize_seconds: 5,
                choosing_seconds: 10,
            },
            Difficulty::Medium => Self {
                memorize_seconds: 4,
                choosing_seconds: 8,
            },
            Difficulty::Hard => Self {
                memorize_seconds: 3,
                choosing_seconds: 6,
            },
        }
    }
}

/// Draw three pairs and turn them into doors. Exactly one door keeps its
/// true translation; the other two get translations of pairs that were not
/// drawn this round, so no wrong door can accidentally be right.
pub fn generate_round<R: Rng + ?Sized>(
    difficulty: Difficulty,
    round_number: u32,
    rng: &mut R,
) -> Result<GameRound, ExerciseError> {
    let pool = word_pairs(difficulty);
    let selected = sample_without_replacement(&pool, DOOR_COUNT, rng)?;

    let true_translations: HashSet<&str> = selected.iter().map(|p| p.turkish.as_str()).collect();
    let mut seen = HashSet::new();
    let wrong_pool: Vec<String> = pool
        .iter()
        .filter(|p| !selected.contains(p))
        .map(|p| p.turkish.as_str())
        .filter(|t| !true_translations.contains(t))
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect();

    let needed = DOOR_COUNT - 1;
    if wrong_pool.len() < needed {
        return Err(ExerciseError::InsufficientDistractors {
            required: needed,
            available: wrong_pool.len(),
        });
    }
    let mut wrong = sample_without_replacement(&wrong_pool, needed, rng)?.into_iter();

    let correct_door_index = rng.random_range(0..DOOR_COUNT);
    let mut doors = Vec::with_capacity(DOOR_COUNT);
    for (index, pair) in selected.iter().enumerate() {
        let door = if index == correct_door_index {
            Door {
                english: pair.english.clone(),
                turkish: pair.turkish.clone(),
                is_correct: true,
            }
        } else {
            Door {
                english: pair.english.clone(),
                turkish: wrong.next().unwrap_or_default(),
                is_correct: false,
            }
        };
        doors.push(door);
    }

    Ok(GameRound {
        round_number,
        word_pairs: selected,
        doors,
        correct_door_index,
    })
}

/// Countdown armed for the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    pub epoch: u64,
    pub phase: DoorGamePhase,
    pub seconds_remaining: u32,
}

/// The door memorization game.
///
/// Timers are driven from outside through [`DoorGame::tick`]; every phase
/// change moves the epoch on so ticks scheduled for an earlier phase are
/// ignored. Events accumulate until [`DoorGame::drain_events`] is called.
pub struct DoorGame {
    difficulty: Difficulty,
    total_rounds: u32,
    current_round: u32,
    score: u32,
    high_score: u32,
    phase: DoorGamePhase,
    round: Option<GameRound>,
    timings: DoorTimings,
    epoch: u64,
    seconds_remaining: Option<u32>,
    pending_events: Vec<GameEvent>,
    rng: StdRng,
}

impl DoorGame {
    pub fn new(rng: StdRng) -> Self {
        let difficulty = Difficulty::default();
        Self {
            difficulty,
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            current_round: 0,
            score: 0,
            high_score: 0,
            phase: DoorGamePhase::Idle,
            round: None,
            timings: DoorTimings::for_difficulty(difficulty),
            epoch: 0,
            seconds_remaining: None,
            pending_events: Vec::new(),
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn phase(&self) -> DoorGamePhase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn current_round(&self) -> Option<&GameRound> {
        self.round.as_ref()
    }

    pub fn active_timer(&self) -> Option<PhaseTimer> {
        match (self.phase, self.seconds_remaining) {
            (DoorGamePhase::Memorizing | DoorGamePhase::Choosing, Some(seconds_remaining)) => {
                Some(PhaseTimer {
                    epoch: self.epoch,
                    phase: self.phase,
                    seconds_remaining,
                })
            }
            _ => None,
        }
    }

    /// Start a fresh game showing round 1
    pub fn initialize(&mut self, difficulty: Difficulty, total_rounds: u32) -> Result<(), ExerciseError> {
        let round = generate_round(difficulty, 1, &mut self.rng)?;

        self.difficulty = difficulty;
        self.total_rounds = total_rounds.max(1);
        self.current_round = 0;
        self.score = 0;
        self.timings = DoorTimings::for_difficulty(difficulty);
        info!(
            "Door game started: {} difficulty, {} rounds",
            difficulty, self.total_rounds
        );
        self.begin_round(round);
        Ok(())
    }

    /// Play again with the last difficulty and round count
    pub fn reset(&mut self) -> Result<(), ExerciseError> {
        self.initialize(self.difficulty, self.total_rounds)
    }

    /// Advance the armed countdown by one second. Returns false for ticks of
    /// an earlier epoch or when nothing is counting down.
    pub fn tick(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            debug!("Ignoring stale tick for epoch {} (current {})", epoch, self.epoch);
            return false;
        }
        let Some(timer) = self.active_timer() else {
            return false;
        };

        let remaining = timer.seconds_remaining.saturating_sub(1);
        self.seconds_remaining = Some(remaining);
        self.pending_events.push(GameEvent::TimerTick {
            phase: timer.phase,
            seconds_remaining: remaining,
        });

        if remaining == 0 {
            match timer.phase {
                DoorGamePhase::Memorizing => {
                    self.finish_memorizing();
                }
                DoorGamePhase::Choosing => {
                    self.time_expired();
                }
                _ => {}
            }
        }
        true
    }

    /// Hide the word pairs and open the doors
    pub fn finish_memorizing(&mut self) -> bool {
        if self.phase != DoorGamePhase::Memorizing {
            return false;
        }
        self.set_phase(DoorGamePhase::Choosing);
        self.pending_events.push(GameEvent::MemorizeFinished {
            choosing_seconds: self.timings.choosing_seconds,
        });
        true
    }

    /// The choosing countdown ran out; the round counts as missed
    pub fn time_expired(&mut self) -> bool {
        if self.phase != DoorGamePhase::Choosing {
            return false;
        }
        self.set_phase(DoorGamePhase::Incorrect);
        self.pending_events.push(GameEvent::TimeExpired {
            correct_door_index: self.correct_door_index(),
            score: self.score,
            high_score: self.high_score,
        });
        true
    }

    /// Pick a door. Only the first pick while choosing counts; anything
    /// else returns `Ok(None)`.
    pub fn select_door(&mut self, index: usize) -> Result<Option<bool>, ExerciseError> {
        if self.phase != DoorGamePhase::Choosing {
            return Ok(None);
        }
        let Some(round) = &self.round else {
            return Ok(None);
        };
        if index >= round.doors.len() {
            return Err(ExerciseError::InvalidChoice {
                index,
                option_count: round.doors.len(),
            });
        }

        let correct_door_index = round.correct_door_index;
        let is_correct = index == correct_door_index;
        if is_correct {
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
                self.pending_events.push(GameEvent::HighScoreUpdated {
                    high_score: self.high_score,
                });
            }
            self.set_phase(DoorGamePhase::Correct);
        } else {
            self.set_phase(DoorGamePhase::Incorrect);
        }

        self.pending_events.push(GameEvent::DoorSelected {
            index,
            is_correct,
            correct_door_index,
            score: self.score,
            high_score: self.high_score,
        });
        Ok(Some(is_correct))
    }

    /// Move on from a round result: either the next round or the final screen.
    /// `current_round` is zero-based, so a game of `total_rounds` plays exactly
    /// that many rounds before completing.
    pub fn start_next_round(&mut self) -> Result<DoorGamePhase, ExerciseError> {
        if !self.phase.is_round_result() {
            return Err(ExerciseError::InvalidPhase {
                expected: "correct or incorrect".to_string(),
                actual: self.phase.as_str().to_string(),
            });
        }

        if self.current_round + 1 < self.total_rounds {
            let round = generate_round(self.difficulty, self.current_round + 2, &mut self.rng)?;
            self.current_round += 1;
            self.begin_round(round);
        } else {
            self.set_phase(DoorGamePhase::Completed);
            info!(
                "Door game completed with {}/{} (high score {})",
                self.score, self.total_rounds, self.high_score
            );
            self.pending_events.push(GameEvent::GameCompleted {
                score: self.score,
                high_score: self.high_score,
                total_rounds: self.total_rounds,
            });
        }
        Ok(self.phase)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn state(&self) -> DoorGameState {
        DoorGameState {
            difficulty: self.difficulty,
            current_round: self.current_round,
            total_rounds: self.total_rounds,
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
            round: self.round.clone(),
            memorize_time_seconds: self.timings.memorize_seconds,
            choosing_time_seconds: self.timings.choosing_seconds,
            seconds_remaining: self.seconds_remaining,
        }
    }

    pub fn snapshot(&self) -> DoorGameSnapshot {
        DoorGameSnapshot {
            difficulty: self.difficulty,
            high_score: self.high_score,
        }
    }

    /// Bring back the persisted difficulty and high score; the game itself starts idle
    pub fn restore(&mut self, snapshot: DoorGameSnapshot) {
        self.difficulty = snapshot.difficulty;
        self.high_score = snapshot.high_score;
        self.timings = DoorTimings::for_difficulty(snapshot.difficulty);
        self.round = None;
        self.score = 0;
        self.current_round = 0;
        self.set_phase(DoorGamePhase::Idle);
    }

    fn begin_round(&mut self, round: GameRound) {
        self.pending_events.push(GameEvent::RoundStarted {
            round: round.clone(),
            memorize_seconds: self.timings.memorize_seconds,
        });
        self.round = Some(round);
        self.set_phase(DoorGamePhase::Memorizing);
    }

    fn correct_door_index(&self) -> usize {
        self.round.as_ref().map(|r| r.correct_door_index).unwrap_or_default()
    }

    fn set_phase(&mut self, phase: DoorGamePhase) {
        self.phase = phase;
        self.epoch += 1;
        self.seconds_remaining = match phase {
            DoorGamePhase::Memorizing => Some(self.timings.memorize_seconds),
            DoorGamePhase::Choosing => Some(self.timings.choosing_seconds),
            _ => None,
        };
    }
}
