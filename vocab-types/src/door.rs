use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Difficulty;

pub const DOOR_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordPair {
    pub english: String,
    pub turkish: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Door {
    pub english: String,
    pub turkish: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameRound {
    pub round_number: u32,
    pub word_pairs: Vec<WordPair>,
    pub doors: Vec<Door>,
    pub correct_door_index: usize,
}

impl GameRound {
    pub fn correct_door(&self) -> &Door {
        &self.doors[self.correct_door_index]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DoorGamePhase {
    Idle,
    Memorizing,
    Choosing,
    Correct,
    Incorrect,
    Completed,
}

impl DoorGamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoorGamePhase::Idle => "idle",
            DoorGamePhase::Memorizing => "memorizing",
            DoorGamePhase::Choosing => "choosing",
            DoorGamePhase::Correct => "correct",
            DoorGamePhase::Incorrect => "incorrect",
            DoorGamePhase::Completed => "completed",
        }
    }

    /// Round is over and waiting for `start_next_round`
    pub fn is_round_result(&self) -> bool {
        matches!(self, DoorGamePhase::Correct | DoorGamePhase::Incorrect)
    }
}

/// Read model of the door game handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DoorGameState {
    pub difficulty: Difficulty,
    pub current_round: u32,
    pub total_rounds: u32,
    pub score: u32,
    pub high_score: u32,
    pub phase: DoorGamePhase,
    pub round: Option<GameRound>,
    pub memorize_time_seconds: u32,
    pub choosing_time_seconds: u32,
    pub seconds_remaining: Option<u32>,
}
