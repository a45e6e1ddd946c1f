use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Difficulty, DoorGamePhase, DoorGameState, GameRound};

/// Commands accepted on the door game websocket
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    StartDoorGame { difficulty: Difficulty, total_rounds: u32 },
    SelectDoor { index: usize },
    NextRound,
    ResetDoorGame,
    Heartbeat,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    DoorGameState { state: DoorGameState },
    RoundStarted { round: GameRound, memorize_seconds: u32 },
    TimerTick { phase: DoorGamePhase, seconds_remaining: u32 },
    ChoosingStarted { seconds: u32 },
    RoundResult {
        is_correct: bool,
        timed_out: bool,
        correct_door_index: usize,
        score: u32,
        high_score: u32,
    },
    GameCompleted { score: u32, high_score: u32, total_rounds: u32 },
    HeartbeatAck,
    Error { message: String },
}
