//! Persisted subsets of each store.
//!
//! Only fields that are safe to resume after a restart live here. Active
//! rounds, quiz sessions, generated levels and the "game started" flag are
//! never written.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::{Difficulty, GameProgress, LearningProgress, ListId, QuizResult, WordList};

/// Stored under the `game-storage` namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoryGameSnapshot {
    pub difficulty: Difficulty,
    pub game_progress: GameProgress,
}

/// Stored under the `vocab-game-storage` namespace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DoorGameSnapshot {
    pub difficulty: Difficulty,
    pub high_score: u32,
}

/// Stored under the `wordlist-storage` namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordListSnapshot {
    pub lists: Vec<WordList>,
    pub quiz_results: Vec<QuizResult>,
    pub learning_progress: BTreeMap<ListId, LearningProgress>,
}
