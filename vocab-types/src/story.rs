use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::Difficulty;

pub const LEVEL_COUNT: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VocabularyItem {
    pub word: String,
    pub definition: String,
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LevelQuestion {
    pub word: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameLevel {
    pub id: u8, // 1..=4
    pub title: String,
    pub story: String,
    pub vocabulary_items: Vec<VocabularyItem>,
    pub questions: Vec<LevelQuestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LevelPhase {
    Story,
    Quiz,
    Results,
}

/// Level completion flags plus the level the map should highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameProgress {
    pub completed: BTreeMap<u8, bool>,
    pub current_level: u8,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self {
            completed: (1..=LEVEL_COUNT).map(|id| (id, false)).collect(),
            current_level: 1,
        }
    }
}

impl GameProgress {
    pub fn is_completed(&self, level_id: u8) -> bool {
        self.completed.get(&level_id).copied().unwrap_or(false)
    }

    /// Level 1 is always open; every later level needs its predecessor completed
    pub fn is_unlocked(&self, level_id: u8) -> bool {
        match level_id {
            1 => true,
            id if id > 1 && id <= LEVEL_COUNT => self.is_completed(id - 1),
            _ => false,
        }
    }

    pub fn is_finished(&self) -> bool {
        (1..=LEVEL_COUNT).all(|id| self.is_completed(id))
    }

    pub fn completed_count(&self) -> usize {
        (1..=LEVEL_COUNT).filter(|id| self.is_completed(*id)).count()
    }
}

/// Quote used to flavour a chapter; matches the quote service's JSON items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoryQuote {
    pub content: String,
    pub author: String,
}

/// Result of grading one attempt at a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LevelOutcome {
    pub level_id: u8,
    pub correct_count: u32,
    pub passed: bool,
    pub game_progress: GameProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoryGameView {
    pub difficulty: Difficulty,
    pub is_started: bool,
    pub character: String,
    pub setting: String,
    pub goal: String,
    pub game_progress: GameProgress,
    pub levels: Vec<GameLevel>,
}
