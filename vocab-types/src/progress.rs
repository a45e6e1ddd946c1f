use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ListId;

/// Immutable history entry written when a quiz finishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizResult {
    pub list_id: ListId,
    pub score: u32, // percentage 0..=100
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub time_spent_seconds: u32,
    pub completed_at: String, // ISO 8601 string
}

/// Per-list aggregate, upserted after learning sessions and quizzes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LearningProgress {
    pub list_id: ListId,
    pub words_learned: u32,
    pub total_words: u32,
    pub mastery_average: u8,
    pub last_practiced_at: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LearningStats {
    pub mastered: u32,
    pub learning: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressOverview {
    pub total_lists: u32,
    pub total_words: u32,
    pub total_quizzes: u32,
    pub average_score: u32,
    pub average_mastery: u32,
}
