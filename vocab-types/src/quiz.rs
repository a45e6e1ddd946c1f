use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{ListId, QuizResult, WordEntry};

pub const QUIZ_OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizQuestion {
    pub prompt: WordEntry,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuizQuestion {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOutcome {
    pub selected_index: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// What the presentation layer sees of a running quiz
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizSessionView {
    pub session_id: Uuid,
    pub list_id: ListId,
    pub current_index: usize,
    pub total_questions: usize,
    pub question: Option<QuizQuestion>,
    pub answered: Option<AnswerOutcome>,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub finished: bool,
}

/// Reply to moving past an answered question
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum QuizAdvance {
    Next { session: QuizSessionView },
    Finished { result: QuizResult },
}
