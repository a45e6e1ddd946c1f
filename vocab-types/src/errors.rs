use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Failures of the exercise generators and game state machines.
///
/// None of these are fatal: sampling errors surface as a "not enough
/// content" state, enrichment errors fall back to the base story.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExerciseError {
    #[error("not enough items to sample: need {required}, have {available}")]
    InsufficientPoolSize { required: usize, available: usize },
    #[error("not enough distinct distractors: need {required}, have {available}")]
    InsufficientDistractors { required: usize, available: usize },
    #[error("story enrichment unavailable: {reason}")]
    EnrichmentUnavailable { reason: String },
    #[error("level {level_id} is locked")]
    LevelLocked { level_id: u8 },
    #[error("level {level_id} does not exist")]
    LevelNotFound { level_id: u8 },
    #[error("choice {index} is out of range for {option_count} options")]
    InvalidChoice { index: usize, option_count: usize },
    #[error("expected phase {expected}, current phase is {actual}")]
    InvalidPhase { expected: String, actual: String },
}

impl ExerciseError {
    /// Errors the presentation layer should render as "add more content"
    pub fn is_content_shortage(&self) -> bool {
        matches!(
            self,
            ExerciseError::InsufficientPoolSize { .. } | ExerciseError::InsufficientDistractors { .. }
        )
    }
}
