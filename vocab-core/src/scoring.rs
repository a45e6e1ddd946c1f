use chrono::{DateTime, Utc};
use vocab_types::{LearningStats, MAX_MASTERY, WordEntry};

/// Mastery added when the learner marks a card as known
pub const MASTERY_GAIN: u8 = 20;
/// Mastery removed when the learner marks a card as unknown
pub const MASTERY_LOSS: u8 = 10;
/// Words at or above this mastery count as mastered
pub const MASTERED_THRESHOLD: u8 = 80;
/// Correct answers (out of three) needed to pass a story level
pub const LEVEL_PASS_THRESHOLD: u32 = 2;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Percentage of correct answers, rounded half up. Zero when nothing was asked.
    pub fn percentage(correct: u32, total: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        let correct = correct.min(total) as u64;
        let total = total as u64;
        ((200 * correct + total) / (2 * total)) as u32
    }

    /// New mastery after one flashcard review
    pub fn apply_review(mastery: u8, known: bool) -> u8 {
        if known {
            mastery.saturating_add(MASTERY_GAIN).min(MAX_MASTERY)
        } else {
            mastery.saturating_sub(MASTERY_LOSS)
        }
    }

    /// Mean rounded half up, 0 when there is nothing to average
    pub fn average(values: &[u32]) -> u32 {
        if values.is_empty() {
            return 0;
        }
        let sum: u64 = values.iter().map(|v| *v as u64).sum();
        let len = values.len() as u64;
        ((2 * sum + len) / (2 * len)) as u32
    }

    pub fn mastery_average(words: &[WordEntry]) -> u8 {
        let masteries: Vec<u32> = words.iter().map(|w| w.mastery as u32).collect();
        Self::average(&masteries).min(MAX_MASTERY as u32) as u8
    }

    pub fn learning_stats(words: &[WordEntry]) -> LearningStats {
        let mastered = words
            .iter()
            .filter(|w| w.mastery >= MASTERED_THRESHOLD)
            .count() as u32;
        let total = words.len() as u32;

        LearningStats {
            mastered,
            learning: total - mastered,
            total,
        }
    }

    pub fn passes_level(correct_count: u32) -> bool {
        correct_count >= LEVEL_PASS_THRESHOLD
    }

    /// Whole seconds between two instants; a clock that went backwards yields 0
    pub fn elapsed_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
        let seconds = (end - start).num_seconds();
        seconds.clamp(0, u32::MAX as i64) as u32
    }
}
