use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;
use vocab_types::{
    AnswerOutcome, ExerciseError, ListId, QUIZ_OPTION_COUNT, QuizQuestion, QuizResult,
    QuizSessionView, WordList,
};

use crate::distractors::{build_options, distinct_distractors};
use crate::sampler::shuffle;
use crate::scoring::ScoringEngine;

/// A quiz needs one correct definition plus three distinct wrong ones
pub const MIN_QUIZ_WORDS: usize = QUIZ_OPTION_COUNT;
pub const DEFAULT_MAX_QUESTIONS: usize = 10;

/// Build a fresh, randomly ordered quiz over `list`.
///
/// Every question shows a term with four definitions taken from the same
/// list. Calling this twice yields different orderings.
pub fn generate_quiz<R: Rng + ?Sized>(
    list: &WordList,
    max_questions: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, ExerciseError> {
    if list.words.len() < MIN_QUIZ_WORDS {
        return Err(ExerciseError::InsufficientPoolSize {
            required: MIN_QUIZ_WORDS,
            available: list.words.len(),
        });
    }

    let selected: Vec<_> = shuffle(&list.words, rng)
        .into_iter()
        .take(max_questions.min(list.words.len()))
        .collect();

    // Lists with repeated definitions can pass the size check and still be
    // unable to fill four distinct options
    for word in &selected {
        let available =
            distinct_distractors(&word.definition, sibling_definitions(list, word.id)).len();
        if available < QUIZ_OPTION_COUNT - 1 {
            return Err(ExerciseError::InsufficientDistractors {
                required: QUIZ_OPTION_COUNT - 1,
                available,
            });
        }
    }

    let mut questions = Vec::with_capacity(selected.len());
    for word in selected {
        let option_set = build_options(
            &word.definition,
            sibling_definitions(list, word.id),
            QUIZ_OPTION_COUNT,
            rng,
        )?;
        questions.push(QuizQuestion {
            prompt: word,
            options: option_set.options,
            correct_index: option_set.correct_index,
        });
    }

    debug!("Generated {} quiz questions for list {}", questions.len(), list.id);
    Ok(questions)
}

fn sibling_definitions(list: &WordList, word_id: Uuid) -> impl Iterator<Item = &str> {
    list.words
        .iter()
        .filter(move |w| w.id != word_id)
        .map(|w| w.definition.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Next(usize),
    Finished,
}

/// One run through a generated quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    list_id: ListId,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    answered: Option<AnswerOutcome>,
    correct_count: u32,
    incorrect_count: u32,
    started_at: DateTime<Utc>,
    finished: bool,
}

impl QuizSession {
    pub fn new(list_id: ListId, questions: Vec<QuizQuestion>, started_at: DateTime<Utc>) -> Self {
        let finished = questions.is_empty();
        Self {
            id: Uuid::new_v4(),
            list_id,
            questions,
            current_index: 0,
            answered: None,
            correct_count: 0,
            incorrect_count: 0,
            started_at,
            finished,
        }
    }

    pub fn start<R: Rng + ?Sized>(
        list: &WordList,
        max_questions: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Self, ExerciseError> {
        let questions = generate_quiz(list, max_questions, rng)?;
        Ok(Self::new(list.id, questions, now))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn list_id(&self) -> ListId {
        self.list_id
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    /// Record the answer to the current question.
    ///
    /// Only the first tap counts; repeated taps before `advance` and taps on a
    /// finished session return `Ok(None)`.
    pub fn answer(&mut self, option_index: usize) -> Result<Option<AnswerOutcome>, ExerciseError> {
        if self.finished || self.answered.is_some() {
            return Ok(None);
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return Ok(None);
        };

        if option_index >= question.options.len() {
            return Err(ExerciseError::InvalidChoice {
                index: option_index,
                option_count: question.options.len(),
            });
        }

        let is_correct = option_index == question.correct_index;
        if is_correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }

        let outcome = AnswerOutcome {
            selected_index: option_index,
            correct_index: question.correct_index,
            is_correct,
        };
        self.answered = Some(outcome);
        Ok(Some(outcome))
    }

    /// Move past an answered question
    pub fn advance(&mut self) -> Result<SessionStep, ExerciseError> {
        if self.finished {
            return Ok(SessionStep::Finished);
        }
        if self.answered.is_none() {
            return Err(ExerciseError::InvalidPhase {
                expected: "answered".to_string(),
                actual: "unanswered".to_string(),
            });
        }

        self.answered = None;
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            Ok(SessionStep::Next(self.current_index))
        } else {
            self.finished = true;
            Ok(SessionStep::Finished)
        }
    }

    /// History entry for this session. Questions never answered count as incorrect.
    pub fn finish(&self, now: DateTime<Utc>) -> QuizResult {
        let total = self.questions.len() as u32;
        let correct = self.correct_count.min(total);

        QuizResult {
            list_id: self.list_id,
            score: ScoringEngine::percentage(correct, total),
            total_questions: total,
            correct_answers: correct,
            incorrect_answers: total - correct,
            time_spent_seconds: ScoringEngine::elapsed_seconds(self.started_at, now),
            completed_at: now.to_rfc3339(),
        }
    }

    pub fn view(&self) -> QuizSessionView {
        QuizSessionView {
            session_id: self.id,
            list_id: self.list_id,
            current_index: self.current_index,
            total_questions: self.questions.len(),
            question: self.current_question().cloned(),
            answered: self.answered,
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
            finished: self.finished,
        }
    }
}
