use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::{debug, info};
use vocab_types::{
    AnswerOutcome, Difficulty, ExerciseError, GameLevel, GameProgress, LEVEL_COUNT, LevelOutcome,
    LevelPhase, LevelQuestion, StoryGameSnapshot, StoryGameView, StoryQuote,
};

use crate::distractors::build_options;
use crate::scoring::ScoringEngine;
use crate::story_content::{self, TRANSLATION_POOL};

const STORY_OPTION_COUNT: usize = 4;

/// Build the four chapters for a tier. Narrative and vocabulary are fixed;
/// only the option order of each question is random.
pub fn generate_levels<R: Rng + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Vec<GameLevel>, ExerciseError> {
    let chapters = story_content::chapters(difficulty);
    let vocabulary = story_content::vocabulary(difficulty);

    let mut levels = Vec::with_capacity(LEVEL_COUNT as usize);
    for (index, (story, seeds)) in chapters.iter().zip(vocabulary.iter()).enumerate() {
        let mut questions = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let option_set = build_options(
                seed.translation,
                TRANSLATION_POOL.iter().copied(),
                STORY_OPTION_COUNT,
                rng,
            )?;
            questions.push(LevelQuestion {
                word: seed.word.to_string(),
                options: option_set.options,
                correct_answer: seed.translation.to_string(),
            });
        }

        let id = index as u8 + 1;
        levels.push(GameLevel {
            id,
            title: format!("Chapter {}", id),
            story: story.to_string(),
            vocabulary_items: seeds.iter().map(|s| s.to_item()).collect(),
            questions,
        });
    }

    Ok(levels)
}

/// Append one quote per chapter. Chapters without a quote keep their text.
pub fn enrich_levels(levels: &[GameLevel], quotes: &[StoryQuote], character: &str) -> Vec<GameLevel> {
    levels
        .iter()
        .enumerate()
        .map(|(index, level)| {
            let mut level = level.clone();
            if let Some(quote) = quotes.get(index) {
                level.story = format!(
                    "{} {} thought: \"{}\" - {}",
                    level.story, character, quote.content, quote.author
                );
            }
            level
        })
        .collect()
}

/// Level unlock bookkeeping on top of the persisted progress map
pub trait StoryProgress {
    /// Record an attempt. Returns whether it passed; failures never revoke
    /// an earlier completion.
    fn complete_level(&mut self, level_id: u8, correct_count: u32) -> Result<bool, ExerciseError>;
}

impl StoryProgress for GameProgress {
    fn complete_level(&mut self, level_id: u8, correct_count: u32) -> Result<bool, ExerciseError> {
        if level_id == 0 || level_id > LEVEL_COUNT {
            return Err(ExerciseError::LevelNotFound { level_id });
        }
        if !self.is_unlocked(level_id) {
            return Err(ExerciseError::LevelLocked { level_id });
        }
        if !ScoringEngine::passes_level(correct_count) {
            return Ok(false);
        }

        self.completed.insert(level_id, true);
        let next = (level_id + 1).min(LEVEL_COUNT);
        self.current_level = self.current_level.max(next);
        Ok(true)
    }
}

/// One attempt at a level: read the story, answer each question once, see the result
#[derive(Debug, Clone)]
pub struct LevelSession {
    level: GameLevel,
    phase: LevelPhase,
    answers: Vec<AnswerOutcome>,
}

impl LevelSession {
    pub fn new(level: GameLevel) -> Self {
        Self {
            level,
            phase: LevelPhase::Story,
            answers: Vec::new(),
        }
    }

    pub fn level(&self) -> &GameLevel {
        &self.level
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn answers(&self) -> &[AnswerOutcome] {
        &self.answers
    }

    pub fn begin_quiz(&mut self) -> Result<(), ExerciseError> {
        self.expect_phase(LevelPhase::Story)?;
        self.phase = if self.level.questions.is_empty() {
            LevelPhase::Results
        } else {
            LevelPhase::Quiz
        };
        Ok(())
    }

    /// Answer the next unanswered question. The session moves to results
    /// after the last one.
    pub fn answer(&mut self, option_index: usize) -> Result<AnswerOutcome, ExerciseError> {
        self.expect_phase(LevelPhase::Quiz)?;

        let question = &self.level.questions[self.answers.len()];
        if option_index >= question.options.len() {
            return Err(ExerciseError::InvalidChoice {
                index: option_index,
                option_count: question.options.len(),
            });
        }

        let correct_index = question
            .options
            .iter()
            .position(|o| *o == question.correct_answer)
            .unwrap_or(usize::MAX);
        let outcome = AnswerOutcome {
            selected_index: option_index,
            correct_index,
            is_correct: option_index == correct_index,
        };
        self.answers.push(outcome);

        if self.answers.len() == self.level.questions.len() {
            self.phase = LevelPhase::Results;
        }
        Ok(outcome)
    }

    pub fn correct_count(&self) -> u32 {
        self.answers.iter().filter(|a| a.is_correct).count() as u32
    }

    pub fn passed(&self) -> bool {
        self.phase == LevelPhase::Results && ScoringEngine::passes_level(self.correct_count())
    }

    /// Back to the story with all answers cleared
    pub fn retry(&mut self) {
        self.answers.clear();
        self.phase = LevelPhase::Story;
    }

    fn expect_phase(&self, expected: LevelPhase) -> Result<(), ExerciseError> {
        if self.phase != expected {
            return Err(ExerciseError::InvalidPhase {
                expected: format!("{:?}", expected),
                actual: format!("{:?}", self.phase),
            });
        }
        Ok(())
    }
}

/// The story adventure: selected tier, generated chapters and unlock progress
pub struct StoryGame {
    difficulty: Difficulty,
    levels: HashMap<Difficulty, Vec<GameLevel>>,
    progress: GameProgress,
    is_started: bool,
}

impl StoryGame {
    pub fn new(mut rng: StdRng) -> Result<Self, ExerciseError> {
        let mut levels = HashMap::new();
        for difficulty in Difficulty::ALL {
            levels.insert(difficulty, generate_levels(difficulty, &mut rng)?);
        }

        Ok(Self {
            difficulty: Difficulty::default(),
            levels,
            progress: GameProgress::default(),
            is_started: false,
        })
    }

    pub fn with_seed(seed: u64) -> Result<Self, ExerciseError> {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        info!("Story difficulty set to {}", difficulty);
    }

    pub fn is_started(&self) -> bool {
        self.is_started
    }

    pub fn start(&mut self) {
        self.is_started = true;
    }

    /// Clear progress and go back to the start screen. Difficulty is kept.
    pub fn reset(&mut self) {
        self.is_started = false;
        self.progress = GameProgress::default();
        info!("Story progress reset");
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    /// Chapters of the selected tier
    pub fn levels(&self) -> &[GameLevel] {
        self.levels
            .get(&self.difficulty)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn level(&self, level_id: u8) -> Result<&GameLevel, ExerciseError> {
        self.levels()
            .iter()
            .find(|l| l.id == level_id)
            .ok_or(ExerciseError::LevelNotFound { level_id })
    }

    pub fn enter_level(&self, level_id: u8) -> Result<LevelSession, ExerciseError> {
        let level = self.level(level_id)?;
        if !self.progress.is_unlocked(level_id) {
            return Err(ExerciseError::LevelLocked { level_id });
        }
        Ok(LevelSession::new(level.clone()))
    }

    /// Apply a finished session to the progress map
    pub fn finish_level(&mut self, session: &LevelSession) -> Result<LevelOutcome, ExerciseError> {
        if session.phase() != LevelPhase::Results {
            return Err(ExerciseError::InvalidPhase {
                expected: format!("{:?}", LevelPhase::Results),
                actual: format!("{:?}", session.phase()),
            });
        }

        let level_id = session.level().id;
        let correct_count = session.correct_count();
        let passed = self.progress.complete_level(level_id, correct_count)?;
        debug!(
            "Level {} finished with {}/{} correct (passed: {})",
            level_id,
            correct_count,
            session.level().questions.len(),
            passed
        );

        Ok(LevelOutcome {
            level_id,
            correct_count,
            passed,
            game_progress: self.progress.clone(),
        })
    }

    /// Rewrite a tier's chapter text as the base story plus `quotes`.
    /// Vocabulary and questions stay as generated; an empty slice restores
    /// the plain base story.
    pub fn apply_enrichment(&mut self, difficulty: Difficulty, quotes: &[StoryQuote]) {
        let Some(levels) = self.levels.get_mut(&difficulty) else {
            return;
        };

        let chapters = story_content::chapters(difficulty);
        for (level, base) in levels.iter_mut().zip(chapters.iter()) {
            level.story = base.to_string();
        }
        let character = story_content::theme(difficulty).character;
        let enriched = enrich_levels(levels, quotes, character);
        *levels = enriched;
        debug!("Applied {} quotes to {} story", quotes.len(), difficulty);
    }

    pub fn view(&self) -> StoryGameView {
        let theme = story_content::theme(self.difficulty);
        StoryGameView {
            difficulty: self.difficulty,
            is_started: self.is_started,
            character: theme.character.to_string(),
            setting: theme.setting.to_string(),
            goal: theme.goal.to_string(),
            game_progress: self.progress.clone(),
            levels: self.levels().to_vec(),
        }
    }

    pub fn snapshot(&self) -> StoryGameSnapshot {
        StoryGameSnapshot {
            difficulty: self.difficulty,
            game_progress: self.progress.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: StoryGameSnapshot) {
        let mut progress = GameProgress::default();
        for level_id in 1..=LEVEL_COUNT {
            if snapshot.game_progress.is_completed(level_id) {
                progress.completed.insert(level_id, true);
            }
        }
        progress.current_level = snapshot.game_progress.current_level.clamp(1, LEVEL_COUNT);

        self.difficulty = snapshot.difficulty;
        self.progress = progress;
        self.is_started = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn answer_all(session: &mut LevelSession, correct: usize) {
        session.begin_quiz().unwrap();
        for i in 0..session.level().questions.len() {
            let question = &session.level().questions[i];
            let right = question
                .options
                .iter()
                .position(|o| *o == question.correct_answer)
                .unwrap();
            let choice = if i < correct { right } else { (right + 1) % 4 };
            session.answer(choice).unwrap();
        }
    }

    #[test]
    fn test_generate_levels_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        for difficulty in Difficulty::ALL {
            let levels = generate_levels(difficulty, &mut rng).unwrap();
            assert_eq!(levels.len(), 4);

            for (index, level) in levels.iter().enumerate() {
                assert_eq!(level.id as usize, index + 1);
                assert_eq!(level.title, format!("Chapter {}", index + 1));
                assert_eq!(level.vocabulary_items.len(), 3);
                assert_eq!(level.questions.len(), 3);

                for (item, question) in level.vocabulary_items.iter().zip(&level.questions) {
                    assert_eq!(question.word, item.word);
                    assert_eq!(question.correct_answer, item.translation);
                    assert_eq!(question.options.len(), 4);
                    let unique: HashSet<_> = question.options.iter().collect();
                    assert_eq!(unique.len(), 4);
                    let hits = question
                        .options
                        .iter()
                        .filter(|o| **o == question.correct_answer)
                        .count();
                    assert_eq!(hits, 1);
                }
            }
        }
    }

    #[test]
    fn test_enrichment_appends_quotes_only() {
        let mut rng = StdRng::seed_from_u64(3);
        let base = generate_levels(Difficulty::Easy, &mut rng).unwrap();
        let quotes = vec![
            StoryQuote {
                content: "Fortune favors the bold.".to_string(),
                author: "Virgil".to_string(),
            },
            StoryQuote {
                content: "Know thyself.".to_string(),
                author: "Socrates".to_string(),
            },
        ];

        let enriched = enrich_levels(&base, &quotes, "Ali");
        assert_eq!(
            enriched[0].story,
            format!("{} Ali thought: \"Fortune favors the bold.\" - Virgil", base[0].story)
        );
        assert!(enriched[1].story.ends_with("Ali thought: \"Know thyself.\" - Socrates"));
        // Chapters without a quote are untouched
        assert_eq!(enriched[2].story, base[2].story);
        assert_eq!(enriched[3].story, base[3].story);

        for (before, after) in base.iter().zip(&enriched) {
            assert_eq!(before.vocabulary_items, after.vocabulary_items);
            assert_eq!(before.questions, after.questions);
        }
    }

    #[test]
    fn test_progress_unlocks_next_level() {
        let mut progress = GameProgress::default();
        assert!(progress.complete_level(1, 2).unwrap());
        assert!(progress.is_completed(1));
        assert!(progress.is_unlocked(2));
        assert_eq!(progress.current_level, 2);

        // Replaying an earlier level does not move current_level backwards
        assert!(progress.complete_level(1, 3).unwrap());
        assert_eq!(progress.current_level, 2);
    }

    #[test]
    fn test_failing_never_revokes_completion() {
        let mut progress = GameProgress::default();
        progress.complete_level(1, 3).unwrap();

        assert!(!progress.complete_level(1, 0).unwrap());
        assert!(progress.is_completed(1));
        assert_eq!(progress.current_level, 2);
    }

    #[test]
    fn test_locked_and_unknown_levels() {
        let mut progress = GameProgress::default();
        assert_eq!(
            progress.complete_level(3, 3),
            Err(ExerciseError::LevelLocked { level_id: 3 })
        );
        assert_eq!(
            progress.complete_level(5, 3),
            Err(ExerciseError::LevelNotFound { level_id: 5 })
        );
    }

    #[test]
    fn test_last_level_keeps_current_level_in_range() {
        let mut progress = GameProgress::default();
        for level_id in 1..=4 {
            progress.complete_level(level_id, 2).unwrap();
        }
        assert_eq!(progress.current_level, 4);
        assert!(progress.is_finished());
    }

    #[test]
    fn test_level_session_phases() {
        let game = StoryGame::with_seed(1).unwrap();
        let mut session = game.enter_level(1).unwrap();
        assert_eq!(session.phase(), LevelPhase::Story);
        assert!(matches!(session.answer(0), Err(ExerciseError::InvalidPhase { .. })));

        answer_all(&mut session, 1);
        assert_eq!(session.phase(), LevelPhase::Results);
        assert_eq!(session.correct_count(), 1);
        assert!(!session.passed());
        assert!(matches!(session.answer(0), Err(ExerciseError::InvalidPhase { .. })));

        session.retry();
        assert_eq!(session.phase(), LevelPhase::Story);
        assert!(session.answers().is_empty());

        answer_all(&mut session, 2);
        assert!(session.passed());
    }

    #[test]
    fn test_story_game_locks_and_completes() {
        let mut game = StoryGame::with_seed(9).unwrap();
        assert!(matches!(
            game.enter_level(2),
            Err(ExerciseError::LevelLocked { level_id: 2 })
        ));
        assert!(matches!(
            game.enter_level(7),
            Err(ExerciseError::LevelNotFound { level_id: 7 })
        ));

        let mut session = game.enter_level(1).unwrap();
        assert!(matches!(game.finish_level(&session), Err(ExerciseError::InvalidPhase { .. })));

        answer_all(&mut session, 3);
        let outcome = game.finish_level(&session).unwrap();
        assert!(outcome.passed);
        assert_eq!(outcome.correct_count, 3);
        assert_eq!(outcome.game_progress.current_level, 2);
        assert!(game.enter_level(2).is_ok());
    }

    #[test]
    fn test_snapshot_round_trip_drops_started_flag() {
        let mut game = StoryGame::with_seed(2).unwrap();
        game.set_difficulty(Difficulty::Hard);
        game.start();
        let mut session = game.enter_level(1).unwrap();
        answer_all(&mut session, 2);
        game.finish_level(&session).unwrap();

        let json = serde_json::to_string(&game.snapshot()).unwrap();
        assert!(!json.contains("is_started"));

        let mut restored = StoryGame::with_seed(5).unwrap();
        restored.restore(serde_json::from_str(&json).unwrap());
        assert_eq!(restored.difficulty(), Difficulty::Hard);
        assert!(restored.progress().is_completed(1));
        assert_eq!(restored.progress().current_level, 2);
        assert!(!restored.is_started());
    }

    #[test]
    fn test_reset_clears_progress_but_keeps_difficulty() {
        let mut game = StoryGame::with_seed(2).unwrap();
        game.set_difficulty(Difficulty::Medium);
        game.start();
        game.progress.complete_level(1, 3).unwrap();

        game.reset();
        assert_eq!(game.difficulty(), Difficulty::Medium);
        assert!(!game.is_started());
        assert_eq!(*game.progress(), GameProgress::default());
    }

    #[test]
    fn test_empty_enrichment_restores_base_story() {
        let mut game = StoryGame::with_seed(4).unwrap();
        let quotes = vec![StoryQuote {
            content: "Stay curious.".to_string(),
            author: "Anon".to_string(),
        }];
        game.apply_enrichment(Difficulty::Easy, &quotes);
        assert!(game.level(1).unwrap().story.contains("Stay curious."));

        game.apply_enrichment(Difficulty::Easy, &[]);
        assert_eq!(
            game.level(1).unwrap().story,
            story_content::chapters(Difficulty::Easy)[0]
        );
    }

    #[test]
    fn test_enrichment_keeps_questions_and_vocabulary() {
        let mut game = StoryGame::with_seed(4).unwrap();
        let before = game.levels().to_vec();
        let quotes = vec![
            StoryQuote {
                content: "Fortune favors the bold.".to_string(),
                author: "Virgil".to_string(),
            },
            StoryQuote {
                content: "Know thyself.".to_string(),
                author: "Socrates".to_string(),
            },
        ];

        game.apply_enrichment(Difficulty::Easy, &quotes);
        game.apply_enrichment(Difficulty::Easy, &quotes);

        let after = game.levels();
        for (base, enriched) in before.iter().zip(after) {
            assert_eq!(base.questions, enriched.questions);
            assert_eq!(base.vocabulary_items, enriched.vocabulary_items);
        }
        // Quotes are not stacked by a second enrichment
        assert_eq!(after[0].story.matches("Fortune favors the bold.").count(), 1);
        assert!(after[1].story.contains("Know thyself."));
        assert_eq!(after[2].story, before[2].story);
    }
}
