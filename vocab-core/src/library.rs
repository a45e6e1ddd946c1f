use anyhow::{Result, anyhow};
use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;
use vocab_types::{
    LearningProgress, LearningStats, ListId, NewWord, NewWordList, ProgressOverview, QuizResult,
    SearchResults, WordEntry, WordId, WordList, WordListSnapshot, WordListSummary, WordListUpdate,
    WordSearchHit, WordUpdate,
};

use crate::scoring::ScoringEngine;

/// Word lists plus the learner's quiz history and per-list progress.
///
/// Every mutation of a list or its words keeps `word_count` equal to the
/// number of words and refreshes `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct WordLibrary {
    lists: Vec<WordList>,
    quiz_results: Vec<QuizResult>,
    learning_progress: BTreeMap<ListId, LearningProgress>,
}

impl WordLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> &[WordList] {
        &self.lists
    }

    pub fn summaries(&self) -> Vec<WordListSummary> {
        self.lists.iter().map(WordListSummary::from).collect()
    }

    pub fn list(&self, list_id: ListId) -> Result<&WordList> {
        self.lists
            .iter()
            .find(|l| l.id == list_id)
            .ok_or_else(|| anyhow!("List not found"))
    }

    fn list_mut(&mut self, list_id: ListId) -> Result<&mut WordList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| anyhow!("List not found"))
    }

    pub fn quiz_results(&self) -> &[QuizResult] {
        &self.quiz_results
    }

    pub fn results_for(&self, list_id: ListId) -> Vec<QuizResult> {
        self.quiz_results
            .iter()
            .filter(|r| r.list_id == list_id)
            .cloned()
            .collect()
    }

    pub fn learning_progress(&self, list_id: ListId) -> Option<&LearningProgress> {
        self.learning_progress.get(&list_id)
    }

    pub fn create_list(&mut self, new_list: NewWordList) -> Result<WordList> {
        let name = new_list.name.trim();
        if name.is_empty() {
            return Err(anyhow!("List name cannot be empty"));
        }

        let now = Utc::now().to_rfc3339();
        let mut words = Vec::with_capacity(new_list.words.len());
        for word in new_list.words {
            words.push(new_entry(word, &now)?);
        }

        let list = WordList {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: new_list.description,
            language: new_list.language,
            word_count: words.len(),
            words,
            created_at: now.clone(),
            updated_at: now,
        };

        info!("Created list {} ({})", list.name, list.id);
        self.lists.push(list.clone());
        Ok(list)
    }

    pub fn update_list(&mut self, list_id: ListId, update: WordListUpdate) -> Result<WordList> {
        let list = self.list_mut(list_id)?;

        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(anyhow!("List name cannot be empty"));
            }
            list.name = name.to_string();
        }
        if let Some(description) = update.description {
            list.description = description;
        }
        if let Some(language) = update.language {
            list.language = language;
        }
        touch(list);

        Ok(list.clone())
    }

    /// Remove a list and its progress row. Quiz history is kept.
    pub fn delete_list(&mut self, list_id: ListId) -> Result<()> {
        let before = self.lists.len();
        self.lists.retain(|l| l.id != list_id);
        if self.lists.len() == before {
            return Err(anyhow!("List not found"));
        }
        self.learning_progress.remove(&list_id);
        info!("Deleted list {}", list_id);
        Ok(())
    }

    pub fn add_word(&mut self, list_id: ListId, word: NewWord) -> Result<WordEntry> {
        let now = Utc::now().to_rfc3339();
        let entry = new_entry(word, &now)?;

        let list = self.list_mut(list_id)?;
        list.words.push(entry.clone());
        touch(list);
        Ok(entry)
    }

    pub fn update_word(&mut self, list_id: ListId, word_id: WordId, update: WordUpdate) -> Result<WordEntry> {
        let list = self.list_mut(list_id)?;
        let word = list
            .words
            .iter_mut()
            .find(|w| w.id == word_id)
            .ok_or_else(|| anyhow!("Word not found"))?;

        if let Some(term) = update.term {
            let term = term.trim();
            if term.is_empty() {
                return Err(anyhow!("Term cannot be empty"));
            }
            word.term = term.to_string();
        }
        if let Some(definition) = update.definition {
            let definition = definition.trim();
            if definition.is_empty() {
                return Err(anyhow!("Definition cannot be empty"));
            }
            word.definition = definition.to_string();
        }
        if let Some(examples) = update.examples {
            word.examples = examples;
        }
        if let Some(notes) = update.notes {
            word.notes = Some(notes).filter(|n| !n.is_empty());
        }

        let updated = word.clone();
        touch(list);
        Ok(updated)
    }

    pub fn delete_word(&mut self, list_id: ListId, word_id: WordId) -> Result<()> {
        let list = self.list_mut(list_id)?;
        let before = list.words.len();
        list.words.retain(|w| w.id != word_id);
        if list.words.len() == before {
            return Err(anyhow!("Word not found"));
        }
        touch(list);
        Ok(())
    }

    /// Flashcard review: "know" raises mastery, "don't know" lowers it
    pub fn review_word(&mut self, list_id: ListId, word_id: WordId, known: bool) -> Result<WordEntry> {
        let list = self.list_mut(list_id)?;
        let word = list
            .words
            .iter_mut()
            .find(|w| w.id == word_id)
            .ok_or_else(|| anyhow!("Word not found"))?;

        word.mastery = ScoringEngine::apply_review(word.mastery, known);
        word.last_practiced_at = Some(Utc::now().to_rfc3339());
        let reviewed = word.clone();
        touch(list);

        debug!("Reviewed '{}' (known: {}), mastery now {}", reviewed.term, known, reviewed.mastery);
        Ok(reviewed)
    }

    /// Close a learning session: every word counts as seen and the list's
    /// mastery mean is cached in its progress row
    pub fn finish_learning(&mut self, list_id: ListId) -> Result<LearningStats> {
        let list = self.list(list_id)?;
        let stats = ScoringEngine::learning_stats(&list.words);
        let progress = LearningProgress {
            list_id,
            words_learned: stats.total,
            total_words: stats.total,
            mastery_average: ScoringEngine::mastery_average(&list.words),
            last_practiced_at: Utc::now().to_rfc3339(),
        };

        self.learning_progress.insert(list_id, progress);
        Ok(stats)
    }

    /// Append a finished quiz to the history and refresh the list's cached mastery mean
    pub fn record_quiz_result(&mut self, result: QuizResult) -> Result<()> {
        let list = self.list(result.list_id)?;
        let mastery_average = ScoringEngine::mastery_average(&list.words);
        let total_words = list.words.len() as u32;

        let words_learned = self
            .learning_progress
            .get(&result.list_id)
            .map(|p| p.words_learned.min(total_words))
            .unwrap_or(0);
        self.learning_progress.insert(
            result.list_id,
            LearningProgress {
                list_id: result.list_id,
                words_learned,
                total_words,
                mastery_average,
                last_practiced_at: result.completed_at.clone(),
            },
        );

        info!(
            "Recorded quiz for list {}: {}/{} ({}%)",
            result.list_id, result.correct_answers, result.total_questions, result.score
        );
        self.quiz_results.push(result);
        Ok(())
    }

    /// Case-insensitive match on list names and descriptions, and on word
    /// terms, definitions and examples
    pub fn search(&self, query: &str) -> SearchResults {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return SearchResults::default();
        }
        let matches = |text: &str| text.to_lowercase().contains(&query);

        let lists = self
            .lists
            .iter()
            .filter(|l| matches(&l.name) || matches(&l.description))
            .map(WordListSummary::from)
            .collect();

        let words = self
            .lists
            .iter()
            .flat_map(|list| {
                list.words
                    .iter()
                    .filter(move |w| {
                        matches(&w.term)
                            || matches(&w.definition)
                            || w.examples.iter().any(|e| matches(e))
                    })
                    .map(move |w| WordSearchHit {
                        list_id: list.id,
                        list_name: list.name.clone(),
                        word: w.clone(),
                    })
            })
            .collect();

        SearchResults { lists, words }
    }

    pub fn overview(&self) -> ProgressOverview {
        let scores: Vec<u32> = self.quiz_results.iter().map(|r| r.score).collect();
        let masteries: Vec<u32> = self
            .learning_progress
            .values()
            .map(|p| p.mastery_average as u32)
            .collect();

        ProgressOverview {
            total_lists: self.lists.len() as u32,
            total_words: self.lists.iter().map(|l| l.word_count as u32).sum(),
            total_quizzes: self.quiz_results.len() as u32,
            average_score: ScoringEngine::average(&scores),
            average_mastery: ScoringEngine::average(&masteries),
        }
    }

    pub fn snapshot(&self) -> WordListSnapshot {
        WordListSnapshot {
            lists: self.lists.clone(),
            quiz_results: self.quiz_results.clone(),
            learning_progress: self.learning_progress.clone(),
        }
    }

    pub fn restore(snapshot: WordListSnapshot) -> Self {
        let mut lists = snapshot.lists;
        // Stored data may predate the count invariant
        for list in &mut lists {
            list.word_count = list.words.len();
        }

        Self {
            lists,
            quiz_results: snapshot.quiz_results,
            learning_progress: snapshot.learning_progress,
        }
    }

    /// Starter content shown on a fresh install
    pub fn with_sample_data() -> Self {
        let now = Utc::now();
        let stamp = |days_ago: i64| (now - Duration::days(days_ago)).to_rfc3339();
        let word = |term: &str, definition: &str, example: &str, mastery: u8| WordEntry {
            id: Uuid::new_v4(),
            term: term.to_string(),
            definition: definition.to_string(),
            examples: vec![example.to_string()],
            notes: None,
            mastery,
            last_practiced_at: None,
            created_at: stamp(0),
        };

        let english = WordList {
            id: Uuid::new_v4(),
            name: "Essential English Vocabulary".to_string(),
            description: "Common English words for everyday use".to_string(),
            language: "English".to_string(),
            words: vec![
                word(
                    "ubiquitous",
                    "Present, appearing, or found everywhere",
                    "Mobile phones are now ubiquitous in modern society",
                    70,
                ),
                word(
                    "ephemeral",
                    "Lasting for a very short time",
                    "The ephemeral nature of fashion trends",
                    40,
                ),
                word(
                    "serendipity",
                    "The occurrence of events by chance in a happy or beneficial way",
                    "The serendipity of meeting an old friend in a foreign country",
                    20,
                ),
            ],
            word_count: 3,
            created_at: stamp(7),
            updated_at: stamp(0),
        };

        let spanish = WordList {
            id: Uuid::new_v4(),
            name: "Business Spanish".to_string(),
            description: "Essential vocabulary for business conversations in Spanish".to_string(),
            language: "Spanish".to_string(),
            words: vec![
                word("negocio", "Business", "Tenemos un negocio exitoso", 80),
                word("reunión", "Meeting", "Tenemos una reunión importante mañana", 60),
            ],
            word_count: 2,
            created_at: stamp(3),
            updated_at: stamp(0),
        };

        let quiz_results = vec![
            QuizResult {
                list_id: english.id,
                score: 80,
                total_questions: 10,
                correct_answers: 8,
                incorrect_answers: 2,
                time_spent_seconds: 120,
                completed_at: stamp(2),
            },
            QuizResult {
                list_id: english.id,
                score: 90,
                total_questions: 10,
                correct_answers: 9,
                incorrect_answers: 1,
                time_spent_seconds: 110,
                completed_at: stamp(0),
            },
        ];

        let mut learning_progress = BTreeMap::new();
        for (list, days_ago) in [(&english, 0), (&spanish, 1)] {
            learning_progress.insert(
                list.id,
                LearningProgress {
                    list_id: list.id,
                    words_learned: list.words.len() as u32,
                    total_words: list.words.len() as u32,
                    mastery_average: ScoringEngine::mastery_average(&list.words),
                    last_practiced_at: stamp(days_ago),
                },
            );
        }

        Self {
            lists: vec![english, spanish],
            quiz_results,
            learning_progress,
        }
    }
}

fn new_entry(word: NewWord, now: &str) -> Result<WordEntry> {
    let term = word.term.trim();
    let definition = word.definition.trim();
    if term.is_empty() || definition.is_empty() {
        return Err(anyhow!("Term and definition are required"));
    }

    Ok(WordEntry {
        id: Uuid::new_v4(),
        term: term.to_string(),
        definition: definition.to_string(),
        examples: word.examples.into_iter().filter(|e| !e.trim().is_empty()).collect(),
        notes: word.notes.filter(|n| !n.trim().is_empty()),
        mastery: 0,
        last_practiced_at: None,
        created_at: now.to_string(),
    })
}

fn touch(list: &mut WordList) {
    list.word_count = list.words.len();
    list.updated_at = Utc::now().to_rfc3339();
}
