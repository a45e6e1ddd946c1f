#![allow(dead_code)]

use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use vocab_core::{DoorGame, GameEvent, GameEventHandler, WordLibrary};
use vocab_types::{Difficulty, ListId, NewWord, NewWordList, WordEntry, WordList};

/// Creates a word with the given definition and mastery
pub fn create_test_word(term: &str, definition: &str, mastery: u8) -> WordEntry {
    WordEntry {
        id: Uuid::new_v4(),
        term: term.to_string(),
        definition: definition.to_string(),
        examples: Vec::new(),
        notes: None,
        mastery,
        last_practiced_at: None,
        created_at: Utc::now().to_rfc3339(),
    }
}

/// Creates a list holding `count` words with distinct definitions
pub fn create_test_list(count: usize) -> WordList {
    let words: Vec<WordEntry> = (0..count)
        .map(|i| create_test_word(&format!("term-{}", i), &format!("definition-{}", i), 0))
        .collect();
    let now = Utc::now().to_rfc3339();

    WordList {
        id: Uuid::new_v4(),
        name: "Test list".to_string(),
        description: "Words for tests".to_string(),
        language: "English".to_string(),
        word_count: words.len(),
        words,
        created_at: now.clone(),
        updated_at: now,
    }
}

/// Creates a library with one list of `count` words
pub fn create_test_library(count: usize) -> (WordLibrary, ListId) {
    let mut library = WordLibrary::new();
    let list = library
        .create_list(NewWordList {
            name: "Practice".to_string(),
            description: String::new(),
            language: "Turkish".to_string(),
            words: (0..count)
                .map(|i| NewWord {
                    term: format!("kelime-{}", i),
                    definition: format!("word-{}", i),
                    examples: Vec::new(),
                    notes: None,
                })
                .collect(),
        })
        .unwrap();
    (library, list.id)
}

/// Creates a door game already waiting for a door pick
pub fn create_choosing_game(difficulty: Difficulty, total_rounds: u32) -> DoorGame {
    let mut game = DoorGame::with_seed(2024);
    game.initialize(difficulty, total_rounds).unwrap();
    game.finish_memorizing();
    game
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
