use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{ListId, WordId};

pub const MAX_MASTERY: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordEntry {
    pub id: WordId,
    pub term: String,
    pub definition: String,
    pub examples: Vec<String>,
    pub notes: Option<String>,
    pub mastery: u8, // 0..=100
    pub last_practiced_at: Option<String>, // ISO 8601 string
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordList {
    pub id: ListId,
    pub name: String,
    pub description: String,
    pub language: String,
    pub words: Vec<WordEntry>,
    pub word_count: usize, // always words.len()
    pub created_at: String,
    pub updated_at: String,
}

impl WordList {
    pub fn word(&self, word_id: WordId) -> Option<&WordEntry> {
        self.words.iter().find(|w| w.id == word_id)
    }
}

/// Lightweight listing row, without the words themselves
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordListSummary {
    pub id: ListId,
    pub name: String,
    pub description: String,
    pub language: String,
    pub word_count: usize,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&WordList> for WordListSummary {
    fn from(list: &WordList) -> Self {
        WordListSummary {
            id: list.id,
            name: list.name.clone(),
            description: list.description.clone(),
            language: list.language.clone(),
            word_count: list.word_count,
            created_at: list.created_at.clone(),
            updated_at: list.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewWordList {
    pub name: String,
    pub description: String,
    pub language: String,
    #[serde(default)]
    pub words: Vec<NewWord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordListUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewWord {
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub examples: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordUpdate {
    pub term: Option<String>,
    pub definition: Option<String>,
    pub examples: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordSearchHit {
    pub list_id: ListId,
    pub list_name: String,
    pub word: WordEntry,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchResults {
    pub lists: Vec<WordListSummary>,
    pub words: Vec<WordSearchHit>,
}
