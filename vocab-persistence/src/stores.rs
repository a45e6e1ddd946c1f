use std::marker::PhantomData;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;
use vocab_types::{AppSettings, DoorGameSnapshot, StoryGameSnapshot, WordListSnapshot};

use crate::repositories::KeyValueRepository;

pub const STORY_GAME_NAMESPACE: &str = "game-storage";
pub const DOOR_GAME_NAMESPACE: &str = "vocab-game-storage";
pub const WORD_LIST_NAMESPACE: &str = "wordlist-storage";
pub const SETTINGS_NAMESPACE: &str = "settings-storage";

/// A single JSON document kept under a fixed namespace
pub struct JsonStore<T> {
    repo: KeyValueRepository,
    namespace: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonStore<T> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            namespace: self.namespace,
            _marker: PhantomData,
        }
    }
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(repo: KeyValueRepository, namespace: &'static str) -> Self {
        Self {
            repo,
            namespace,
            _marker: PhantomData,
        }
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Whether a document is stored at all, readable or not
    pub async fn is_present(&self) -> Result<bool> {
        Ok(self.repo.get(self.namespace).await?.is_some())
    }

    /// `None` when nothing usable is stored. A corrupt document is logged and
    /// treated as missing.
    pub async fn load_optional(&self) -> Result<Option<T>> {
        let Some(raw) = self.repo.get(self.namespace).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(
                    "Discarding unreadable {} document: {}",
                    self.namespace, e
                );
                Ok(None)
            }
        }
    }

    pub async fn load(&self) -> Result<T> {
        Ok(self.load_optional().await?.unwrap_or_default())
    }

    pub async fn save(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.repo.put(self.namespace, json).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.repo.delete(self.namespace).await?;
        Ok(())
    }
}

pub type StoryGameStore = JsonStore<StoryGameSnapshot>;
pub type DoorGameStore = JsonStore<DoorGameSnapshot>;
pub type WordListStore = JsonStore<WordListSnapshot>;
pub type SettingsStore = JsonStore<AppSettings>;

/// One typed store per persisted namespace
#[derive(Clone)]
pub struct Stores {
    pub story: StoryGameStore,
    pub doors: DoorGameStore,
    pub word_lists: WordListStore,
    pub settings: SettingsStore,
}

impl Stores {
    pub fn new(repo: KeyValueRepository) -> Self {
        Self {
            story: JsonStore::new(repo.clone(), STORY_GAME_NAMESPACE),
            doors: JsonStore::new(repo.clone(), DOOR_GAME_NAMESPACE),
            word_lists: JsonStore::new(repo.clone(), WORD_LIST_NAMESPACE),
            settings: JsonStore::new(repo, SETTINGS_NAMESPACE),
        }
    }
}
