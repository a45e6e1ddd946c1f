use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use rand::rng;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;
use vocab_core::{GameEvent, QuizSession, SessionStep, WordLibrary};
use vocab_persistence::WordListStore;
use vocab_types::{
    AnswerOutcome, LearningStats, ListId, NewWord, NewWordList, ProgressOverview, QuizAdvance,
    QuizResult, QuizSessionView, SearchResults, WordEntry, WordId, WordList, WordListSummary,
    WordListUpdate, WordUpdate,
};

use crate::error::ApiError;
use crate::events::EventPublisher;

/// A running quiz and when it was last used
struct ActiveQuiz {
    session: QuizSession,
    last_activity: Instant,
}

impl ActiveQuiz {
    fn touch(&mut self) -> &mut QuizSession {
        self.last_activity = Instant::now();
        &mut self.session
    }
}

/// Word lists, flashcard reviews and running quizzes
#[derive(Clone)]
pub struct LibraryService {
    library: Arc<RwLock<WordLibrary>>,
    sessions: Arc<DashMap<Uuid, ActiveQuiz>>,
    store: WordListStore,
    events: Arc<EventPublisher>,
    max_questions: usize,
}

impl LibraryService {
    pub fn new(
        library: WordLibrary,
        store: WordListStore,
        events: Arc<EventPublisher>,
        max_questions: usize,
    ) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
            sessions: Arc::new(DashMap::new()),
            store,
            events,
            max_questions: max_questions.max(1),
        }
    }

    /// Restore stored lists. A first run starts from the sample lists when
    /// `seed_sample_data` is set.
    pub async fn load(
        store: WordListStore,
        events: Arc<EventPublisher>,
        max_questions: usize,
        seed_sample_data: bool,
    ) -> anyhow::Result<Self> {
        let library = match store.load_optional().await? {
            Some(snapshot) => WordLibrary::restore(snapshot),
            // Seed a first run only; an unreadable document is not overwritten
            None if seed_sample_data && !store.is_present().await? => {
                info!("No stored word lists, seeding sample data");
                let library = WordLibrary::with_sample_data();
                store.save(&library.snapshot()).await?;
                library
            }
            None => WordLibrary::new(),
        };
        info!("Loaded {} word lists", library.lists().len());

        Ok(Self::new(library, store, events, max_questions))
    }

    pub async fn summaries(&self) -> Vec<WordListSummary> {
        self.library.read().await.summaries()
    }

    pub async fn list(&self, list_id: ListId) -> Result<WordList, ApiError> {
        let library = self.library.read().await;
        library.list(list_id).cloned().map_err(ApiError::from_library)
    }

    pub async fn create_list(&self, new_list: NewWordList) -> Result<WordList, ApiError> {
        self.mutate(|library| library.create_list(new_list)).await
    }

    pub async fn update_list(
        &self,
        list_id: ListId,
        update: WordListUpdate,
    ) -> Result<WordList, ApiError> {
        self.mutate(|library| library.update_list(list_id, update))
            .await
    }

    pub async fn delete_list(&self, list_id: ListId) -> Result<(), ApiError> {
        self.mutate(|library| library.delete_list(list_id)).await?;
        self.sessions
            .retain(|_, active| active.session.list_id() != list_id);
        Ok(())
    }

    pub async fn add_word(&self, list_id: ListId, word: NewWord) -> Result<WordEntry, ApiError> {
        self.mutate(|library| library.add_word(list_id, word)).await
    }

    pub async fn update_word(
        &self,
        list_id: ListId,
        word_id: WordId,
        update: WordUpdate,
    ) -> Result<WordEntry, ApiError> {
        self.mutate(|library| library.update_word(list_id, word_id, update))
            .await
    }

    pub async fn delete_word(&self, list_id: ListId, word_id: WordId) -> Result<(), ApiError> {
        self.mutate(|library| library.delete_word(list_id, word_id))
            .await
    }

    pub async fn review_word(
        &self,
        list_id: ListId,
        word_id: WordId,
        known: bool,
    ) -> Result<WordEntry, ApiError> {
        self.mutate(|library| library.review_word(list_id, word_id, known))
            .await
    }

    pub async fn finish_learning(&self, list_id: ListId) -> Result<LearningStats, ApiError> {
        self.mutate(|library| library.finish_learning(list_id))
            .await
    }

    pub async fn results_for(&self, list_id: ListId) -> Result<Vec<QuizResult>, ApiError> {
        let library = self.library.read().await;
        library.list(list_id).map_err(ApiError::from_library)?;
        Ok(library.results_for(list_id))
    }

    pub async fn search(&self, query: &str) -> SearchResults {
        self.library.read().await.search(query)
    }

    pub async fn overview(&self) -> ProgressOverview {
        self.library.read().await.overview()
    }

    pub async fn start_quiz(&self, list_id: ListId) -> Result<QuizSessionView, ApiError> {
        let session = {
            let library = self.library.read().await;
            let list = library.list(list_id).map_err(ApiError::from_library)?;
            QuizSession::start(list, self.max_questions, &mut rng(), Utc::now())?
        };

        let view = session.view();
        debug!(
            "Quiz {} started on list {} with {} questions",
            session.id(),
            list_id,
            session.questions().len()
        );
        self.sessions.insert(
            session.id(),
            ActiveQuiz {
                session,
                last_activity: Instant::now(),
            },
        );
        Ok(view)
    }

    pub fn quiz(&self, session_id: Uuid) -> Result<QuizSessionView, ApiError> {
        self.sessions
            .get(&session_id)
            .map(|active| active.session.view())
            .ok_or_else(|| ApiError::NotFound("Quiz session not found".to_string()))
    }

    /// `None` when the current question was already answered
    pub fn answer(
        &self,
        session_id: Uuid,
        option_index: usize,
    ) -> Result<Option<AnswerOutcome>, ApiError> {
        let mut active = self
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| ApiError::NotFound("Quiz session not found".to_string()))?;
        Ok(active.touch().answer(option_index)?)
    }

    /// Move past the answered question. After the last one the result is
    /// recorded and the session closed.
    pub async fn next(&self, session_id: Uuid) -> Result<QuizAdvance, ApiError> {
        let result = {
            let mut active = self
                .sessions
                .get_mut(&session_id)
                .ok_or_else(|| ApiError::NotFound("Quiz session not found".to_string()))?;
            let session = active.touch();

            match session.advance()? {
                SessionStep::Next(_) => {
                    return Ok(QuizAdvance::Next {
                        session: session.view(),
                    });
                }
                SessionStep::Finished => session.finish(Utc::now()),
            }
        };
        self.sessions.remove(&session_id);

        let list_id = result.list_id;
        self.mutate(|library| library.record_quiz_result(result.clone()))
            .await?;
        self.events.publish(GameEvent::QuizCompleted {
            list_id,
            result: result.clone(),
        });

        Ok(QuizAdvance::Finished { result })
    }

    pub fn active_quiz_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop quizzes that saw no answer or advance within `timeout`
    pub fn cleanup_stale_quizzes(&self, timeout: Duration) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, active| active.last_activity.elapsed() < timeout);

        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            info!("Removed {} abandoned quiz sessions", removed);
        }
    }

    /// Apply a change and write the whole library back to the store
    async fn mutate<T, F>(&self, change: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut WordLibrary) -> anyhow::Result<T>,
    {
        let (value, snapshot) = {
            let mut library = self.library.write().await;
            let value = change(&mut library).map_err(ApiError::from_library)?;
            (value, library.snapshot())
        };

        self.store
            .save(&snapshot)
            .await
            .map_err(ApiError::storage)?;
        Ok(value)
    }
}
