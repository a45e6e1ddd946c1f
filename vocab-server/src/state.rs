use std::sync::Arc;
use std::time::Duration;

use vocab_persistence::Stores;

use crate::config::Config;
use crate::door_service::DoorService;
use crate::enrichment::QuoteClient;
use crate::events::EventPublisher;
use crate::library_service::LibraryService;
use crate::settings_service::SettingsService;
use crate::story_service::StoryService;
use crate::websocket::ConnectionManager;

/// Every service the routes reach, restored from storage
#[derive(Clone)]
pub struct AppState {
    pub connections: Arc<ConnectionManager>,
    pub library: LibraryService,
    pub story: StoryService,
    pub doors: DoorService,
    pub settings: SettingsService,
}

impl AppState {
    pub async fn load(config: &Config, stores: Stores) -> anyhow::Result<Self> {
        let connections = Arc::new(ConnectionManager::new());
        let events = Arc::new(EventPublisher::with_default_handlers(connections.clone()));
        let quotes = QuoteClient::new(
            config.quote_api_url.clone(),
            Duration::from_secs(config.enrichment_timeout_seconds),
        );

        let library = LibraryService::load(
            stores.word_lists,
            events.clone(),
            config.quiz_max_questions,
            config.seed_sample_data,
        )
        .await?;
        let story = StoryService::load(stores.story, quotes, events.clone()).await?;
        let doors = DoorService::load(stores.doors, events, config.default_total_rounds).await?;
        let settings = SettingsService::load(stores.settings).await?;

        Ok(Self {
            connections,
            library,
            story,
            doors,
            settings,
        })
    }
}
