use std::sync::Arc;

use tokio::sync::RwLock;
use vocab_persistence::SettingsStore;
use vocab_types::{AppSettings, SettingsUpdate};

use crate::error::ApiError;

#[derive(Clone)]
pub struct SettingsService {
    settings: Arc<RwLock<AppSettings>>,
    store: SettingsStore,
}

impl SettingsService {
    pub fn new(settings: AppSettings, store: SettingsStore) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            store,
        }
    }

    pub async fn load(store: SettingsStore) -> anyhow::Result<Self> {
        let settings = store.load().await?;
        Ok(Self::new(settings, store))
    }

    pub async fn get(&self) -> AppSettings {
        self.settings.read().await.clone()
    }

    pub async fn update(&self, update: SettingsUpdate) -> Result<AppSettings, ApiError> {
        let settings = {
            let mut settings = self.settings.write().await;
            settings.apply(update);
            settings.clone()
        };
        self.save(settings).await
    }

    pub async fn reset(&self) -> Result<AppSettings, ApiError> {
        let settings = {
            let mut settings = self.settings.write().await;
            *settings = AppSettings::default();
            settings.clone()
        };
        self.save(settings).await
    }

    async fn save(&self, settings: AppSettings) -> Result<AppSettings, ApiError> {
        self.store
            .save(&settings)
            .await
            .map_err(ApiError::storage)?;
        Ok(settings)
    }
}
