use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use vocab_types::{ExerciseError, StoryQuote};

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("quote request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("quote request timed out after {0:?}")]
    Timeout(Duration),
    #[error("quote service answered {0}")]
    Status(StatusCode),
}

impl From<EnrichmentError> for ExerciseError {
    fn from(error: EnrichmentError) -> Self {
        ExerciseError::EnrichmentUnavailable {
            reason: error.to_string(),
        }
    }
}

/// Fetches short quotes used to flavour story chapters
#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl QuoteClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub async fn fetch_quotes(&self) -> Result<Vec<StoryQuote>, EnrichmentError> {
        let request = async {
            let response = self.client.get(&self.url).send().await?;
            if !response.status().is_success() {
                return Err(EnrichmentError::Status(response.status()));
            }
            Ok(response.json::<Vec<StoryQuote>>().await?)
        };

        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| EnrichmentError::Timeout(self.timeout))?
    }

    /// Quotes, or an empty list when the service can't be reached
    pub async fn quotes_or_empty(&self) -> Vec<StoryQuote> {
        match self.fetch_quotes().await {
            Ok(quotes) => {
                debug!("Fetched {} story quotes", quotes.len());
                quotes
            }
            Err(e) => {
                let error = ExerciseError::from(e);
                warn!("Using base story: {}", error);
                Vec::new()
            }
        }
    }
}
