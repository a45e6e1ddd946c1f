use std::env;
use std::str::FromStr;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub quote_api_url: String,
    pub enrichment_timeout_seconds: u64,
    pub default_total_rounds: u32,
    pub quiz_max_questions: usize,
    pub seed_sample_data: bool,
    pub connection_timeout_seconds: u64,
    pub quiz_timeout_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://vocab_quest.db?mode=rwc".to_string()),
            quote_api_url: env::var("QUOTE_API_URL")
                .unwrap_or_else(|_| "https://api.quotable.io/quotes/random?limit=4".to_string()),
            enrichment_timeout_seconds: parse_var("ENRICHMENT_TIMEOUT_SECONDS", 5),
            default_total_rounds: parse_var("DEFAULT_TOTAL_ROUNDS", 10),
            quiz_max_questions: parse_var("QUIZ_MAX_QUESTIONS", 10).max(1),
            seed_sample_data: parse_var("SEED_SAMPLE_DATA", true),
            connection_timeout_seconds: parse_var("CONNECTION_TIMEOUT_SECONDS", 300),
            quiz_timeout_seconds: parse_var("QUIZ_TIMEOUT_SECONDS", 1800),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Read `name`, falling back to `default` when unset or unparsable
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {} value '{}', using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}
