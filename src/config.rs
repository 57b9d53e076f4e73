use std::env;

pub const DEFAULT_CARDS_PER_DECK: usize = 5;
pub const INFERENCE_API_URL: &str = "https://api-inference.huggingface.co/models";

/// Runtime configuration, loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Hugging Face API key. When absent, flashcard generation runs
    /// entirely on the local strategies.
    pub inference_api_key: Option<String>,
    pub inference_api_url: String,
    pub cards_per_deck: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let inference_api_key = env::var("HUGGINGFACE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let cards_per_deck = env::var("CARDS_PER_DECK")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CARDS_PER_DECK);

        AppConfig {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://study_buddy.db".into()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into()),
            inference_api_key,
            inference_api_url: env::var("HUGGINGFACE_API_URL")
                .unwrap_or_else(|_| INFERENCE_API_URL.into()),
            cards_per_deck,
        }
    }
}
