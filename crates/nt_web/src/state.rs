use std::sync::Arc;
use nt_core::{Config, NewsSource, Result};
use nt_inference::Summarizer;
use reqwest::Client;

/// Clients and settings built once at startup and shared by every request.
pub struct AppState {
    pub config: Config,
    pub news_source: Arc<dyn NewsSource>,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(config: Config, news_source: Arc<dyn NewsSource>, summarizer: Arc<Summarizer>) -> Self {
        Self {
            config,
            news_source,
            summarizer,
        }
    }

    /// Wires the configured news provider and the OpenAI summarizer around
    /// one shared HTTP client.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = Client::builder().build()?;
        let news_source = nt_fetch::create_source(&config, client.clone());
        let summarizer = Arc::new(Summarizer::openai(&config, client));
        Ok(Self::new(config, news_source, summarizer))
    }
}
