use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use crate::types::ApiKeys;
use crate::Error;

pub const DEFAULT_QUERY_LIMIT: usize = 5;
pub const DEFAULT_MAX_RESULTS_PER_QUERY: usize = 10;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 150;

/// Which news-search API backs the fetcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewsProvider {
    #[default]
    GNews,
    NewsApi,
}

impl NewsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsProvider::GNews => "gnews",
            NewsProvider::NewsApi => "newsapi",
        }
    }
}

impl fmt::Display for NewsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gnews" => Ok(NewsProvider::GNews),
            "newsapi" | "newsapi.org" => Ok(NewsProvider::NewsApi),
            other => Err(Error::Configuration(format!("Unknown news provider: {}", other))),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub news_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub news_provider: NewsProvider,
    /// Overrides the provider's default endpoint base
    pub news_base_url: Option<String>,
    pub openai_base_url: Option<String>,
    pub openai_model: String,
    pub query_limit: usize,
    pub max_results_per_query: usize,
    pub enable_summarization: bool,
    pub fetch_timeout: Duration,
    pub summary_max_tokens: u32,
}

impl Config {
    /// Resolves the keys for one request.
    pub fn api_keys(&self) -> ApiKeys {
        ApiKeys::new(self.news_api_key.clone(), self.openai_api_key.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_api_key: None,
            openai_api_key: None,
            news_provider: NewsProvider::default(),
            news_base_url: None,
            openai_base_url: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            query_limit: DEFAULT_QUERY_LIMIT,
            max_results_per_query: DEFAULT_MAX_RESULTS_PER_QUERY,
            enable_summarization: true,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            summary_max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_keys", &self.api_keys())
            .field("news_provider", &self.news_provider)
            .field("news_base_url", &self.news_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("query_limit", &self.query_limit)
            .field("max_results_per_query", &self.max_results_per_query)
            .field("enable_summarization", &self.enable_summarization)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("summary_max_tokens", &self.summary_max_tokens)
            .finish()
    }
}
