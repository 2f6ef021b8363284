use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use nt_core::config::DEFAULT_FETCH_TIMEOUT;
use nt_core::{NewsSource, RawArticle, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use super::utils;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<GNewsArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GNewsArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    image: Option<String>,
    published_at: Option<String>,
    source: Option<GNewsPublisher>,
}

#[derive(Debug, Deserialize)]
struct GNewsPublisher {
    name: Option<String>,
}

impl From<GNewsArticle> for RawArticle {
    fn from(article: GNewsArticle) -> Self {
        RawArticle {
            title: utils::text(article.title),
            url: utils::text(article.url),
            description: utils::text(article.description),
            image: utils::text(article.image),
            published_at: utils::text(article.published_at),
            source: utils::source_name(article.source.and_then(|s| s.name)),
        }
    }
}

/// Search client for gnews.io
#[derive(Clone)]
pub struct GNewsSource {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GNewsSource {
    const BASE_URL: &'static str = "https://gnews.io/api/v4";

    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: Self::BASE_URL.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for GNewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GNewsSource")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl NewsSource for GNewsSource {
    fn name(&self) -> &str {
        "GNews"
    }

    async fn search(&self, query: &str, api_key: &str, max_results: usize) -> Result<Vec<RawArticle>> {
        let max = max_results.to_string();
        let url = utils::endpoint(
            &self.base_url,
            "search",
            &[("q", query), ("lang", "en"), ("max", &max), ("apikey", api_key)],
        )?;

        let response: SearchResponse =
            utils::get_json(self.name(), self.client.get(url), self.timeout).await?;
        debug!("GNews returned {} articles for '{}'", response.articles.len(), query);

        Ok(response.articles.into_iter().map(RawArticle::from).collect())
    }
}
