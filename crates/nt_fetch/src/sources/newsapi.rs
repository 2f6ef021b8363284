use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use nt_core::config::DEFAULT_FETCH_TIMEOUT;
use nt_core::{Error, NewsSource, RawArticle, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use super::utils;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
    source: Option<NewsApiPublisher>,
}

#[derive(Debug, Deserialize)]
struct NewsApiPublisher {
    name: Option<String>,
}

impl From<NewsApiArticle> for RawArticle {
    fn from(article: NewsApiArticle) -> Self {
        RawArticle {
            title: utils::text(article.title),
            url: utils::text(article.url),
            description: utils::text(article.description),
            image: utils::text(article.url_to_image),
            published_at: utils::text(article.published_at),
            source: utils::source_name(article.source.and_then(|s| s.name)),
        }
    }
}

impl EverythingResponse {
    fn into_articles(self) -> Result<Vec<RawArticle>> {
        if self.status != "ok" {
            return Err(Error::NewsFetch(format!(
                "NewsAPI error {}: {}",
                self.code.unwrap_or_else(|| "unknown".to_string()),
                self.message.unwrap_or_else(|| "Unknown error".to_string())
            )));
        }
        Ok(self.articles.into_iter().map(RawArticle::from).collect())
    }
}

/// Search client for the newsapi.org `everything` endpoint. The key travels
/// in the `X-Api-Key` header.
#[derive(Clone)]
pub struct NewsApiSource {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl NewsApiSource {
    const BASE_URL: &'static str = "https://newsapi.org/v2";

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

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn search(&self, query: &str, api_key: &str, max_results: usize) -> Result<Vec<RawArticle>> {
        let page_size = max_results.to_string();
        let url = utils::endpoint(
            &self.base_url,
            "everything",
            &[("q", query), ("language", "en"), ("pageSize", &page_size)],
        )?;

        let request = self.client.get(url).header("X-Api-Key", api_key);
        let response: EverythingResponse = utils::get_json(self.name(), request, self.timeout).await?;
        let articles = response.into_articles()?;
        debug!("NewsAPI returned {} articles for '{}'", articles.len(), query);

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::RawQuery;
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[test]
    fn test_url_to_image_becomes_image() {
        let parsed: EverythingResponse = serde_json::from_value(json!({
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": null},
                "title": "Tea prices rise",
                "url": "https://example.com/tea",
                "urlToImage": "https://example.com/tea.jpg",
                "publishedAt": "2024-05-02T08:00:00Z",
                "description": null
            }]
        }))
        .unwrap();

        let articles = parsed.into_articles().unwrap();
        assert_eq!(articles[0].image, "https://example.com/tea.jpg");
        assert_eq!(articles[0].description, "");
        assert_eq!(articles[0].source, "Unknown");
    }

    #[test]
    fn test_error_status_in_body() {
        let parsed: EverythingResponse = serde_json::from_value(json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid."
        }))
        .unwrap();

        let err = parsed.into_articles().unwrap_err();
        assert!(err.to_string().contains("apiKeyInvalid"));
    }

    #[tokio::test]
    async fn test_search_sends_key_as_header() {
        let app = Router::new().route(
            "/everything",
            get(|headers: HeaderMap, RawQuery(query): RawQuery| async move {
                let key = headers
                    .get("x-api-key")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({
                    "status": "ok",
                    "articles": [{
                        "title": key,
                        "url": "https://example.com/1",
                        "description": query.unwrap_or_default()
                    }]
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let source = NewsApiSource::new(Client::new()).with_base_url(format!("http://{}", addr));
        let articles = source.search("dairy trends", "news-key", 3).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "news-key");
        assert_eq!(articles[0].description, "q=dairy+trends&language=en&pageSize=3");
        assert!(!articles[0].description.contains("news-key"));
    }
}
