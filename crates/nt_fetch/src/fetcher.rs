use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use futures::future::join_all;
use futures::FutureExt;
use nt_core::config::{DEFAULT_MAX_RESULTS_PER_QUERY, DEFAULT_QUERY_LIMIT};
use nt_core::{Config, Error, NewsSource, RawArticle, Result};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub max_results_per_query: usize,
    /// Queries past this many are dropped, in insertion order.
    pub query_limit: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_results_per_query: DEFAULT_MAX_RESULTS_PER_QUERY,
            query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl From<&Config> for FetchOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_results_per_query: config.max_results_per_query,
            query_limit: config.query_limit,
        }
    }
}

/// Number of queries `fetch_news_for_queries` will actually issue.
pub fn issued_query_count(queries: &[String], options: &FetchOptions) -> usize {
    queries.len().min(options.query_limit)
}

/// Fetches every query concurrently and merges the results in query order,
/// keeping the first article seen for each URL.
///
/// A failing query contributes nothing and never affects its siblings. Only a
/// missing API key fails the call.
pub async fn fetch_news_for_queries(
    queries: &[String],
    api_key: Option<&str>,
    source: &dyn NewsSource,
    options: FetchOptions,
) -> Result<Vec<RawArticle>> {
    let api_key = api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::Configuration("News API key is not configured".to_string()))?;

    if queries.is_empty() {
        return Ok(Vec::new());
    }

    let issued = &queries[..issued_query_count(queries, &options)];
    if issued.len() < queries.len() {
        debug!(
            "Dropping {} queries past the limit of {}",
            queries.len() - issued.len(),
            options.query_limit
        );
    }

    info!("🔎 Fetching {} queries from {}", issued.len(), source.name());

    let fetches = issued.iter().map(|query| async move {
        let search = source.search(query, api_key, options.max_results_per_query);
        match AssertUnwindSafe(search).catch_unwind().await {
            Ok(Ok(articles)) => {
                debug!("Query '{}' returned {} articles", query, articles.len());
                articles
            }
            Ok(Err(e)) => {
                warn!("⚠️ Query '{}' failed: {}", query, e);
                Vec::new()
            }
            Err(_) => {
                warn!("⚠️ Query '{}' panicked, skipping its results", query);
                Vec::new()
            }
        }
    });

    let batches = join_all(fetches).await;
    let fetched: usize = batches.iter().map(Vec::len).sum();
    let articles = dedup_by_url(batches.into_iter().flatten());
    info!("✨ Fetched {} articles ({} after dedup)", fetched, articles.len());

    Ok(articles)
}

/// First occurrence of each non-empty URL wins. Articles without a URL are
/// never compared and always kept.
pub fn dedup_by_url(articles: impl IntoIterator<Item = RawArticle>) -> Vec<RawArticle> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| article.url.is_empty() || seen.insert(article.url.clone()))
        .collect()
}
