//! Compresses article descriptions into short summaries.
//!
//! Summarization never fails: every article comes back with some summary,
//! falling back to its original description whenever the model is disabled,
//! unavailable, errors out or answers without content.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use futures::FutureExt;
use nt_core::config::DEFAULT_SUMMARY_MAX_TOKENS;
use nt_core::{CompletionModel, CompletionRequest, Config, FinalArticle, RawArticle, Result};
use reqwest::Client;
use tracing::{debug, info, warn};
use crate::models::create_model;

pub const SYSTEM_PROMPT: &str = "You are a news editor. Summarize the given news article in exactly 60-80 words, \
using a neutral, factual tone. Respond with the summary text only.";

pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Builds a model from an API key.
pub type ModelFactory = Arc<dyn Fn(&str) -> Result<Arc<dyn CompletionModel>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct SummarySettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
            temperature: SUMMARY_TEMPERATURE,
        }
    }
}

pub fn build_request(article: &RawArticle, settings: &SummarySettings) -> CompletionRequest {
    CompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: format!("Title: {}\n\nDescription: {}", article.title, article.description),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    }
}

/// Summarizes one article, returning its description on any failure.
/// Articles with neither title nor description are returned without a call.
pub async fn summarize_article(
    article: &RawArticle,
    model: &dyn CompletionModel,
    settings: &SummarySettings,
) -> String {
    if article.title.trim().is_empty() && article.description.trim().is_empty() {
        return article.description.clone();
    }

    match model.complete(&build_request(article, settings)).await {
        Ok(Some(content)) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => {
            warn!("⚠️ Completion for '{}' had no content, keeping description", article.title);
            article.description.clone()
        }
        Err(e) => {
            warn!("⚠️ Failed to summarize '{}': {}", article.title, e);
            article.description.clone()
        }
    }
}

pub struct Summarizer {
    factory: ModelFactory,
    settings: SummarySettings,
}

impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("factory", &"<ModelFactory>")
            .field("settings", &self.settings)
            .finish()
    }
}

impl Summarizer {
    pub fn new(factory: ModelFactory, settings: SummarySettings) -> Self {
        Self { factory, settings }
    }

    /// A summarizer backed by the OpenAI chat-completions API.
    pub fn openai(config: &Config, client: Client) -> Self {
        let settings = SummarySettings {
            max_tokens: config.summary_max_tokens,
            ..Default::default()
        };
        let config = config.clone();
        let factory: ModelFactory = Arc::new(move |api_key: &str| create_model(api_key, &config, client.clone()));
        Self::new(factory, settings)
    }

    /// Summarizes articles one at a time, in order. Without a usable key, or
    /// with summarization disabled, descriptions are copied through and no
    /// model is built.
    pub async fn summarize_articles(
        &self,
        articles: Vec<RawArticle>,
        api_key: Option<&str>,
        enable_summarization: bool,
    ) -> Vec<FinalArticle> {
        if articles.is_empty() {
            return Vec::new();
        }

        let api_key = match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) if enable_summarization => key,
            _ => {
                debug!("Summarization disabled, using descriptions for {} articles", articles.len());
                return with_descriptions(articles);
            }
        };

        let model = match (self.factory)(api_key) {
            Ok(model) => model,
            Err(e) => {
                warn!("⚠️ Could not create completion model, using descriptions: {}", e);
                return with_descriptions(articles);
            }
        };

        info!("🤖 Summarizing {} articles with {}", articles.len(), model.name());
        let mut summarized = Vec::with_capacity(articles.len());
        for article in articles {
            let attempt = summarize_article(&article, model.as_ref(), &self.settings);
            let summary = match AssertUnwindSafe(attempt).catch_unwind().await {
                Ok(summary) => summary,
                Err(_) => {
                    warn!("⚠️ Summarizing '{}' panicked, keeping description", article.title);
                    article.description.clone()
                }
            };
            summarized.push(article.into_final(summary));
        }
        summarized
    }
}

fn with_descriptions(articles: Vec<RawArticle>) -> Vec<FinalArticle> {
    articles
        .into_iter()
        .map(|article| {
            let summary = article.description.clone();
            article.into_final(summary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nt_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct MockModel {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl MockModel {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionModel for MockModel {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if request.user.contains("FAIL") {
                return Err(Error::Summarization("provider error".to_string()));
            }
            if request.user.contains("EMPTY") {
                return Ok(None);
            }
            if request.user.contains("PANIC") {
                panic!("model blew up");
            }
            Ok(Some(format!("  summary of {}  ", request.user.lines().next().unwrap_or_default())))
        }
    }

    fn article(title: &str, description: &str) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            url: format!("https://example.com/{}", title),
            description: description.to_string(),
            image: String::new(),
            published_at: "2024-05-01T10:00:00Z".to_string(),
            source: "Example".to_string(),
        }
    }

    fn summarizer_with(model: Arc<MockModel>, builds: Arc<AtomicUsize>) -> Summarizer {
        let factory: ModelFactory = Arc::new(move |_key: &str| -> Result<Arc<dyn CompletionModel>> {
            builds.fetch_add(1, Ordering::SeqCst);
            Ok(model.clone() as Arc<dyn CompletionModel>)
        });
        Summarizer::new(factory, SummarySettings::default())
    }

    #[test]
    fn test_request_shape() {
        let request = build_request(&article("Rains", "Heavy rain expected"), &SummarySettings::default());
        assert_eq!(request.user, "Title: Rains\n\nDescription: Heavy rain expected");
        assert!(request.system.contains("60-80 words"));
        assert_eq!(request.max_tokens, 150);
        assert_eq!(request.temperature, 0.3);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let model = Arc::new(MockModel::default());
        let builds = Arc::new(AtomicUsize::new(0));
        let summarizer = summarizer_with(model.clone(), builds.clone());
        assert!(summarizer.summarize_articles(vec![], Some("sk"), true).await.is_empty());
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_disabled_copies_descriptions_without_calls() {
        let model = Arc::new(MockModel::default());
        let builds = Arc::new(AtomicUsize::new(0));
        let summarizer = summarizer_with(model.clone(), builds.clone());
        let articles = vec![article("A", "desc A"), article("B", "")];

        let results = summarizer.summarize_articles(articles.clone(), None, false).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].summary, "desc A");
        assert_eq!(results[1].summary, "");

        let results = summarizer.summarize_articles(articles.clone(), Some("sk"), false).await;
        assert_eq!(results[0].summary, "desc A");

        let results = summarizer.summarize_articles(articles, None, true).await;
        assert_eq!(results[0].summary, "desc A");

        assert_eq!(model.calls(), 0);
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_model_construction_falls_back() {
        let factory: ModelFactory = Arc::new(|_key: &str| -> Result<Arc<dyn CompletionModel>> {
            Err(Error::Configuration("bad key".to_string()))
        });
        let summarizer = Summarizer::new(factory, SummarySettings::default());

        let results = summarizer
            .summarize_articles(vec![article("A", "desc A")], Some("sk"), true)
            .await;
        assert_eq!(results[0].summary, "desc A");
    }

    #[tokio::test]
    async fn test_failures_degrade_per_article() {
        let model = Arc::new(MockModel::default());
        let builds = Arc::new(AtomicUsize::new(0));
        let summarizer = summarizer_with(model.clone(), builds.clone());
        let articles = vec![
            article("Good", "good desc"),
            article("FAIL", "fail desc"),
            article("EMPTY", "empty desc"),
            article("PANIC", "panic desc"),
            article("Last", "last desc"),
        ];

        let results = summarizer.summarize_articles(articles, Some("sk"), true).await;
        let summaries: Vec<_> = results.iter().map(|a| a.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec![
                "summary of Title: Good",
                "fail desc",
                "empty desc",
                "panic desc",
                "summary of Title: Last",
            ]
        );
        assert_eq!(results[1].url, "https://example.com/FAIL");
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(model.calls(), 5);
    }

    #[tokio::test]
    async fn test_articles_are_summarized_sequentially() {
        let model = Arc::new(MockModel::default());
        let summarizer = summarizer_with(model.clone(), Arc::new(AtomicUsize::new(0)));
        let articles = (0..4).map(|i| article(&format!("T{}", i), "d")).collect();

        summarizer.summarize_articles(articles, Some("sk"), true).await;
        assert_eq!(model.calls(), 4);
        assert_eq!(model.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_degenerate_article_skips_model() {
        let model = MockModel::default();
        let summary = summarize_article(&article("", ""), &model, &SummarySettings::default()).await;
        assert_eq!(summary, "");
        assert_eq!(model.calls(), 0);

        let summary = summarize_article(&article("", "only desc"), &model, &SummarySettings::default()).await;
        assert_eq!(summary, "summary of Title:");
        assert_eq!(model.calls(), 1);
    }
}
