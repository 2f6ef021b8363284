use axum::http::StatusCode;
use nt_core::queries::build_all_queries;
use nt_core::{Error, Result, UserPreferences};
use nt_fetch::{fetch_news_for_queries, issued_query_count, FetchOptions};
use serde_json::Value;
use tracing::{info, warn};
use crate::envelope::Envelope;
use crate::AppState;

pub const NO_QUERIES_MESSAGE: &str = "No search queries could be built from the provided preferences";
pub const NO_ARTICLES_MESSAGE: &str = "No articles found for the provided preferences";

/// Decodes the inbound payload and checks it carries a usable location.
pub fn validate(payload: Value) -> Result<UserPreferences> {
    if !payload.is_object() {
        return Err(Error::Validation("Request data must be a JSON object".to_string()));
    }

    let preferences: UserPreferences = serde_json::from_value(payload)
        .map_err(|e| Error::Validation(format!("Invalid request data: {}", e)))?;

    match &preferences.location {
        Some(location) if location.has_any() => Ok(preferences),
        _ => Err(Error::Validation(
            "Location with at least one of city, state or country is required".to_string(),
        )),
    }
}

/// Query building, fetch and summarization for one request.
pub async fn personalized_news(state: &AppState, preferences: &UserPreferences) -> Result<Envelope> {
    let keys = state.config.api_keys();
    let news_api_key = keys
        .news_api_key
        .as_deref()
        .ok_or_else(|| Error::Configuration("News API key is not configured".to_string()))?;

    let queries = build_all_queries(Some(preferences));
    if queries.is_empty() {
        return Ok(Envelope::empty(NO_QUERIES_MESSAGE));
    }

    let options = FetchOptions::from(&state.config);
    let articles = fetch_news_for_queries(&queries, Some(news_api_key), state.news_source.as_ref(), options).await?;
    let queries_used = issued_query_count(&queries, &options);
    if articles.is_empty() {
        return Ok(Envelope::empty(NO_ARTICLES_MESSAGE));
    }

    let results = state
        .summarizer
        .summarize_articles(articles, keys.openai_api_key.as_deref(), state.config.enable_summarization)
        .await;

    info!("📰 Returning {} articles from {} queries", results.len(), queries_used);
    Ok(Envelope::success(results, queries_used))
}

/// Runs a raw payload through validation and the pipeline, mapping every
/// failure to an error envelope and its HTTP status.
pub async fn handle_payload(state: &AppState, payload: Value) -> (StatusCode, Envelope) {
    let outcome = match validate(payload) {
        Ok(preferences) => personalized_news(state, &preferences).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(envelope) => (StatusCode::OK, envelope),
        Err(e) => {
            warn!("❌ Request failed: {}", e);
            (status_for(&e), Envelope::error(e.to_string()))
        }
    }
}

pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
