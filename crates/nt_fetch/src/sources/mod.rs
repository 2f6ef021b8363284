use std::sync::Arc;
use nt_core::{Config, NewsProvider, NewsSource};
use reqwest::Client;

pub mod gnews;
pub mod newsapi;

pub use gnews::GNewsSource;
pub use newsapi::NewsApiSource;

/// Builds the configured provider around a shared HTTP client.
pub fn create_source(config: &Config, client: Client) -> Arc<dyn NewsSource> {
    match config.news_provider {
        NewsProvider::GNews => {
            let mut source = GNewsSource::new(client).with_timeout(config.fetch_timeout);
            if let Some(base_url) = &config.news_base_url {
                source = source.with_base_url(base_url.clone());
            }
            Arc::new(source)
        }
        NewsProvider::NewsApi => {
            let mut source = NewsApiSource::new(client).with_timeout(config.fetch_timeout);
            if let Some(base_url) = &config.news_base_url {
                source = source.with_base_url(base_url.clone());
            }
            Arc::new(source)
        }
    }
}

/// Request plumbing shared by the providers
pub(crate) mod utils {
    use std::time::Duration;
    use nt_core::{Error, Result};
    use reqwest::RequestBuilder;
    use serde::de::DeserializeOwned;
    use url::Url;

    pub const UNKNOWN_SOURCE: &str = "Unknown";

    pub fn endpoint(base_url: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), path);
        Url::parse_with_params(&raw, params)
            .map_err(|e| Error::NewsFetch(format!("Invalid endpoint {}: {}", raw, e)))
    }

    /// Sends `request` with a hard timeout and decodes a 2xx JSON body.
    /// URLs are stripped from transport errors since some carry the key.
    pub async fn get_json<T: DeserializeOwned>(
        provider: &str,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<T> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Error::NewsFetch(format!("{} request failed: {}", provider, e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::NewsFetch(format!(
                "{} returned status {}: {}",
                provider,
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::NewsFetch(format!("{} response could not be parsed: {}", provider, e.without_url())))
    }

    pub fn text(value: Option<String>) -> String {
        value.unwrap_or_default()
    }

    pub fn source_name(name: Option<String>) -> String {
        name.filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_params() {
        let url = utils::endpoint("https://example.com/api/", "search", &[("q", "Ramgarh local news"), ("lang", "en")]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/search?q=Ramgarh+local+news&lang=en");
        assert!(utils::endpoint("not a url", "search", &[]).is_err());
    }

    #[test]
    fn test_missing_fields_are_substituted() {
        assert_eq!(utils::text(None), "");
        assert_eq!(utils::source_name(None), "Unknown");
        assert_eq!(utils::source_name(Some(" ".into())), "Unknown");
        assert_eq!(utils::source_name(Some("Reuters".into())), "Reuters");
    }

    #[test]
    fn test_create_source_follows_provider() {
        let client = Client::new();
        let config = Config::default();
        assert_eq!(create_source(&config, client.clone()).name(), "GNews");

        let config = Config {
            news_provider: NewsProvider::NewsApi,
            ..Default::default()
        };
        assert_eq!(create_source(&config, client).name(), "NewsAPI");
    }
}
