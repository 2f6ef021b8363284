use async_trait::async_trait;
use std::fmt;
use crate::types::RawArticle;
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync + fmt::Debug {
    /// Returns the name of the news provider
    fn name(&self) -> &str;

    /// Runs one search against the provider and normalizes every result.
    /// Fails with `Error::NewsFetch` on transport or provider failure; never retries.
    async fn search(&self, query: &str, api_key: &str, max_results: usize) -> Result<Vec<RawArticle>>;
}
