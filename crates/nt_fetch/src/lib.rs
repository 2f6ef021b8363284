pub mod fetcher;
pub mod sources;

pub use fetcher::{dedup_by_url, fetch_news_for_queries, issued_query_count, FetchOptions};
pub use sources::{create_source, GNewsSource, NewsApiSource};

pub mod prelude {
    pub use super::fetcher::{fetch_news_for_queries, FetchOptions};
    pub use nt_core::{Error, NewsSource, RawArticle, Result};
}
