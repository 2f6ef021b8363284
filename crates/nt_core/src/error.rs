use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required API key or setting is missing. Fatal to the request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The inbound payload is malformed or incomplete.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single query's upstream search failed.
    #[error("News fetch error: {0}")]
    NewsFetch(String),

    /// A single article's completion call failed or returned an unusable shape.
    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
