pub mod config;
pub mod error;
pub mod models;
pub mod news;
pub mod queries;
pub mod types;

pub use config::{Config, NewsProvider};
pub use error::{Error, Result};
pub use models::{CompletionModel, CompletionRequest};
pub use news::NewsSource;
pub use types::{ApiKeys, FinalArticle, Location, RawArticle, UserPreferences};
