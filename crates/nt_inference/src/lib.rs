pub mod models;
pub mod summarizer;

pub use models::{create_model, OpenAiConfig, OpenAiModel};
pub use summarizer::{summarize_article, ModelFactory, Summarizer, SummarySettings};

pub mod prelude {
    pub use super::summarizer::{Summarizer, SummarySettings};
    pub use nt_core::{CompletionModel, FinalArticle, RawArticle, Result, Error};
}
