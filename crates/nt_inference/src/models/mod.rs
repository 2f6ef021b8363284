use std::sync::Arc;
use nt_core::{CompletionModel, Config, Result};
use reqwest::Client;
use tracing::debug;

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiModel};

/// Builds the completion model used for summaries. Fails with
/// `Error::Configuration` when the key is blank.
pub fn create_model(api_key: &str, config: &Config, client: Client) -> Result<Arc<dyn CompletionModel>> {
    let model = OpenAiModel::new(client, api_key, OpenAiConfig::from(config))?;
    debug!("🧠 Completion model ready (using {})", model.name());
    Ok(Arc::new(model))
}
