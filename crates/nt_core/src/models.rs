use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// A single chat-style completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Run one completion. `Ok(None)` means the provider answered but the
    /// response carried no message content.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>>;
}
