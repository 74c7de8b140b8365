use crate::CoreResult;
use async_trait::async_trait;

#[async_trait]
pub trait SummaryClient: Send + Sync {
    /// Send one prompt to the language model and return its generated text
    async fn complete(&self, prompt: &str) -> CoreResult<String>;
}
