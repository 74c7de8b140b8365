use async_trait::async_trait;
use farewatch_core::{CoreError, CoreResult, SummaryClient};
use farewatch_shared::Masked;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client used to write route analyses
pub struct MistralClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Masked<String>,
    model: String,
}

impl MistralClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Masked<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        }
    }
}

fn first_choice_text(response: ChatResponse) -> CoreResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CoreError::SummarizationFailure("response contained no message".to_string()))
}

#[async_trait]
impl SummaryClient for MistralClient {
    async fn complete(&self, prompt: &str) -> CoreResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::SummarizationFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::SummarizationFailure(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| CoreError::SummarizationFailure(format!("unreadable response: {}", e)))?;

        first_choice_text(body)
    }
}
