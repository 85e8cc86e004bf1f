use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ai_service::{CompletionClient, CompletionRequest};

/// Non-streaming chat-completion client for OpenAI-compatible deployment
/// endpoints. Authentication is a static `api-key` header when one is
/// configured; token acquisition is the platform's concern, not ours.
#[derive(Clone)]
pub struct HttpCompletionClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl HttpCompletionClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self { client: reqwest::Client::new(), api_key }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            request.endpoint.trim_end_matches('/'),
            request.deployment,
            request.api_version,
        );

        let body = ChatCompletionBody {
            messages: vec![
                ChatMessage { role: "system", content: &request.system_prompt },
                ChatMessage { role: "user", content: &request.prompt },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let mut req = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.header("api-key", key);
        }
        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            bail!("HTTP {status}: {text}");
        }

        let completion: ChatCompletionResponse = response.json().await?;
        // An answer with no content is an empty reply, not a failure.
        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}
