use crate::config::AiSettings;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// One completion call against a deployed model. Implemented by the reqwest
/// client in infrastructure and by fakes in tests.
#[async_trait]
pub trait CompletionClient: Send + Sync + 'static {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    pub prompt: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct ChatPrompt {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub deployment: String,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("AI chat is not enabled")]
    Disabled,
    #[error("AI completion endpoint or deployment is not configured")]
    Misconfigured,
    #[error("completion call failed: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait AiService: Send + Sync + 'static {
    async fn chat(&self, prompt: ChatPrompt) -> Result<ChatReply, ChatError>;
}

#[derive(Clone)]
pub struct AiServiceImpl<C: CompletionClient> {
    settings: AiSettings,
    client: C,
}

impl<C: CompletionClient> AiServiceImpl<C> {
    pub fn new(settings: AiSettings, client: C) -> Self {
        Self { settings, client }
    }
}

#[async_trait]
impl<C: CompletionClient> AiService for AiServiceImpl<C> {
    async fn chat(&self, prompt: ChatPrompt) -> Result<ChatReply, ChatError> {
        if !self.settings.enabled {
            return Err(ChatError::Disabled);
        }
        let (Some(endpoint), Some(deployment)) =
            (self.settings.endpoint.clone(), self.settings.deployment.clone())
        else {
            return Err(ChatError::Misconfigured);
        };

        let request = CompletionRequest {
            endpoint,
            deployment: deployment.clone(),
            api_version: self.settings.api_version.clone(),
            prompt: prompt.prompt,
            system_prompt: prompt
                .system_prompt
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            max_tokens: prompt.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: prompt.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };

        // No retries: one attempt, failures surface as-is to the caller.
        let reply = self
            .client
            .complete(request)
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        Ok(ChatReply { reply, deployment })
    }
}
