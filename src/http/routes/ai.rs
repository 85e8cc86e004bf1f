use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::application::ai_service::{AiService, ChatError, ChatPrompt};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AiAppState<A: AiService> {
    pub service: A,
}

#[derive(Debug, Deserialize)]
pub struct AiChatRequest {
    pub prompt: String,
    #[serde(rename = "systemPrompt")]
    pub system_prompt: Option<String>,
    #[serde(rename = "maxTokens")]
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AiChatResponse {
    pub reply: String,
    pub deployment: String,
}

pub fn router<A: AiService + Clone>(state: AiAppState<A>) -> Router {
    Router::new().route("/ai/chat", post(chat::<A>)).with_state(state)
}

async fn chat<A: AiService>(
    State(state): State<AiAppState<A>>,
    Json(payload): Json<AiChatRequest>,
) -> Result<Json<AiChatResponse>, ApiError> {
    let reply = state
        .service
        .chat(ChatPrompt {
            prompt: payload.prompt,
            system_prompt: payload.system_prompt,
            max_tokens: payload.max_tokens,
            temperature: payload.temperature,
        })
        .await
        .map_err(|e| match e {
            ChatError::Disabled => ApiError::FeatureDisabled(e.to_string()),
            ChatError::Misconfigured => ApiError::Misconfigured(e.to_string()),
            ChatError::Upstream(_) => ApiError::Upstream(e.to_string()),
        })?;
    Ok(Json(AiChatResponse { reply: reply.reply, deployment: reply.deployment }))
}
