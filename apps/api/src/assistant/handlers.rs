//! Axum route handlers for the staff chat assistant.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::assistant::conversation::validate_conversation;
use crate::auth::extract::StaffSession;
use crate::errors::AppError;
use crate::llm_client::{prompts::ASSISTANT_SYSTEM, ChatMessage};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/staff/assistant/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    StaffSession(_staff): StaffSession,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate_conversation(&request.messages).map_err(AppError::Validation)?;

    let response = state
        .llm
        .chat(&request.messages, ASSISTANT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let reply = response
        .text()
        .ok_or_else(|| AppError::Llm("LLM returned empty content".to_string()))?
        .to_string();

    Ok(Json(ChatResponse { reply }))
}
