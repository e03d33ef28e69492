// src/routes/chat.rs
use axum::{Json, extract::State};
use tracing::info;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::{
        chatbot::{detect_intent, generate_reply},
        session_manager::Speaker,
    },
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let session_id = match &payload.session_id {
        Some(s) if !s.trim().is_empty() => state.sessions.ensure_session(s.trim()).await,
        _ => state.sessions.create_session().await,
    };

    state.sessions.append(&session_id, Speaker::Customer, trimmed).await;

    let intent = detect_intent(trimmed);
    info!(session = %session_id, ?intent, "chat message");

    let mut response = generate_reply(&state.catalog, &intent);
    state.sessions.append(&session_id, Speaker::Advisor, &response.reply).await;

    response.session_id = Some(session_id);
    Ok(Json(response))
}
