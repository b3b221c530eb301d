use crate::AppState;
use crate::extract::ApiJson;
use crate::routes::error::ApiError;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mb_chat::ChatReply;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatbotRequest {
    #[serde(default)]
    pub message: String,
}

/// Chat replies are not wrapped in `data`; clients read `response` directly.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatbotResponse {
    pub success: bool,
    #[serde(flatten)]
    pub reply: ChatReply,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotHealth {
    pub success: bool,
    pub status: String,
    pub openai_configured: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chatbot", post(send_message))
        .route("/chatbot/health", get(health))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/chatbot",
    request_body = ChatbotRequest,
    responses(
        (status = 200, body = ChatbotResponse),
        (status = 400, body = crate::routes::error::ErrorEnvelope, description = "Blank message")
    )
)]
pub(crate) async fn send_message(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ChatbotRequest>,
) -> Result<Response, ApiError> {
    let message = input.message.trim();
    if message.is_empty() {
        return Err(ApiError::invalid("Message is required"));
    }
    let reply = state.chatbot.reply(message).await;
    Ok(Json(ChatbotResponse {
        success: true,
        reply,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/chatbot/health",
    responses((status = 200, body = ChatbotHealth))
)]
pub(crate) async fn health(State(state): State<AppState>) -> Json<ChatbotHealth> {
    Json(ChatbotHealth {
        success: true,
        status: "healthy".to_string(),
        openai_configured: state.chatbot.is_configured(),
    })
}
