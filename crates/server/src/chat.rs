//! Insurance assistant endpoints.
//!
//! `POST /api/chat` proxies a single user message to the configured
//! chat-completion backend and returns the buffered reply. With no backend
//! configured the endpoint degrades to an unavailable notice instead of
//! erroring. Each successful exchange is persisted in the background;
//! `GET /api/chat/history/{user_id}` returns the transcript oldest first.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

use quotewise_db::{ChatTurn, SqlChatRepository};

use crate::bootstrap::AppState;

pub const UNAVAILABLE_MESSAGE: &str =
    "The insurance assistant is not available right now. Please try again later.";
pub const FALLBACK_MESSAGE: &str =
    "I'm having trouble responding right now. Please try again in a moment.";

const SYSTEM_PROMPT: &str = "You are a helpful insurance assistant for an insurance comparison \
service. Answer questions about auto and home insurance, coverage levels, and how to compare \
quotes. Keep answers short and plain; do not give legal or financial advice.";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/history/{user_id}", get(chat_history))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub data: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub created_at: String,
}

impl From<ChatTurn> for HistoryEntry {
    fn from(turn: ChatTurn) -> Self {
        Self {
            id: turn.id,
            user_id: turn.user_id,
            message: turn.message,
            response: turn.response,
            created_at: turn.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Error)]
enum ChatProxyError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream response carried no content")]
    MissingContent,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    let message = payload.message.trim().to_string();
    if message.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "error": "Message is required" }))));
    }
    let user_id = payload.user_id.filter(|id| !id.trim().is_empty());
    let user_id = user_id.unwrap_or_else(|| "anonymous".to_string());

    if !state.config.chat.is_available() {
        return Ok(Json(ChatResponse {
            success: false,
            response: UNAVAILABLE_MESSAGE.to_string(),
        }));
    }

    let response = match request_completion(&state, &message).await {
        Ok(content) => content,
        Err(error) => {
            warn!(
                event_name = "chat.completion_failed",
                error = %error,
                "chat backend request failed"
            );
            return Ok(Json(ChatResponse {
                success: false,
                response: FALLBACK_MESSAGE.to_string(),
            }));
        }
    };

    // Transcript writes never block or fail the reply.
    let pool = state.db_pool.clone();
    let saved_message = message.clone();
    let saved_response = response.clone();
    tokio::spawn(async move {
        let repository = SqlChatRepository::new(pool);
        if let Err(error) = repository.save_turn(&user_id, &saved_message, &saved_response).await {
            warn!(
                event_name = "chat.turn_persist_failed",
                error = %error,
                "failed to persist chat turn"
            );
        }
    });

    Ok(Json(ChatResponse { success: true, response }))
}

async fn request_completion(state: &AppState, message: &str) -> Result<String, ChatProxyError> {
    let chat = &state.config.chat;
    let base_url = chat.base_url.as_deref().unwrap_or_default();
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));

    let mut request = state.http.post(url).json(&json!({
        "model": chat.model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": message },
        ],
    }));
    if let Some(api_key) = &chat.api_key {
        request = request.bearer_auth(api_key.expose_secret());
    }

    let body: Value = request.send().await?.error_for_status()?.json().await?;
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(ChatProxyError::MissingContent)
}

pub async fn chat_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryResponse>, (StatusCode, Json<Value>)> {
    let repository = SqlChatRepository::new(state.db_pool.clone());
    match repository.history(&user_id).await {
        Ok(turns) => Ok(Json(HistoryResponse {
            success: true,
            data: turns.into_iter().map(HistoryEntry::from).collect(),
        })),
        Err(error) => {
            warn!(
                event_name = "chat.history_failed",
                user_id = %user_id,
                error = %error,
                "failed to load chat history"
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to load chat history" })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::Json;

    use quotewise_core::config::{AppConfig, ConfigOverrides, LoadOptions};
    use quotewise_db::SqlChatRepository;

    use crate::bootstrap::AppState;
    use crate::chat::{chat, chat_history, ChatRequest, UNAVAILABLE_MESSAGE};

    async fn test_state(overrides: ConfigOverrides) -> AppState {
        let config = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some("sqlite::memory:?cache=shared".to_string()),
                synthetic_delay_ms: Some(0),
                ..overrides
            },
            ..LoadOptions::default()
        })
        .expect("config");

        let db_pool =
            quotewise_db::open_pool(&config.database.url, 1, 5).await.expect("pool");
        quotewise_db::migrations::run_pending(&db_pool).await.expect("migrations");

        AppState { config: Arc::new(config), db_pool, http: reqwest::Client::new() }
    }

    #[tokio::test]
    async fn unconfigured_backend_degrades_instead_of_failing() {
        let state = test_state(ConfigOverrides::default()).await;

        let Json(response) = chat(
            State(state),
            Json(ChatRequest { message: "What is a deductible?".to_string(), user_id: None }),
        )
        .await
        .expect("response");

        assert!(!response.success);
        assert_eq!(response.response, UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let state = test_state(ConfigOverrides::default()).await;

        let (status, Json(body)) = chat(
            State(state),
            Json(ChatRequest { message: "   ".to_string(), user_id: None }),
        )
        .await
        .expect_err("rejection");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn history_returns_transcript_oldest_first() {
        let state = test_state(ConfigOverrides::default()).await;

        let repository = SqlChatRepository::new(state.db_pool.clone());
        repository.save_turn("carol", "first", "one").await.expect("save");
        repository.save_turn("carol", "second", "two").await.expect("save");

        let Json(history) =
            chat_history(State(state), Path("carol".to_string())).await.expect("history");

        assert!(history.success);
        assert_eq!(history.data.len(), 2);
        assert_eq!(history.data[0].message, "first");
        assert_eq!(history.data[1].message, "second");
        assert_eq!(history.data[0].user_id, "carol");
    }

    #[tokio::test]
    async fn history_for_unknown_user_is_empty() {
        let state = test_state(ConfigOverrides::default()).await;

        let Json(history) =
            chat_history(State(state), Path("nobody".to_string())).await.expect("history");

        assert!(history.success);
        assert!(history.data.is_empty());
    }
}
