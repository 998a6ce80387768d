//! Diagnostics for the chat backend: model listing and a latency probe.
//! Both report failure in the body rather than via HTTP status so operators
//! can hit them from a browser.

use std::time::{Duration, Instant};

use axum::{extract::State, routing::get, Json, Router};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use tracing::warn;

use crate::bootstrap::AppState;

const BACKEND_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/check-models", get(check_models))
        .route("/api/test-backend", get(test_backend))
}

pub async fn check_models(State(state): State<AppState>) -> Json<Value> {
    if !state.config.chat.is_available() {
        return Json(json!({ "success": false, "error": "Chat backend is not configured" }));
    }

    match list_models(&state).await {
        Ok(models) => Json(json!({ "success": true, "models": models })),
        Err(error) => {
            warn!(event_name = "probes.check_models_failed", error = %error, "model listing failed");
            Json(json!({ "success": false, "error": error.to_string() }))
        }
    }
}

pub async fn test_backend(State(state): State<AppState>) -> Json<Value> {
    if !state.config.chat.is_available() {
        return Json(json!({ "success": false, "error": "Chat backend is not configured" }));
    }

    let started = Instant::now();
    let probe = tokio::time::timeout(BACKEND_PROBE_TIMEOUT, list_models(&state)).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    match probe {
        Ok(Ok(_)) => Json(json!({ "success": true, "latencyMs": latency_ms })),
        Ok(Err(error)) => {
            warn!(event_name = "probes.test_backend_failed", error = %error, "backend probe failed");
            Json(json!({ "success": false, "latencyMs": latency_ms, "error": error.to_string() }))
        }
        Err(_) => Json(json!({
            "success": false,
            "latencyMs": latency_ms,
            "error": "Backend request timed out",
        })),
    }
}

async fn list_models(state: &AppState) -> Result<Vec<String>, reqwest::Error> {
    let chat = &state.config.chat;
    let base_url = chat.base_url.as_deref().unwrap_or_default();
    let url = format!("{}/models", base_url.trim_end_matches('/'));

    let mut request = state.http.get(url);
    if let Some(api_key) = &chat.api_key {
        request = request.bearer_auth(api_key.expose_secret());
    }

    let body: Value = request.send().await?.error_for_status()?.json().await?;
    let models = body["data"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    Ok(models)
}
