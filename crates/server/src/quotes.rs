//! Quote generation endpoint.
//!
//! `POST /api/quotes` accepts a quote request and returns one priced offer
//! per carrier, cheapest first. A configurable pause stands in for real
//! carrier round trips; accepted requests are retained in the background
//! without blocking or failing the response.

use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

use quotewise_core::{roster, QuoteBatch, QuoteEngine, QuoteRequestDraft, ThreadRngSource};
use quotewise_db::SqlQuoteRequestRepository;

use crate::bootstrap::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/quotes", post(generate_quotes))
}

pub async fn generate_quotes(
    State(state): State<AppState>,
    Json(draft): Json<QuoteRequestDraft>,
) -> Result<Json<QuoteBatch>, (StatusCode, Json<Value>)> {
    let mut engine = QuoteEngine::new(roster(), ThreadRngSource);
    let batch = match engine.generate(&draft) {
        Ok(batch) => batch,
        Err(error) => {
            info!(
                event_name = "quotes.request_rejected",
                missing_fields = ?draft.missing_engine_fields(),
                "quote request missing required parameters"
            );
            return Err((StatusCode::BAD_REQUEST, Json(json!({ "error": error.user_message() }))));
        }
    };

    // Rejections return immediately; only priced batches pay the carrier pause.
    let delay_ms = state.config.quotes.synthetic_delay_ms;
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    info!(
        event_name = "quotes.batch_generated",
        request_id = %batch.request_id,
        quote_count = batch.quotes.len(),
        "quote batch generated"
    );

    // Retention is best-effort and must never delay the response.
    if let Ok(request) = draft.into_request() {
        let pool = state.db_pool.clone();
        let request_id = batch.request_id.clone();
        tokio::spawn(async move {
            let repository = SqlQuoteRequestRepository::new(pool);
            if let Err(error) = repository.save("anonymous", &request_id, &request).await {
                warn!(
                    event_name = "quotes.retention_failed",
                    request_id = %request_id,
                    error = %error,
                    "failed to retain quote request"
                );
            }
        });
    }

    Ok(Json(batch))
}
