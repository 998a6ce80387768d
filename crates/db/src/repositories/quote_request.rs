//! Retention of submitted quote requests for later analysis. Written on the
//! side of quote generation and never read back on the hot path.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use quotewise_core::QuoteRequest;

use super::RepositoryError;
use crate::DbPool;

#[derive(Clone, Debug, PartialEq)]
pub struct StoredQuoteRequest {
    pub id: String,
    pub user_id: String,
    pub request_id: String,
    pub insurance_type: String,
    pub coverage_level: String,
    pub zip_code: String,
    /// Full request as submitted, serialized as JSON.
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

pub struct SqlQuoteRequestRepository {
    pool: DbPool,
}

impl SqlQuoteRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn save(
        &self,
        user_id: &str,
        request_id: &str,
        request: &QuoteRequest,
    ) -> Result<StoredQuoteRequest, RepositoryError> {
        let payload = serde_json::to_string(request)
            .map_err(|err| RepositoryError::Decode(err.to_string()))?;
        let insurance_type = serde_json::to_value(request.insurance_type)
            .ok()
            .and_then(|value| value.as_str().map(ToString::to_string))
            .ok_or_else(|| RepositoryError::Decode("insurance type encoding".to_string()))?;
        let coverage_level = serde_json::to_value(request.coverage_level)
            .ok()
            .and_then(|value| value.as_str().map(ToString::to_string))
            .ok_or_else(|| RepositoryError::Decode("coverage level encoding".to_string()))?;

        let stored = StoredQuoteRequest {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            request_id: request_id.to_string(),
            insurance_type,
            coverage_level,
            zip_code: request.zip_code.clone(),
            payload,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO quote_request (
                id, user_id, request_id, insurance_type, coverage_level,
                zip_code, payload, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&stored.id)
        .bind(&stored.user_id)
        .bind(&stored.request_id)
        .bind(&stored.insurance_type)
        .bind(&stored.coverage_level)
        .bind(&stored.zip_code)
        .bind(&stored.payload)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await?;

        Ok(stored)
    }

    pub async fn find_by_request_id(
        &self,
        request_id: &str,
    ) -> Result<Option<StoredQuoteRequest>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, request_id, insurance_type, coverage_level,
                   zip_code, payload, created_at
            FROM quote_request
            WHERE request_id = ?
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_stored).transpose()
    }
}

fn row_to_stored(row: SqliteRow) -> Result<StoredQuoteRequest, RepositoryError> {
    Ok(StoredQuoteRequest {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        request_id: row.try_get("request_id")?,
        insurance_type: row.try_get("insurance_type")?,
        coverage_level: row.try_get("coverage_level")?,
        zip_code: row.try_get("zip_code")?,
        payload: row.try_get("payload")?,
        created_at: row.try_get("created_at")?,
    })
}
