//! Persistence for assistant conversations. Saves are best-effort from the
//! caller's point of view; this layer just reports errors.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use super::RepositoryError;
use crate::DbPool;

#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

pub struct SqlChatRepository {
    pool: DbPool,
}

impl SqlChatRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn save_turn(
        &self,
        user_id: &str,
        message: &str,
        response: &str,
    ) -> Result<ChatTurn, RepositoryError> {
        let turn = ChatTurn {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            message: message.to_string(),
            response: response.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO chat_message (id, user_id, message, response, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&turn.id)
        .bind(&turn.user_id)
        .bind(&turn.message)
        .bind(&turn.response)
        .bind(turn.created_at)
        .execute(&self.pool)
        .await?;

        Ok(turn)
    }

    /// Full transcript for a user, oldest first.
    pub async fn history(&self, user_id: &str) -> Result<Vec<ChatTurn>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, message, response, created_at
            FROM chat_message
            WHERE user_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_turn).collect()
    }
}

fn row_to_turn(row: SqliteRow) -> Result<ChatTurn, RepositoryError> {
    Ok(ChatTurn {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        message: row.try_get("message")?,
        response: row.try_get("response")?,
        created_at: row.try_get("created_at")?,
    })
}
