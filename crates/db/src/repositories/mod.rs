use thiserror::Error;

pub mod chat;
pub mod quote_request;

pub use chat::{ChatTurn, SqlChatRepository};
pub use quote_request::{SqlQuoteRequestRepository, StoredQuoteRequest};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}
