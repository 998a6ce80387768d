pub mod connection;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, open_pool, DbPool, BUSY_TIMEOUT_MS};
pub use repositories::{
    ChatTurn, RepositoryError, SqlChatRepository, SqlQuoteRequestRepository, StoredQuoteRequest,
};
