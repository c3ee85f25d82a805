use std::future::Future;

use crate::models::QueryHistoryRow;

pub mod postgres;
pub mod sqlite;

pub use postgres::PgHistoryStore;
pub use sqlite::SqliteHistoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("postgres: {0}")]
    Postgres(#[from] sqlx::Error),

    #[error("history query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("history database lock poisoned")]
    LockPoisoned,
}

/// Read access to the `query_history` table
pub trait HistoryStore: Send + Sync + 'static {
    /// Every row owned by `user_id`, newest `created_at` first
    fn fetch_user_history(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<QueryHistoryRow>, StoreError>> + Send;
}
