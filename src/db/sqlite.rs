use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{HistoryStore, StoreError};
use crate::models::{PageSettings, QueryHistoryRow, RESPONSE_SEPARATOR};

const SCHEMA: &str = r#"
    -- Generated SQL sessions
    CREATE TABLE IF NOT EXISTS query_history (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        prompt TEXT NOT NULL,
        response TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_query_history_user_created
        ON query_history (user_id, created_at DESC);

    -- Page settings (single row)
    CREATE TABLE IF NOT EXISTS app_settings (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        settings_json TEXT NOT NULL,
        updated_at TEXT DEFAULT CURRENT_TIMESTAMP
    );
"#;

/// Initialize the SQLite database and create tables if they don't exist
pub fn init_database(app_data_dir: &Path) -> SqliteResult<Connection> {
    std::fs::create_dir_all(app_data_dir).ok();
    let db_path = app_data_dir.join("query_history.db");

    let conn = Connection::open(&db_path)?;
    conn.execute_batch(SCHEMA)?;

    Ok(conn)
}

/// Open a throwaway database with the same schema
pub fn init_in_memory() -> SqliteResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

// ==================== Query History ====================

/// Insert a history row as-is
pub fn insert_query_history(conn: &Connection, row: &QueryHistoryRow) -> SqliteResult<()> {
    conn.execute(
        r#"
        INSERT INTO query_history (id, user_id, prompt, response, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        (&row.id, &row.user_id, &row.prompt, &row.response, &row.created_at),
    )?;
    Ok(())
}

/// Record a generation session, joining its statements with the response separator
pub fn record_generation(
    conn: &Connection,
    user_id: &str,
    prompt: &str,
    statements: &[String],
) -> SqliteResult<QueryHistoryRow> {
    let row = QueryHistoryRow {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        prompt: prompt.to_string(),
        response: statements.join(RESPONSE_SEPARATOR),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    insert_query_history(conn, &row)?;
    Ok(row)
}

/// Load every history row for a user, newest first
pub fn load_query_history(conn: &Connection, user_id: &str) -> SqliteResult<Vec<QueryHistoryRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, user_id, prompt, response, created_at
        FROM query_history
        WHERE user_id = ?1
        ORDER BY created_at DESC, rowid DESC
        "#,
    )?;

    let rows = stmt.query_map([user_id], |row| {
        Ok(QueryHistoryRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            prompt: row.get(2)?,
            response: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;

    rows.collect()
}

/// Delete a single history entry
pub fn delete_query_history_entry(conn: &Connection, entry_id: &str) -> SqliteResult<bool> {
    let rows_affected = conn.execute("DELETE FROM query_history WHERE id = ?1", [entry_id])?;
    Ok(rows_affected > 0)
}

/// Clear a user's history, returning how many rows went away
pub fn clear_query_history(conn: &Connection, user_id: &str) -> SqliteResult<usize> {
    conn.execute("DELETE FROM query_history WHERE user_id = ?1", [user_id])
}

// ==================== Page Settings ====================

/// Load page settings from the database, returns default if none exist
pub fn load_settings(conn: &Connection) -> SqliteResult<PageSettings> {
    let mut stmt = conn.prepare("SELECT settings_json FROM app_settings WHERE id = 1")?;
    let mut rows = stmt.query([])?;

    if let Some(row) = rows.next()? {
        let json: String = row.get(0)?;
        match serde_json::from_str(&json) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("Stored page settings are invalid, using defaults: {}", e);
                Ok(PageSettings::default())
            }
        }
    } else {
        Ok(PageSettings::default())
    }
}

/// Save page settings to the database
pub fn save_settings(conn: &Connection, settings: &PageSettings) -> SqliteResult<()> {
    let json = serde_json::to_string(settings).unwrap_or_else(|_| "{}".to_string());

    conn.execute(
        r#"
        INSERT INTO app_settings (id, settings_json, updated_at)
        VALUES (1, ?1, CURRENT_TIMESTAMP)
        ON CONFLICT(id) DO UPDATE SET
            settings_json = excluded.settings_json,
            updated_at = CURRENT_TIMESTAMP
        "#,
        [&json],
    )?;
    Ok(())
}

/// History store backed by a local SQLite file
#[derive(Clone)]
pub struct SqliteHistoryStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteHistoryStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn open(app_data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(init_database(app_data_dir)?))
    }

    /// Run `f` against the underlying connection
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> SqliteResult<T>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&conn)?)
    }
}

impl HistoryStore for SqliteHistoryStore {
    async fn fetch_user_history(&self, user_id: &str) -> Result<Vec<QueryHistoryRow>, StoreError> {
        let store = self.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            store.with_connection(|conn| load_query_history(conn, &user_id))
        })
        .await?
    }
}
