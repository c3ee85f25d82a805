use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use super::{HistoryStore, StoreError};
use crate::models::{ConnectionConfig, QueryHistoryRow, UserIdColumn};

/// Build a connection string with proper URL encoding and SSL mode
fn build_connection_string(config: &ConnectionConfig) -> String {
    // URL encode username and password to handle special characters safely
    let username = urlencoding::encode(&config.username);
    let password = urlencoding::encode(&config.password);

    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode={}",
        username,
        password,
        config.host,
        config.port,
        config.database,
        config.ssl_mode
    )
}

/// Create a PostgreSQL connection pool for the given configuration
pub async fn create_pool(config: &ConnectionConfig) -> Result<PgPool, sqlx::Error> {
    let connection_string = build_connection_string(config);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&connection_string)
        .await?;

    Ok(pool)
}

const LOAD_BY_UUID: &str = r#"
    SELECT id::text AS id, user_id::text AS user_id, prompt, response, created_at
    FROM query_history
    WHERE user_id = $1
    ORDER BY created_at DESC
"#;

const LOAD_BY_TEXT: &str = r#"
    SELECT id::text AS id, user_id::text AS user_id, prompt, response, created_at
    FROM query_history
    WHERE user_id = $1::text
    ORDER BY created_at DESC
"#;

/// Owner filter bound with the column's own type, so an index on `user_id` applies
#[derive(Debug, Clone, PartialEq, Eq)]
enum UserKey {
    Uuid(uuid::Uuid),
    Text(String),
}

/// `None` when the id can never match a `uuid` column
fn user_key(column: UserIdColumn, user_id: &str) -> Option<UserKey> {
    match column {
        UserIdColumn::Uuid => uuid::Uuid::parse_str(user_id).ok().map(UserKey::Uuid),
        UserIdColumn::Text => Some(UserKey::Text(user_id.to_string())),
    }
}

/// Render a stored timestamp the way the API hands it out
fn format_created_at(created_at: DateTime<Utc>) -> String {
    created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// `timestamptz` decodes directly; a plain `timestamp` column is taken as UTC
fn decode_created_at(row: &PgRow) -> Result<String, sqlx::Error> {
    match row.try_get::<DateTime<Utc>, _>("created_at") {
        Ok(created_at) => Ok(format_created_at(created_at)),
        Err(_) => {
            let naive: NaiveDateTime = row.try_get("created_at")?;
            Ok(format_created_at(naive.and_utc()))
        }
    }
}

fn decode_row(row: &PgRow) -> Result<QueryHistoryRow, sqlx::Error> {
    Ok(QueryHistoryRow {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        prompt: row.try_get("prompt")?,
        response: row.try_get("response")?,
        created_at: decode_created_at(row)?,
    })
}

/// Load every history row owned by a user, newest first
pub async fn load_query_history(
    pool: &PgPool,
    column: UserIdColumn,
    user_id: &str,
) -> Result<Vec<QueryHistoryRow>, sqlx::Error> {
    let rows = match user_key(column, user_id) {
        Some(UserKey::Uuid(id)) => sqlx::query(LOAD_BY_UUID).bind(id).fetch_all(pool).await?,
        Some(UserKey::Text(id)) => sqlx::query(LOAD_BY_TEXT).bind(id).fetch_all(pool).await?,
        None => {
            log::debug!("User id {} is not a UUID, no history can match", user_id);
            return Ok(Vec::new());
        }
    };

    rows.iter().map(decode_row).collect()
}

/// History store backed by the shared PostgreSQL database
#[derive(Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
    user_id_column: UserIdColumn,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool, user_id_column: UserIdColumn) -> Self {
        Self {
            pool,
            user_id_column,
        }
    }

    pub async fn connect(config: &ConnectionConfig) -> Result<Self, StoreError> {
        let pool = create_pool(config).await?;
        log::info!(
            "Connected to history database {} on {}:{}",
            config.database,
            config.host,
            config.port
        );
        Ok(Self::new(pool, config.user_id_column))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl HistoryStore for PgHistoryStore {
    async fn fetch_user_history(&self, user_id: &str) -> Result<Vec<QueryHistoryRow>, StoreError> {
        Ok(load_query_history(&self.pool, self.user_id_column, user_id).await?)
    }
}
