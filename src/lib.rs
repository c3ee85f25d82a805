//! Backend for the query history page: loads a user's generated SQL sessions,
//! filters them by prompt, and copies the generated SQL to the clipboard.

use std::path::Path;
use std::sync::Arc;

pub mod clipboard;
pub mod commands;
pub mod db;
pub mod models;
pub mod session;
pub mod state;
pub mod toast;

pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use db::{HistoryStore, PgHistoryStore, SqliteHistoryStore, StoreError};
pub use session::AuthSession;
pub use state::PageState;
pub use toast::Toaster;

/// Install the `env_logger` backend for the `log` macros. `RUST_LOG`
/// overrides the default `info` level. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// Set up a page over a local history database, reading page settings from
/// the same file, and start following `session`. Must run inside a tokio runtime.
pub fn open_local_page(
    app_data_dir: &Path,
    session: &AuthSession,
) -> Result<Arc<PageState<SqliteHistoryStore, SystemClipboard>>, StoreError> {
    let store = SqliteHistoryStore::open(app_data_dir)?;
    let settings = store.with_connection(db::sqlite::load_settings)?;

    let state = Arc::new(PageState::new(
        store,
        SystemClipboard,
        Toaster::global().clone(),
        settings,
    ));
    commands::spawn_history_effect(Arc::clone(&state), session.subscribe());

    log::info!("Query history page ready ({})", app_data_dir.display());
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClockStyle;

    #[tokio::test]
    async fn local_page_follows_the_session() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();

        {
            let conn = db::sqlite::init_database(dir.path()).unwrap();
            let mut settings = models::PageSettings::default();
            settings.display.clock = ClockStyle::TwentyFourHour;
            db::sqlite::save_settings(&conn, &settings).unwrap();
            db::sqlite::record_generation(
                &conn,
                "u-1",
                "show sales",
                &["SELECT * FROM sales".to_string(), "SELECT count(*) FROM sales".to_string()],
            )
            .unwrap();
        }

        let session = AuthSession::default();
        let page = open_local_page(dir.path(), &session).unwrap();
        assert_eq!(page.settings.display.clock, ClockStyle::TwentyFourHour);
        assert!(page.entries().is_empty());

        session.sign_in("u-1");
        for _ in 0..200 {
            if !page.entries().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let entries = page.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "show sales");
        assert_eq!(entries[0].query_count, 2);
    }
}
