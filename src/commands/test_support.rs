use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::db::{HistoryStore, StoreError};
use crate::models::{DisplaySettings, PageSettings, QueryHistoryRow, TimeZoneSetting};
use crate::state::PageState;
use crate::toast::Toaster;

/// In-memory store that records who asked and can hold or fail a fetch
#[derive(Clone, Default)]
pub struct FakeStore {
    rows: Arc<Mutex<HashMap<String, Vec<QueryHistoryRow>>>>,
    calls: Arc<Mutex<Vec<String>>>,
    gates: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
    fail: Arc<AtomicBool>,
}

impl FakeStore {
    pub fn with_rows(self, user_id: &str, rows: Vec<QueryHistoryRow>) -> Self {
        self.rows.lock().unwrap().insert(user_id.to_string(), rows);
        self
    }

    /// Hold fetches for `user_id` until the returned notify is signalled
    pub fn gate(&self, user_id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(user_id.to_string(), Arc::clone(&notify));
        notify
    }

    pub fn fail_fetches(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl HistoryStore for FakeStore {
    async fn fetch_user_history(&self, user_id: &str) -> Result<Vec<QueryHistoryRow>, StoreError> {
        self.calls.lock().unwrap().push(user_id.to_string());

        let gate = self.gates.lock().unwrap().get(user_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows));
        }

        let rows = self.rows.lock().unwrap().get(user_id).cloned();
        Ok(rows.unwrap_or_default())
    }
}

/// Clipboard that keeps what was written, or refuses every write
#[derive(Clone, Default)]
pub struct FakeClipboard {
    writes: Arc<Mutex<Vec<String>>>,
    deny: Arc<AtomicBool>,
}

impl FakeClipboard {
    pub fn denying() -> Self {
        let clipboard = FakeClipboard::default();
        clipboard.deny.store(true, Ordering::SeqCst);
        clipboard
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: String) -> Result<(), ClipboardError> {
        if self.deny.load(Ordering::SeqCst) {
            return Err(ClipboardError::Unavailable("permission denied".to_string()));
        }
        self.writes.lock().unwrap().push(text);
        Ok(())
    }
}

pub fn row(id: &str, user_id: &str, prompt: &str, response: &str, created_at: &str) -> QueryHistoryRow {
    QueryHistoryRow {
        id: id.to_string(),
        user_id: user_id.to_string(),
        prompt: prompt.to_string(),
        response: response.to_string(),
        created_at: created_at.to_string(),
    }
}

pub fn sales_rows(user_id: &str) -> Vec<QueryHistoryRow> {
    vec![
        row(
            "h-2",
            user_id,
            "show sales",
            "SELECT * FROM sales\n---\nSELECT count(*) FROM sales",
            "2024-01-02T10:30:00Z",
        ),
        row(
            "h-1",
            user_id,
            "list open orders",
            "SELECT * FROM orders WHERE status = 'open'",
            "2024-01-01T08:15:00Z",
        ),
    ]
}

pub fn utc_settings() -> PageSettings {
    PageSettings {
        display: DisplaySettings {
            time_zone: TimeZoneSetting::FixedOffset { minutes: 0 },
            ..DisplaySettings::default()
        },
        ..PageSettings::default()
    }
}

pub fn page(store: FakeStore, clipboard: FakeClipboard) -> PageState<FakeStore, FakeClipboard> {
    PageState::new(store, clipboard, Toaster::new(8), utc_settings())
}

/// Yield to spawned tasks until `cond` holds or a second of mock/real time passes
pub async fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}
