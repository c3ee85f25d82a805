use std::sync::Arc;

use futures::future::{AbortHandle, Abortable};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::clipboard::Clipboard;
use crate::db::HistoryStore;
use crate::models::{filter_entries, AuthSnapshot, HistoryEntry};
use crate::state::PageState;

/// What a history fetch did to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No signed-in user, nothing was requested
    Skipped,
    /// The list was replaced with this many records
    Loaded(usize),
    /// The store failed; the list was left alone
    Failed,
    /// A newer fetch or identity change won; the response was dropped
    Stale,
}

/// Fetch a user's history and replace the loaded records.
/// Failures are logged and otherwise silent.
pub async fn load_query_history<S: HistoryStore, C: Clipboard>(
    state: &PageState<S, C>,
    user_id: Option<&str>,
) -> LoadOutcome {
    let Some(user_id) = user_id else {
        return LoadOutcome::Skipped;
    };

    let generation = state.begin_load();
    let rows = match state.store.fetch_user_history(user_id).await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("Failed to load query history for {}: {}", user_id, e);
            return LoadOutcome::Failed;
        }
    };

    let entries: Vec<HistoryEntry> = rows
        .into_iter()
        .map(|row| HistoryEntry::from_row(row, &state.settings.display))
        .collect();
    let count = entries.len();

    if state.replace_entries_if_current(generation, entries) {
        log::info!("Loaded {} history entries for {}", count, user_id);
        LoadOutcome::Loaded(count)
    } else {
        log::debug!("Discarding stale history response for {}", user_id);
        LoadOutcome::Stale
    }
}

/// Update the search box text
pub fn set_search_term<S: HistoryStore, C: Clipboard>(state: &PageState<S, C>, term: impl Into<String>) {
    state.set_search_term(term.into());
}

/// Loaded records matching the current search text, in load order
pub fn filtered_entries<S: HistoryStore, C: Clipboard>(state: &PageState<S, C>) -> Vec<HistoryEntry> {
    let entries = state.entries();
    let term = state.search_term();
    filter_entries(&entries, &term).into_iter().cloned().collect()
}

/// Re-run the history fetch whenever the signed-in user changes.
///
/// A change of identity drops the previous user's records and aborts their
/// fetch if it is still running. Snapshots that keep the same user (a loading
/// flag flip, say) do not refetch. The task ends when the session sender is
/// dropped.
pub fn spawn_history_effect<S: HistoryStore, C: Clipboard>(
    state: Arc<PageState<S, C>>,
    mut session: watch::Receiver<AuthSnapshot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut current: Option<String> = None;
        let mut in_flight: Option<AbortHandle> = None;

        loop {
            let user_id = session.borrow_and_update().user_id.clone();

            if user_id != current {
                if let Some(handle) = in_flight.take() {
                    handle.abort();
                }
                if current.is_some() {
                    state.reset_for_identity_change();
                }
                current = user_id.clone();

                if let Some(user_id) = user_id {
                    let (handle, registration) = AbortHandle::new_pair();
                    let state = Arc::clone(&state);
                    tokio::spawn(Abortable::new(
                        async move {
                            load_query_history(&*state, Some(user_id.as_str())).await;
                        },
                        registration,
                    ));
                    in_flight = Some(handle);
                }
            }

            if session.changed().await.is_err() {
                break;
            }
        }

        if let Some(handle) = in_flight {
            handle.abort();
        }
    })
}
