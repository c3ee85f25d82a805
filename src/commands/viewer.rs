use crate::clipboard::Clipboard;
use crate::db::HistoryStore;
use crate::models::HistoryEntry;
use crate::state::PageState;

use super::query_history::filtered_entries;

/// Open the detail dialog on a record from the currently visible list
pub fn open_entry<S: HistoryStore, C: Clipboard>(
    state: &PageState<S, C>,
    entry_id: &str,
) -> Result<HistoryEntry, String> {
    let entry = filtered_entries(state)
        .into_iter()
        .find(|entry| entry.id == entry_id)
        .ok_or_else(|| format!("History entry not visible: {}", entry_id))?;

    state.set_selected(Some(entry.clone()));
    Ok(entry)
}

/// Close the detail dialog
pub fn close_entry<S: HistoryStore, C: Clipboard>(state: &PageState<S, C>) {
    state.set_selected(None);
}

/// Dialog open-state callback; dismissing the dialog clears the selection
pub fn set_dialog_open<S: HistoryStore, C: Clipboard>(state: &PageState<S, C>, open: bool) {
    if !open {
        close_entry(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::query_history::{load_query_history, set_search_term};
    use crate::commands::test_support::*;

    #[tokio::test]
    async fn open_close_then_open_another() {
        let store = FakeStore::default().with_rows("u-1", sales_rows("u-1"));
        let state = page(store, FakeClipboard::default());
        load_query_history(&state, Some("u-1")).await;

        let opened = open_entry(&state, "h-2").unwrap();
        assert_eq!(opened.description, "show sales");
        assert_eq!(state.selected().map(|e| e.id), Some("h-2".to_string()));

        close_entry(&state);
        assert_eq!(state.selected(), None);

        open_entry(&state, "h-1").unwrap();
        let selected = state.selected().unwrap();
        assert_eq!(selected.id, "h-1");
        assert_eq!(selected.response, "SELECT * FROM orders WHERE status = 'open'");
    }

    #[tokio::test]
    async fn dismissing_the_dialog_clears_selection() {
        let store = FakeStore::default().with_rows("u-1", sales_rows("u-1"));
        let state = page(store, FakeClipboard::default());
        load_query_history(&state, Some("u-1")).await;
        open_entry(&state, "h-2").unwrap();

        set_dialog_open(&state, true);
        assert!(state.selected().is_some());

        set_dialog_open(&state, false);
        assert!(state.selected().is_none());
    }

    #[tokio::test]
    async fn only_visible_entries_can_be_opened() {
        let store = FakeStore::default().with_rows("u-1", sales_rows("u-1"));
        let state = page(store, FakeClipboard::default());
        load_query_history(&state, Some("u-1")).await;

        set_search_term(&state, "orders");
        assert!(open_entry(&state, "h-2").is_err());
        assert!(open_entry(&state, "missing").is_err());
        assert!(state.selected().is_none());
    }
}
