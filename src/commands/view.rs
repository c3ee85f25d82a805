use crate::clipboard::Clipboard;
use crate::db::HistoryStore;
use crate::models::{
    format_display_date, ControlView, CopyIcon, DetailDialogView, DisplaySettings, EmptyStateView,
    EntryCardView, HistoryEntry, PageView, SearchBarView,
};
use crate::state::PageState;

use super::query_history::filtered_entries;

/// Badge text; the page always says "queries", even for one
fn query_count_label(count: usize) -> String {
    format!("{} queries", count)
}

fn entry_card(entry: &HistoryEntry, display: &DisplaySettings) -> EntryCardView {
    EntryCardView {
        id: entry.id.clone(),
        description: entry.description.clone(),
        display_date: format_display_date(&entry.date, &display.date_pattern),
        time: entry.time.clone(),
        query_count_label: query_count_label(entry.query_count),
        action_label: "View Queries".to_string(),
    }
}

fn inert(label: &str) -> ControlView {
    ControlView {
        label: label.to_string(),
        inert: true,
    }
}

/// Everything the page shows for its current state
pub fn render_page<S: HistoryStore, C: Clipboard>(state: &PageState<S, C>) -> PageView {
    let visible = filtered_entries(state);
    let display = &state.settings.display;
    let entries: Vec<EntryCardView> = visible.iter().map(|entry| entry_card(entry, display)).collect();

    let empty_state = entries.is_empty().then(|| EmptyStateView {
        title: "No queries found".to_string(),
        hint: "Try adjusting your search terms".to_string(),
    });

    // Placeholder until the store supports paging
    let load_more = (!entries.is_empty()).then(|| inert("Load More History"));

    let copy_icon = if state.copy_indicator().is_copied() {
        CopyIcon::Check
    } else {
        CopyIcon::Copy
    };
    let dialog = state.selected().map(|entry| DetailDialogView {
        title: "Generated SQL".to_string(),
        entry_id: entry.id,
        prompt: entry.description,
        response: entry.response,
        copy_icon,
        close_label: "Close".to_string(),
    });

    PageView {
        title: "Query History".to_string(),
        subtitle: "Revisit your magical SQL generations".to_string(),
        search: SearchBarView {
            placeholder: state.settings.search.placeholder.clone(),
            value: state.search_term(),
        },
        filter_button: inert("Filter"),
        entries,
        empty_state,
        load_more,
        dialog,
    }
}
