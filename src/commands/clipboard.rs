use std::time::Duration;

use crate::clipboard::Clipboard;
use crate::db::HistoryStore;
use crate::models::Toast;
use crate::state::PageState;

/// Copy the open record's response
pub async fn copy_selected_response<S: HistoryStore, C: Clipboard>(
    state: &PageState<S, C>,
) -> Result<(), String> {
    let entry = state
        .selected()
        .ok_or_else(|| "No history entry is open".to_string())?;

    copy_text(state, entry.response).await
}

/// Write `text` to the clipboard. Success shows the check mark for the
/// configured feedback window and a toast; failure only shows a destructive toast.
pub async fn copy_text<S: HistoryStore, C: Clipboard>(
    state: &PageState<S, C>,
    text: String,
) -> Result<(), String> {
    if let Err(e) = state.clipboard.write_text(text).await {
        log::warn!("Clipboard write failed: {}", e);
        state.toaster.publish(Toast::new("Failed to copy.").destructive());
        return Err(format!("Failed to copy: {}", e));
    }

    let indicator = state.copy_indicator().clone();
    let epoch = indicator.mark();
    state
        .toaster
        .publish(Toast::new("Copied!").with_description("Query copied to clipboard."));

    let feedback = Duration::from_millis(state.settings.copy.feedback_ms);
    tokio::spawn(async move {
        tokio::time::sleep(feedback).await;
        indicator.revert(epoch);
    });

    Ok(())
}
