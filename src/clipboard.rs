use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Asynchronous text clipboard
pub trait Clipboard: Send + Sync + 'static {
    fn write_text(&self, text: String) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// The platform clipboard. Each write opens a fresh handle on a blocking thread,
/// since holding one across tasks is not portable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: String) -> Result<(), ClipboardError> {
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?
    }
}
