use std::sync::OnceLock;
use tokio::sync::broadcast;

use crate::models::Toast;

const DEFAULT_CAPACITY: usize = 32;

static GLOBAL: OnceLock<Toaster> = OnceLock::new();

/// Broadcast surface for transient notifications. Cloning shares the channel.
#[derive(Debug, Clone)]
pub struct Toaster {
    tx: broadcast::Sender<Toast>,
}

impl Toaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// The process-wide surface, created on first use
    pub fn global() -> &'static Toaster {
        GLOBAL.get_or_init(|| Toaster::new(DEFAULT_CAPACITY))
    }

    /// Publish to every current subscriber; returns how many received it
    pub fn publish(&self, toast: Toast) -> usize {
        match self.tx.send(toast) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(toast)) => {
                log::debug!("No toast subscribers for \"{}\"", toast.title);
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Toaster::new(DEFAULT_CAPACITY)
    }
}
