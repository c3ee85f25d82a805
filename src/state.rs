use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clipboard::Clipboard;
use crate::db::HistoryStore;
use crate::models::{HistoryEntry, PageSettings};
use crate::toast::Toaster;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct CopyState {
    copied: bool,
    epoch: u64,
}

/// The "copied" check mark. Each successful copy starts a new epoch; a pending
/// revert only clears the mark if no newer copy happened since.
#[derive(Debug, Clone, Default)]
pub struct CopyIndicator {
    inner: Arc<Mutex<CopyState>>,
}

impl CopyIndicator {
    /// Show the check mark and return the epoch its revert must match
    pub fn mark(&self) -> u64 {
        let mut state = lock(&self.inner);
        state.epoch += 1;
        state.copied = true;
        state.epoch
    }

    /// Hide the check mark if `epoch` is still the latest copy
    pub fn revert(&self, epoch: u64) -> bool {
        let mut state = lock(&self.inner);
        if state.epoch == epoch {
            state.copied = false;
            true
        } else {
            false
        }
    }

    pub fn is_copied(&self) -> bool {
        lock(&self.inner).copied
    }
}

#[derive(Debug, Default)]
struct LoadedEntries {
    entries: Vec<HistoryEntry>,
    generation: u64,
}

/// Render state of the history page plus the collaborators its handlers use
pub struct PageState<S, C> {
    pub store: S,
    pub clipboard: C,
    pub toaster: Toaster,
    pub settings: PageSettings,

    /// Records from the last successful fetch, tagged with the load generation
    loaded: Mutex<LoadedEntries>,

    /// Next generation handed to a fetch
    next_generation: AtomicU64,

    search_term: Mutex<String>,

    /// Record open in the detail dialog
    selected: Mutex<Option<HistoryEntry>>,

    copy_indicator: CopyIndicator,
}

impl<S: HistoryStore, C: Clipboard> PageState<S, C> {
    pub fn new(store: S, clipboard: C, toaster: Toaster, settings: PageSettings) -> Self {
        Self {
            store,
            clipboard,
            toaster,
            settings,
            loaded: Mutex::new(LoadedEntries::default()),
            next_generation: AtomicU64::new(0),
            search_term: Mutex::new(String::new()),
            selected: Mutex::new(None),
            copy_indicator: CopyIndicator::default(),
        }
    }

    /// Snapshot of the loaded records
    pub fn entries(&self) -> Vec<HistoryEntry> {
        lock(&self.loaded).entries.clone()
    }

    /// Start a fetch and get the generation its result must carry
    pub fn begin_load(&self) -> u64 {
        // Allocated under the lock: the stored generation is the highest handed out
        let mut loaded = lock(&self.loaded);
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        loaded.generation = generation;
        generation
    }

    /// Replace the records wholesale unless a newer fetch or identity change
    /// happened after `generation` began
    pub fn replace_entries_if_current(&self, generation: u64, entries: Vec<HistoryEntry>) -> bool {
        let mut loaded = lock(&self.loaded);
        if loaded.generation != generation {
            return false;
        }
        loaded.entries = entries;
        true
    }

    /// Drop the records and selection of the previous identity and orphan any
    /// in-flight fetch
    pub fn reset_for_identity_change(&self) {
        {
            let mut loaded = lock(&self.loaded);
            loaded.generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
            loaded.entries.clear();
        }
        *lock(&self.selected) = None;
    }

    pub fn search_term(&self) -> String {
        lock(&self.search_term).clone()
    }

    pub fn set_search_term(&self, term: String) {
        *lock(&self.search_term) = term;
    }

    pub fn selected(&self) -> Option<HistoryEntry> {
        lock(&self.selected).clone()
    }

    pub fn set_selected(&self, entry: Option<HistoryEntry>) {
        *lock(&self.selected) = entry;
    }

    pub fn copy_indicator(&self) -> &CopyIndicator {
        &self.copy_indicator
    }
}
