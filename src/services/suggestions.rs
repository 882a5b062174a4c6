//! Search-as-you-type destination suggestions.
//!
//! Keystrokes arrive through [`SuggestionDebouncer::input`]. At most one timer
//! is pending at any moment; every new keystroke aborts it and, when the query
//! is long enough, starts a fresh one. Only the timer that survives the full
//! quiet period issues a lookup. Each keystroke also bumps a sequence number,
//! and a lookup result is applied only if its sequence is still current.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::services::place_lookup::PlaceLookup;

/// Queries shorter than this (after trimming) never reach the lookup service.
pub const MIN_QUERY_CHARS: usize = 2;

/// Default quiet period between the last keystroke and the lookup.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// What the presentation layer should show under the destination input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionState {
    #[serde(skip)]
    pub seq: u64,
    pub suggestions: Vec<String>,
    pub visible: bool,
}

pub struct SuggestionDebouncer {
    lookup: Arc<dyn PlaceLookup>,
    quiet_period: Duration,
    state: Arc<watch::Sender<SuggestionState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SuggestionDebouncer {
    pub fn new(lookup: Arc<dyn PlaceLookup>, quiet_period: Duration) -> Self {
        let (tx, _rx) = watch::channel(SuggestionState::default());
        Self {
            lookup,
            quiet_period,
            state: Arc::new(tx),
            pending: Mutex::new(None),
        }
    }

    /// Current suggestion list and visibility.
    pub fn current(&self) -> SuggestionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.state.subscribe()
    }

    /// Feed the latest value of the destination input.
    ///
    /// Must be called from within a tokio runtime.
    pub fn input(&self, text: &str) {
        let mut pending = self.pending.lock();
        if let Some(timer) = pending.take() {
            timer.abort();
        }

        let query = text.trim().to_string();
        let too_short = query.chars().count() < MIN_QUERY_CHARS;

        let mut seq = 0;
        self.state.send_modify(|s| {
            s.seq += 1;
            seq = s.seq;
            if too_short {
                s.suggestions.clear();
                s.visible = false;
            }
        });

        if too_short {
            return;
        }

        let lookup = Arc::clone(&self.lookup);
        let state = Arc::clone(&self.state);
        let quiet_period = self.quiet_period;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let superseded = state.borrow().seq != seq;
            if superseded {
                return;
            }

            tracing::debug!(query = %query, "Looking up destination suggestions");
            let suggestions = match lookup.search(&query).await {
                Ok(found) => found,
                Err(e) => {
                    metrics::counter!("place_lookup_failures_total").increment(1);
                    tracing::warn!(query = %query, error = %e, "Failed to fetch destination suggestions");
                    Vec::new()
                }
            };

            let applied = state.send_if_modified(|s| {
                if s.seq != seq {
                    return false;
                }
                s.visible = !suggestions.is_empty();
                s.suggestions = suggestions;
                true
            });
            if !applied {
                tracing::debug!(query = %query, "Discarding suggestions for superseded input");
            }
        }));
    }

    /// Input regained focus: show whatever list is already held.
    pub fn focus(&self) {
        self.state.send_if_modified(|s| {
            let visible = !s.suggestions.is_empty();
            let changed = s.visible != visible;
            s.visible = visible;
            changed
        });
    }

    /// Input lost focus: drop the list and any pending lookup.
    pub fn blur(&self) {
        self.clear();
    }

    /// A suggestion was picked. Returns the chosen display string.
    pub fn select(&self, choice: &str) -> String {
        self.dismiss();
        choice.to_string()
    }

    /// Hide the list without discarding it.
    pub fn dismiss(&self) {
        self.cancel_pending();
        self.state.send_modify(|s| {
            s.seq += 1;
            s.visible = false;
        });
    }

    /// Discard the list and cancel any pending lookup.
    pub fn clear(&self) {
        self.cancel_pending();
        self.state.send_modify(|s| {
            s.seq += 1;
            s.suggestions.clear();
            s.visible = false;
        });
    }

    fn cancel_pending(&self) {
        if let Some(timer) = self.pending.lock().take() {
            timer.abort();
        }
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
