//! Debounced persistence of the session document.
//!
//! Rapid edits coalesce into a single outbound save: each `schedule` call
//! replaces the pending snapshot and re-arms one timer; only the snapshot
//! present at expiry ever reaches the network. Acks carry the document
//! version they were computed from so a slow round-trip can never
//! overwrite the status of a newer one.

use crate::models::Document;
use crate::state::{AppContext, SaveStatus, SessionPhase};
use crate::util::{clear_timeout, set_timeout};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::{Arc, Mutex};

pub(crate) const SAVE_DEBOUNCE_MS: i32 = 1500;

/// Latest-wins slot behind the debounce timer.
#[derive(Debug)]
pub(crate) struct DebounceSlot<T> {
    pending: Option<T>,
}

impl<T> Default for DebounceSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> DebounceSlot<T> {
    pub fn push(&mut self, value: T) {
        self.pending = Some(value);
    }

    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }
}

/// Orders save acknowledgements by document version; anything older than
/// the newest applied ack is discarded.
#[derive(Debug, Default)]
pub(crate) struct SaveTracker {
    applied: u64,
}

impl SaveTracker {
    pub fn try_apply(&mut self, version: u64) -> bool {
        if version >= self.applied {
            self.applied = version;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone)]
struct PendingSave {
    version: u64,
    doc: Document,
}

#[derive(Clone)]
pub(crate) struct SaveController {
    app_state: AppContext,
    debounce_ms: i32,
    timer: Arc<Mutex<Option<i32>>>,
    pending: Arc<Mutex<DebounceSlot<PendingSave>>>,
    tracker: Arc<Mutex<SaveTracker>>,
}

impl SaveController {
    pub fn new(app_state: AppContext) -> Self {
        Self {
            app_state,
            debounce_ms: SAVE_DEBOUNCE_MS,
            timer: Arc::new(Mutex::new(None)),
            pending: Arc::new(Mutex::new(DebounceSlot::default())),
            tracker: Arc::new(Mutex::new(SaveTracker::default())),
        }
    }

    /// Record the latest snapshot and restart the idle timer. No-op until
    /// the initial load completed, so an empty document can never clobber
    /// the remote state.
    pub fn schedule(&self, version: u64, doc: Document) {
        if self.app_state.0.phase.get_untracked() != SessionPhase::Ready {
            return;
        }

        if let Ok(mut slot) = self.pending.lock() {
            slot.push(PendingSave { version, doc });
        }

        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.take() {
                clear_timeout(handle);
            }
            let s2 = self.clone();
            *timer = Some(set_timeout(self.debounce_ms, move || s2.flush()));
        }
    }

    fn flush(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            timer.take();
        }

        let Some(PendingSave { version, doc }) =
            self.pending.lock().ok().and_then(|mut slot| slot.take())
        else {
            return;
        };

        // "Sauvegarde..." the moment the round-trip actually starts, not
        // when it was scheduled.
        self.app_state.0.save_status.set(SaveStatus::Saving);

        let s2 = self.clone();
        spawn_local(async move {
            let result = s2.app_state.0.api_client.save_document(&doc).await;

            let applies = s2
                .tracker
                .lock()
                .map(|mut t| t.try_apply(version))
                .unwrap_or(false);
            if !applies {
                // A newer save already reported; this ack is stale.
                return;
            }

            match result {
                Ok(_) => s2.app_state.0.save_status.set(SaveStatus::Saved),
                Err(e) => s2
                    .app_state
                    .0
                    .save_status
                    .set(SaveStatus::Error(e.to_string())),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_slot_keeps_only_latest_snapshot() {
        let mut slot: DebounceSlot<(u64, Document)> = DebounceSlot::default();

        let mut doc1 = Document::default();
        doc1.seo.title = "one".to_string();
        let mut doc2 = Document::default();
        doc2.seo.title = "two".to_string();
        let mut doc3 = Document::default();
        doc3.seo.title = "three".to_string();

        slot.push((1, doc1));
        slot.push((2, doc2));
        slot.push((3, doc3));

        // Exactly one flush, carrying the last snapshot.
        let (version, doc) = slot.take().expect("pending snapshot");
        assert_eq!(version, 3);
        assert_eq!(doc.seo.title, "three");
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_save_tracker_discards_stale_acks() {
        let mut tracker = SaveTracker::default();

        assert!(tracker.try_apply(1));
        assert!(tracker.try_apply(3));
        // The slow v2 round-trip completes after v3 already reported.
        assert!(!tracker.try_apply(2));
        // Re-saving the same version is still reportable.
        assert!(tracker.try_apply(3));
    }
}
