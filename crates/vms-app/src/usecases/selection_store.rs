//! Selection store.
//!
//! Owns the primary and candidate [`SelectionSet`]s. Only interaction handlers
//! mutate it; coordinators get a [`SelectionReader`], a read-only subscription
//! that is notified after every effective mutation.

use tokio::sync::watch;
use tracing::debug;

use vms_core::selection::{SelectionError, SelectionSet, SelectionSnapshot};
use vms_core::{Startup, StartupId};

pub struct SelectionStore {
    tx: watch::Sender<SelectionSnapshot>,
    candidate_limit: usize,
}

impl SelectionStore {
    pub fn new(candidate_limit: usize) -> Self {
        let (tx, _rx) = watch::channel(SelectionSnapshot::default());
        Self { tx, candidate_limit }
    }

    pub fn candidate_limit(&self) -> usize {
        self.candidate_limit
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> SelectionReader {
        SelectionReader {
            rx: self.tx.subscribe(),
        }
    }

    /// Add one of the user's own startups. Returns whether it was inserted.
    pub fn add_primary(&self, startup: Startup) -> bool {
        let id = startup.id;
        let inserted = self.tx.send_if_modified(|s| s.primary.add(startup));
        debug!(startup_id = %id, inserted, "primary selection add");
        inserted
    }

    pub fn remove_primary(&self, id: StartupId) -> bool {
        let removed = self.tx.send_if_modified(|s| s.primary.remove(id));
        debug!(startup_id = %id, removed, "primary selection remove");
        removed
    }

    /// Add a comparison candidate. Duplicates are a no-op even when the set is full.
    pub fn add_candidate(&self, startup: Startup) -> Result<bool, SelectionError> {
        let id = startup.id;
        let limit = self.candidate_limit;
        let mut outcome = Ok(false);
        self.tx.send_if_modified(|s| {
            if s.candidates.contains(id) {
                return false;
            }
            if s.candidates.len() >= limit {
                outcome = Err(SelectionError::CandidateLimitReached { limit });
                return false;
            }
            outcome = Ok(s.candidates.add(startup));
            true
        });
        debug!(startup_id = %id, ?outcome, "candidate selection add");
        outcome
    }

    pub fn remove_candidate(&self, id: StartupId) -> bool {
        let removed = self.tx.send_if_modified(|s| s.candidates.remove(id));
        debug!(startup_id = %id, removed, "candidate selection remove");
        removed
    }

    /// Replace the whole candidate list (the candidate picker confirms a full list).
    pub fn replace_candidates(
        &self,
        startups: impl IntoIterator<Item = Startup>,
    ) -> Result<(), SelectionError> {
        let candidates: SelectionSet = startups.into_iter().collect();
        if candidates.len() > self.candidate_limit {
            return Err(SelectionError::CandidateLimitReached {
                limit: self.candidate_limit,
            });
        }
        let count = candidates.len();
        self.tx.send_if_modified(|s| {
            if s.candidates == candidates {
                return false;
            }
            s.candidates = candidates;
            true
        });
        debug!(count, "candidate selection replaced");
        Ok(())
    }

    /// Clear both selections.
    pub fn reset(&self) {
        self.tx.send_if_modified(|s| {
            if s.is_empty() {
                return false;
            }
            s.primary.reset();
            s.candidates.reset();
            true
        });
        debug!("selections reset");
    }
}

/// Read-only subscription to a [`SelectionStore`].
#[derive(Clone)]
pub struct SelectionReader {
    rx: watch::Receiver<SelectionSnapshot>,
}

impl SelectionReader {
    pub fn snapshot(&self) -> SelectionSnapshot {
        self.rx.borrow().clone()
    }

    /// Current reference startup, marking the snapshot as seen.
    pub fn observe_reference(&mut self) -> Option<StartupId> {
        self.rx.borrow_and_update().reference_id()
    }

    /// Wait for the next mutation. Errors once the store is dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}
