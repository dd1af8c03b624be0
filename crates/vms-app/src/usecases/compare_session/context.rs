use std::sync::Arc;

use tokio::sync::Mutex;
use vms_core::session::ComparisonSessionState;
use vms_core::{SelectionSnapshot, SortToken, Startup};

use crate::usecases::internal::{LatestResults, RequestTicket};

/// Shared comparison session context.
///
/// ## Lock Ordering
/// `state` is only held while deciding and recording a transition, never across
/// a backend request; that is what lets a second `start_comparison` observe
/// `InProgress` and be rejected instead of queueing behind the first.
pub struct CompareSessionContext {
    state: Mutex<ComparisonSessionState>,
    sort: Mutex<SortToken>,
    last_error: Mutex<Option<String>>,
    /// Selection registered and submitted by the last successful compare.
    submitted: Mutex<Option<SelectionSnapshot>>,
    pub(crate) results: LatestResults<Startup>,
}

impl CompareSessionContext {
    pub fn new(initial_sort: SortToken) -> Self {
        Self {
            state: Mutex::new(ComparisonSessionState::Idle),
            sort: Mutex::new(initial_sort),
            last_error: Mutex::new(None),
            submitted: Mutex::new(None),
            results: LatestResults::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn get_state(&self) -> ComparisonSessionState {
        *self.state.lock().await
    }

    pub(crate) async fn lock_state(&self) -> tokio::sync::MutexGuard<'_, ComparisonSessionState> {
        self.state.lock().await
    }

    pub async fn sort(&self) -> SortToken {
        self.sort.lock().await.clone()
    }

    /// Read the active sort and take a result ticket in one critical section, so
    /// a ticket is never paired with a sort that was already replaced.
    pub(crate) async fn begin_fetch(&self) -> (SortToken, RequestTicket) {
        let sort = self.sort.lock().await;
        (sort.clone(), self.results.issue())
    }

    /// Replace the active sort and take a result ticket for it.
    pub(crate) async fn replace_sort(
        &self,
        update: impl FnOnce(&SortToken) -> SortToken,
    ) -> (SortToken, RequestTicket) {
        let mut sort = self.sort.lock().await;
        *sort = update(&*sort);
        (sort.clone(), self.results.issue())
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    pub async fn record_error(&self, message: Option<String>) {
        *self.last_error.lock().await = message;
    }

    pub(crate) async fn submitted(&self) -> Option<SelectionSnapshot> {
        self.submitted.lock().await.clone()
    }

    pub(crate) async fn set_submitted(&self, snapshot: Option<SelectionSnapshot>) {
        *self.submitted.lock().await = snapshot;
    }

    pub async fn results(&self) -> Arc<Vec<Startup>> {
        self.results.current().await
    }
}
