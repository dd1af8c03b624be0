//! Sequence-numbered result slot.
//!
//! Fetches that may overlap (re-sorts, re-fetches after compare/cancel) take a
//! [`RequestTicket`] before the request is issued. A result is committed only if
//! its ticket is still the most recently issued one, so a slow, superseded
//! response can never overwrite a newer one regardless of arrival order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

/// Position of a request in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What happened to a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result is now the current result set.
    Applied,
    /// A newer request was issued meanwhile; the result was discarded.
    Superseded,
    /// No request was needed and the result set was emptied.
    Cleared,
    /// Nothing changed, no request was issued.
    Unchanged,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied)
    }
}

pub struct LatestResults<T> {
    issued: AtomicU64,
    current: RwLock<Arc<Vec<T>>>,
}

impl<T> LatestResults<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            current: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Replace the result set wholesale if `ticket` is still the latest.
    pub async fn commit(&self, ticket: RequestTicket, items: Vec<T>) -> FetchOutcome {
        let mut current = self.current.write().await;
        if !self.is_current(ticket) {
            return FetchOutcome::Superseded;
        }
        *current = Arc::new(items);
        FetchOutcome::Applied
    }

    /// Empty the result set and invalidate every in-flight request.
    pub async fn clear(&self) {
        let ticket = self.issue();
        let mut current = self.current.write().await;
        if self.is_current(ticket) {
            *current = Arc::new(Vec::new());
        }
    }

    pub async fn current(&self) -> Arc<Vec<T>> {
        self.current.read().await.clone()
    }
}

impl<T> Default for LatestResults<T> {
    fn default() -> Self {
        Self::new()
    }
}
