//! Rank query controller.
//!
//! Keeps the rank table in sync with the first startup of the primary
//! selection. Unlike the comparison session it is never triggered by the user
//! directly: it listens to [`SelectionReader`] change notifications and only
//! re-fetches when the reference id or its own sort changes.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use vms_core::ports::{BackendError, RankPort};
use vms_core::{RankedStartup, SortDirection, SortToken, StartupId};

use crate::usecases::internal::{FetchOutcome, LatestResults, RequestTicket};
use crate::usecases::selection_store::SelectionReader;

#[derive(Debug, thiserror::Error)]
pub enum RankQueryError {
    #[error(transparent)]
    RequestFailed(#[from] BackendError),
}

#[derive(Debug, Clone)]
struct RankQuery {
    reference: Option<StartupId>,
    sort: SortToken,
}

#[derive(Debug, Clone)]
pub struct RankQuerySnapshot {
    pub reference: Option<StartupId>,
    pub sort: SortToken,
    pub results: Arc<Vec<RankedStartup>>,
    pub last_error: Option<String>,
}

pub struct RankQueryController {
    query: Mutex<RankQuery>,
    results: LatestResults<RankedStartup>,
    last_error: Mutex<Option<String>>,
    rank_port: Arc<dyn RankPort>,
}

impl RankQueryController {
    pub fn new(rank_port: Arc<dyn RankPort>, initial_sort: SortToken) -> Self {
        Self {
            query: Mutex::new(RankQuery {
                reference: None,
                sort: initial_sort,
            }),
            results: LatestResults::new(),
            last_error: Mutex::new(None),
            rank_port,
        }
    }

    /// Point the controller at a new reference startup.
    ///
    /// Same reference: nothing happens. `None`: results are cleared without a
    /// request.
    pub async fn sync_reference(
        &self,
        reference: Option<StartupId>,
    ) -> Result<FetchOutcome, RankQueryError> {
        let pending = {
            let mut query = self.query.lock().await;
            if query.reference == reference {
                return Ok(FetchOutcome::Unchanged);
            }
            debug!(from = ?query.reference, to = ?reference, "rank reference changed");
            query.reference = reference;
            self.begin_fetch(&query)
        };
        self.settle(pending).await
    }

    /// Change the sort field, keeping the direction.
    pub async fn set_sort_by(
        &self,
        field: impl Into<String>,
    ) -> Result<FetchOutcome, RankQueryError> {
        let field = field.into();
        self.resort(move |sort| sort.clone().with_field(field)).await
    }

    /// Change the direction, keeping the field.
    pub async fn set_order_by(
        &self,
        direction: SortDirection,
    ) -> Result<FetchOutcome, RankQueryError> {
        self.resort(move |sort| sort.clone().with_direction(direction))
            .await
    }

    /// Replace both halves from a `field_direction` token.
    pub async fn set_sort(&self, token: &str) -> Result<FetchOutcome, RankQueryError> {
        let sort = SortToken::decode(token);
        self.resort(move |_| sort).await
    }

    /// Re-fetch the current query.
    pub async fn refresh(&self) -> Result<FetchOutcome, RankQueryError> {
        let pending = {
            let query = self.query.lock().await;
            self.begin_fetch(&query)
        };
        self.settle(pending).await
    }

    /// Forget the reference and empty the results.
    pub async fn clear(&self) {
        self.query.lock().await.reference = None;
        self.results.clear().await;
        *self.last_error.lock().await = None;
    }

    pub async fn reference(&self) -> Option<StartupId> {
        self.query.lock().await.reference
    }

    pub async fn sort(&self) -> SortToken {
        self.query.lock().await.sort.clone()
    }

    pub async fn results(&self) -> Arc<Vec<RankedStartup>> {
        self.results.current().await
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    pub async fn snapshot(&self) -> RankQuerySnapshot {
        let query = self.query.lock().await.clone();
        RankQuerySnapshot {
            reference: query.reference,
            sort: query.sort,
            results: self.results.current().await,
            last_error: self.last_error.lock().await.clone(),
        }
    }

    /// Follow the selection store until it is dropped.
    ///
    /// The current reference is applied immediately, then again after every
    /// change notification.
    pub fn spawn_selection_listener(self: Arc<Self>, mut reader: SelectionReader) -> JoinHandle<()> {
        let span = info_span!("usecase.rank_query.selection_listener");
        tokio::spawn(
            async move {
                loop {
                    let reference = reader.observe_reference();
                    if let Err(err) = self.sync_reference(reference).await {
                        warn!(error = %err, "rank refresh after selection change failed");
                    }
                    if reader.changed().await.is_err() {
                        info!("selection store closed, rank listener stopping");
                        break;
                    }
                }
            }
            .instrument(span),
        )
    }

    async fn resort(
        &self,
        update: impl FnOnce(&SortToken) -> SortToken,
    ) -> Result<FetchOutcome, RankQueryError> {
        let pending = {
            let mut query = self.query.lock().await;
            query.sort = update(&query.sort);
            debug!(sort = %query.sort, "rank sort changed");
            if query.reference.is_none() {
                return Ok(FetchOutcome::Unchanged);
            }
            self.begin_fetch(&query)
        };
        self.settle(pending).await
    }

    /// Take a ticket for `query` while its lock is held.
    fn begin_fetch(&self, query: &RankQuery) -> Option<(StartupId, SortToken, RequestTicket)> {
        query
            .reference
            .map(|reference| (reference, query.sort.clone(), self.results.issue()))
    }

    async fn settle(
        &self,
        pending: Option<(StartupId, SortToken, RequestTicket)>,
    ) -> Result<FetchOutcome, RankQueryError> {
        let Some((reference, sort, ticket)) = pending else {
            self.results.clear().await;
            *self.last_error.lock().await = None;
            return Ok(FetchOutcome::Cleared);
        };

        let span = info_span!(
            "usecase.rank_query.fetch",
            reference = %reference,
            sort = %sort,
            ticket = ticket.sequence()
        );
        async {
            match self.rank_port.fetch_rank_results(reference, sort).await {
                Ok(items) => {
                    let count = items.len();
                    let outcome = self.results.commit(ticket, items).await;
                    if outcome.is_applied() {
                        *self.last_error.lock().await = None;
                    }
                    debug!(count, ?outcome, "rank results settled");
                    Ok(outcome)
                }
                Err(err) if !self.results.is_current(ticket) => {
                    debug!(error = %err, "ignoring failure of superseded rank fetch");
                    Ok(FetchOutcome::Superseded)
                }
                Err(err) => {
                    warn!(error = %err, "rank fetch failed");
                    *self.last_error.lock().await = Some(err.to_string());
                    Err(err.into())
                }
            }
        }
        .instrument(span)
        .await
    }
}
