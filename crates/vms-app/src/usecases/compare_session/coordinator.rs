//! Comparison session coordinator.
//!
//! Drives the compare / cancel lifecycle through [`CompareSessionStateMachine`]
//! and executes the returned actions against the backend ports.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info, info_span, warn, Instrument};

use vms_core::ports::{BackendError, BackendOperation, ComparisonPort, SelectionPort};
use vms_core::session::{
    CompareSessionStateMachine, ComparisonSessionState, SessionAction, SessionEvent,
    SessionOperation,
};
use vms_core::{SelectionSnapshot, SortDirection, SortToken, Startup, StartupId};

use crate::usecases::compare_session::context::CompareSessionContext;
use crate::usecases::internal::{FetchOutcome, RequestTicket};
use crate::usecases::selection_store::SelectionReader;

/// Errors produced by the comparison session coordinator.
#[derive(Debug, thiserror::Error)]
pub enum CompareSessionError {
    #[error(
        "comparison needs at least one primary and one candidate startup \
         (primary: {primary}, candidates: {candidates})"
    )]
    PreconditionFailed { primary: usize, candidates: usize },

    #[error("comparison session busy: {operation:?} in progress")]
    SessionBusy { operation: SessionOperation },

    #[error("{operation} failed for startups {failed:?}: {source}")]
    BatchRequestFailed {
        operation: BackendOperation,
        failed: Vec<StartupId>,
        #[source]
        source: BackendError,
    },

    #[error(transparent)]
    RequestFailed(#[from] BackendError),
}

impl CompareSessionError {
    /// Whether the error came from the backend rather than from session rules.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            CompareSessionError::BatchRequestFailed { .. } | CompareSessionError::RequestFailed(_)
        )
    }
}

/// Everything a result view needs, read in one go.
#[derive(Debug, Clone)]
pub struct CompareSessionSnapshot {
    pub state: ComparisonSessionState,
    pub sort: SortToken,
    pub results: Arc<Vec<Startup>>,
    pub last_error: Option<String>,
}

pub struct CompareSessionCoordinator {
    context: Arc<CompareSessionContext>,
    selection: SelectionReader,
    selection_port: Arc<dyn SelectionPort>,
    comparison_port: Arc<dyn ComparisonPort>,
}

impl CompareSessionCoordinator {
    pub fn new(
        selection: SelectionReader,
        selection_port: Arc<dyn SelectionPort>,
        comparison_port: Arc<dyn ComparisonPort>,
        initial_sort: SortToken,
    ) -> Self {
        Self {
            context: CompareSessionContext::new(initial_sort).arc(),
            selection,
            selection_port,
            comparison_port,
        }
    }

    /// Register the primary selection, submit the candidates and fetch results.
    ///
    /// Calling it while already `Done` is a no-op.
    pub async fn start_comparison(&self) -> Result<ComparisonSessionState, CompareSessionError> {
        let span = info_span!("usecase.compare_session.start_comparison");
        self.dispatch(SessionEvent::CompareRequested)
            .instrument(span)
            .await
    }

    /// Undo a finished comparison. Calling it while `Idle` is a no-op.
    pub async fn cancel_comparison(&self) -> Result<ComparisonSessionState, CompareSessionError> {
        let span = info_span!("usecase.compare_session.cancel_comparison");
        self.dispatch(SessionEvent::CancelRequested)
            .instrument(span)
            .await
    }

    /// Return to `Idle` and drop the results without contacting the backend.
    pub async fn reset(&self) -> Result<ComparisonSessionState, CompareSessionError> {
        let span = info_span!("usecase.compare_session.reset");
        async {
            let state = self.dispatch(SessionEvent::ResetRequested).await?;
            self.context.record_error(None).await;
            Ok(state)
        }
        .instrument(span)
        .await
    }

    /// Decode `token` (`field_direction`) and re-fetch with it.
    pub async fn set_sort(&self, token: &str) -> Result<FetchOutcome, CompareSessionError> {
        self.set_sort_token(SortToken::decode(token)).await
    }

    pub async fn set_sort_token(&self, sort: SortToken) -> Result<FetchOutcome, CompareSessionError> {
        self.resort(move |_| sort).await
    }

    pub async fn set_sort_field(
        &self,
        field: impl Into<String>,
    ) -> Result<FetchOutcome, CompareSessionError> {
        let field = field.into();
        self.resort(move |current| current.clone().with_field(field))
            .await
    }

    pub async fn set_sort_direction(
        &self,
        direction: SortDirection,
    ) -> Result<FetchOutcome, CompareSessionError> {
        self.resort(move |current| current.clone().with_direction(direction))
            .await
    }

    /// Re-fetch with the active sort.
    pub async fn refresh_results(&self) -> Result<FetchOutcome, CompareSessionError> {
        let span = info_span!("usecase.compare_session.refresh_results");
        async {
            let (sort, ticket) = self.context.begin_fetch().await;
            let result = self.fetch_with(sort, ticket).await;
            self.record_outcome(&result).await;
            result
        }
        .instrument(span)
        .await
    }

    pub async fn state(&self) -> ComparisonSessionState {
        self.context.get_state().await
    }

    pub async fn sort(&self) -> SortToken {
        self.context.sort().await
    }

    pub async fn results(&self) -> Arc<Vec<Startup>> {
        self.context.results().await
    }

    pub async fn last_error(&self) -> Option<String> {
        self.context.last_error().await
    }

    pub async fn snapshot(&self) -> CompareSessionSnapshot {
        CompareSessionSnapshot {
            state: self.context.get_state().await,
            sort: self.context.sort().await,
            results: self.context.results().await,
            last_error: self.context.last_error().await,
        }
    }

    async fn resort(
        &self,
        update: impl FnOnce(&SortToken) -> SortToken,
    ) -> Result<FetchOutcome, CompareSessionError> {
        let (sort, ticket) = self.context.replace_sort(update).await;
        let span = info_span!(
            "usecase.compare_session.set_sort",
            sort = %sort,
            ticket = ticket.sequence()
        );
        async {
            let result = self.fetch_with(sort, ticket).await;
            self.record_outcome(&result).await;
            result
        }
        .instrument(span)
        .await
    }

    async fn record_outcome(&self, result: &Result<FetchOutcome, CompareSessionError>) {
        match result {
            Ok(FetchOutcome::Applied) => self.context.record_error(None).await,
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "comparison results fetch failed");
                self.context.record_error(Some(err.to_string())).await;
            }
        }
    }

    async fn dispatch(
        &self,
        event: SessionEvent,
    ) -> Result<ComparisonSessionState, CompareSessionError> {
        // Cancel undoes what compare sent, even if the selection was edited since.
        let snapshot = match event {
            SessionEvent::CancelRequested => match self.context.submitted().await {
                Some(submitted) => submitted,
                None => self.selection.snapshot(),
            },
            _ => self.selection.snapshot(),
        };

        let (next, actions) = {
            let mut state = self.context.lock_state().await;
            if let Some(operation) = state.operation() {
                warn!(?operation, ?event, "comparison session busy, rejecting event");
                return Err(CompareSessionError::SessionBusy { operation });
            }
            if event == SessionEvent::CompareRequested
                && state.is_idle()
                && !snapshot.is_comparable()
            {
                warn!(
                    primary = snapshot.primary.len(),
                    candidates = snapshot.candidates.len(),
                    "comparison precondition failed"
                );
                return Err(CompareSessionError::PreconditionFailed {
                    primary: snapshot.primary.len(),
                    candidates: snapshot.candidates.len(),
                });
            }
            let from = *state;
            let (next, actions) = CompareSessionStateMachine::transition(from, event);
            info!(from = ?from, to = ?next, event = ?event, "comparison session transition");
            *state = next;
            (next, actions)
        };

        if !next.is_in_progress() {
            self.execute_actions(actions, &snapshot).await?;
            if next.is_idle() {
                self.context.set_submitted(None).await;
            }
            return Ok(next);
        }

        let outcome = self.execute_actions(actions, &snapshot).await;
        let settle = match outcome {
            Ok(()) => SessionEvent::StepsSettled,
            Err(_) => SessionEvent::StepFailed,
        };
        let settled = {
            let mut state = self.context.lock_state().await;
            let from = *state;
            let (settled, _) = CompareSessionStateMachine::transition(from, settle);
            info!(from = ?from, to = ?settled, event = ?settle, "comparison session transition");
            *state = settled;
            settled
        };

        match outcome {
            Ok(()) => {
                self.context.record_error(None).await;
                let submitted = (settled == ComparisonSessionState::Done).then_some(snapshot);
                self.context.set_submitted(submitted).await;
                Ok(settled)
            }
            Err(err) => {
                error!(error = %err, rolled_back_to = ?settled, "comparison session step failed");
                self.context.record_error(Some(err.to_string())).await;
                Err(err)
            }
        }
    }

    async fn execute_actions(
        &self,
        actions: Vec<SessionAction>,
        snapshot: &SelectionSnapshot,
    ) -> Result<(), CompareSessionError> {
        for action in actions {
            debug!(?action, "comparison session executing action");
            match action {
                SessionAction::RegisterSelections => {
                    self.register_all(snapshot.primary_ids()).await?;
                }
                SessionAction::SubmitComparisonSet => {
                    self.comparison_port
                        .submit_comparison_set(snapshot.candidate_ids())
                        .await?;
                }
                SessionAction::FetchComparisonResults => {
                    let (sort, ticket) = self.context.begin_fetch().await;
                    self.fetch_with(sort, ticket).await?;
                }
                SessionAction::UnregisterSelections => {
                    self.unregister_all(snapshot.primary_ids()).await?;
                }
                SessionAction::CancelComparisonSet => {
                    self.comparison_port
                        .cancel_comparison_set(snapshot.candidate_ids())
                        .await?;
                }
                SessionAction::ClearResults => {
                    self.context.results.clear().await;
                }
            }
        }
        Ok(())
    }

    async fn register_all(&self, ids: Vec<StartupId>) -> Result<(), CompareSessionError> {
        let port = self.selection_port.as_ref();
        let results = join_all(
            ids.into_iter()
                .map(|id| async move { (id, port.register_selection(id).await) }),
        )
        .await;
        settle_barrier(BackendOperation::RegisterSelection, results, |_| false)
    }

    async fn unregister_all(&self, ids: Vec<StartupId>) -> Result<(), CompareSessionError> {
        let port = self.selection_port.as_ref();
        let results = join_all(
            ids.into_iter()
                .map(|id| async move { (id, port.unregister_selection(id).await) }),
        )
        .await;
        // Ids that were never registered server-side come back as NotFound.
        settle_barrier(
            BackendOperation::UnregisterSelection,
            results,
            BackendError::is_not_found,
        )
    }

    async fn fetch_with(
        &self,
        sort: SortToken,
        ticket: RequestTicket,
    ) -> Result<FetchOutcome, CompareSessionError> {
        debug!(sort = %sort, ticket = ticket.sequence(), "fetching comparison results");
        match self.comparison_port.fetch_comparison_results(sort).await {
            Ok(items) => {
                let count = items.len();
                let outcome = self.context.results.commit(ticket, items).await;
                debug!(ticket = ticket.sequence(), count, ?outcome, "comparison results settled");
                Ok(outcome)
            }
            Err(err) if !self.context.results.is_current(ticket) => {
                debug!(
                    ticket = ticket.sequence(),
                    error = %err,
                    "ignoring failure of superseded comparison fetch"
                );
                Ok(FetchOutcome::Superseded)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Fold the outcome of a concurrent per-id request batch into one result.
fn settle_barrier(
    operation: BackendOperation,
    results: Vec<(StartupId, Result<(), BackendError>)>,
    is_benign: fn(&BackendError) -> bool,
) -> Result<(), CompareSessionError> {
    let mut failed = Vec::new();
    let mut first = None;
    for (id, result) in results {
        match result {
            Ok(()) => {}
            Err(err) if is_benign(&err) => {
                debug!(startup_id = %id, error = %err, "ignoring benign {operation} failure");
            }
            Err(err) => {
                warn!(startup_id = %id, error = %err, "{operation} failed");
                failed.push(id);
                first.get_or_insert(err);
            }
        }
    }
    match first {
        None => Ok(()),
        Some(source) => Err(CompareSessionError::BatchRequestFailed {
            operation,
            failed,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> BackendError {
        BackendError::NotFound {
            operation: BackendOperation::UnregisterSelection,
        }
    }

    fn timeout() -> BackendError {
        BackendError::Timeout {
            operation: BackendOperation::RegisterSelection,
        }
    }

    #[test]
    fn barrier_collects_every_failed_id_and_keeps_first_error() {
        let results = vec![
            (StartupId::new(1), Err(timeout())),
            (StartupId::new(2), Ok(())),
            (
                StartupId::new(3),
                Err(BackendError::Status {
                    operation: BackendOperation::RegisterSelection,
                    status: 500,
                }),
            ),
        ];
        let err =
            settle_barrier(BackendOperation::RegisterSelection, results, |_| false).unwrap_err();
        match err {
            CompareSessionError::BatchRequestFailed {
                operation,
                failed,
                source,
            } => {
                assert_eq!(operation, BackendOperation::RegisterSelection);
                assert_eq!(failed, vec![StartupId::new(1), StartupId::new(3)]);
                assert_eq!(source, timeout());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn barrier_skips_benign_failures() {
        let results = vec![(StartupId::new(1), Err(not_found())), (StartupId::new(2), Ok(()))];
        assert!(settle_barrier(
            BackendOperation::UnregisterSelection,
            results,
            BackendError::is_not_found
        )
        .is_ok());
    }
}
