use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::oneshot;

use vms_app::usecases::{
    CompareSessionCoordinator, CompareSessionError, FetchOutcome, MySelection,
    RankQueryController, SelectionStore,
};
use vms_core::ports::{
    BackendError, BackendOperation, ComparisonPort, RankPort, SelectionPort,
};
use vms_core::session::SessionOperation;
use vms_core::{ComparisonSessionState, RankedStartup, SortToken, Startup, StartupId};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Register(u64),
    Unregister(u64),
    Submit(Vec<u64>),
    Cancel(Vec<u64>),
    Fetch(String),
    Rank(u64, String),
}

/// Records every backend call. Fetches for the `slow` sort field wait on `gate`.
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    fail_register: Mutex<Vec<u64>>,
    unknown_on_unregister: Mutex<Vec<u64>>,
    fail_unregister: Mutex<Vec<u64>>,
    fail_submit: Mutex<bool>,
    fail_fetch: Mutex<bool>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl RecordingBackend {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn close_gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }
}

fn ids(ids: &[StartupId]) -> Vec<u64> {
    ids.iter().map(|id| id.get()).collect()
}

#[async_trait]
impl SelectionPort for RecordingBackend {
    async fn register_selection(&self, id: StartupId) -> Result<(), BackendError> {
        self.record(Call::Register(id.get()));
        if self.fail_register.lock().unwrap().contains(&id.get()) {
            return Err(BackendError::Status {
                operation: BackendOperation::RegisterSelection,
                status: 500,
            });
        }
        Ok(())
    }

    async fn unregister_selection(&self, id: StartupId) -> Result<(), BackendError> {
        self.record(Call::Unregister(id.get()));
        if self.unknown_on_unregister.lock().unwrap().contains(&id.get()) {
            return Err(BackendError::NotFound {
                operation: BackendOperation::UnregisterSelection,
            });
        }
        if self.fail_unregister.lock().unwrap().contains(&id.get()) {
            return Err(BackendError::Status {
                operation: BackendOperation::UnregisterSelection,
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ComparisonPort for RecordingBackend {
    async fn submit_comparison_set(&self, list: Vec<StartupId>) -> Result<(), BackendError> {
        self.record(Call::Submit(ids(&list)));
        if *self.fail_submit.lock().unwrap() {
            return Err(BackendError::Timeout {
                operation: BackendOperation::SubmitComparisonSet,
            });
        }
        Ok(())
    }

    async fn cancel_comparison_set(&self, list: Vec<StartupId>) -> Result<(), BackendError> {
        self.record(Call::Cancel(ids(&list)));
        Ok(())
    }

    async fn fetch_comparison_results(
        &self,
        sort: SortToken,
    ) -> Result<Vec<Startup>, BackendError> {
        self.record(Call::Fetch(sort.encode()));
        if *self.fail_fetch.lock().unwrap() {
            return Err(BackendError::Status {
                operation: BackendOperation::FetchComparisonResults,
                status: 502,
            });
        }
        if sort.field() == "slow" {
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
        }
        Ok(vec![Startup::new(StartupId::new(2), sort.encode(), "TECH")])
    }
}

#[async_trait]
impl RankPort for RecordingBackend {
    async fn fetch_rank_results(
        &self,
        reference: StartupId,
        sort: SortToken,
    ) -> Result<Vec<RankedStartup>, BackendError> {
        self.record(Call::Rank(reference.get(), sort.encode()));
        Ok(vec![RankedStartup {
            rank: 1,
            startup: Startup::new(reference, "reference", "TECH"),
        }])
    }
}

mock! {
    pub SilentBackend {}

    #[async_trait]
    impl SelectionPort for SilentBackend {
        async fn register_selection(&self, id: StartupId) -> Result<(), BackendError>;
        async fn unregister_selection(&self, id: StartupId) -> Result<(), BackendError>;
    }

    #[async_trait]
    impl ComparisonPort for SilentBackend {
        async fn submit_comparison_set(&self, ids: Vec<StartupId>) -> Result<(), BackendError>;
        async fn cancel_comparison_set(&self, ids: Vec<StartupId>) -> Result<(), BackendError>;
        async fn fetch_comparison_results(&self, sort: SortToken) -> Result<Vec<Startup>, BackendError>;
    }
}

fn startup(id: u64) -> Startup {
    Startup::new(StartupId::new(id), format!("startup-{id}"), "TECH")
}

struct Harness {
    backend: Arc<RecordingBackend>,
    store: Arc<SelectionStore>,
    coordinator: Arc<CompareSessionCoordinator>,
    rank: Arc<RankQueryController>,
}

fn harness(comparison_sort: &str) -> Harness {
    let backend = Arc::new(RecordingBackend::default());
    let store = Arc::new(SelectionStore::new(5));
    let coordinator = Arc::new(CompareSessionCoordinator::new(
        store.subscribe(),
        backend.clone(),
        backend.clone(),
        SortToken::decode(comparison_sort),
    ));
    let rank = Arc::new(RankQueryController::new(
        backend.clone(),
        SortToken::decode("revenue_desc"),
    ));
    Harness {
        backend,
        store,
        coordinator,
        rank,
    }
}

fn select(store: &SelectionStore, primary: &[u64], candidates: &[u64]) {
    for id in primary {
        store.add_primary(startup(*id));
    }
    for id in candidates {
        store.add_candidate(startup(*id)).unwrap();
    }
}

#[tokio::test]
async fn start_comparison_registers_submits_and_fetches_once() {
    let h = harness("simInvest_desc");
    select(&h.store, &[1], &[2, 3]);

    let state = h.coordinator.start_comparison().await.unwrap();

    assert_eq!(state, ComparisonSessionState::Done);
    assert_eq!(
        h.backend.calls(),
        vec![
            Call::Register(1),
            Call::Submit(vec![2, 3]),
            Call::Fetch("simInvest_desc".to_string()),
        ]
    );
    assert_eq!(h.coordinator.results().await.len(), 1);
    assert_eq!(h.coordinator.last_error().await, None);
}

#[tokio::test]
async fn start_comparison_without_candidates_issues_no_request() {
    // No expectations: any backend call panics.
    let backend = Arc::new(MockSilentBackend::new());
    let store = SelectionStore::new(5);
    store.add_primary(startup(1));
    let coordinator = CompareSessionCoordinator::new(
        store.subscribe(),
        backend.clone(),
        backend,
        SortToken::decode("simInvest_desc"),
    );

    let err = coordinator.start_comparison().await.unwrap_err();

    assert!(matches!(
        err,
        CompareSessionError::PreconditionFailed {
            primary: 1,
            candidates: 0
        }
    ));
    assert_eq!(coordinator.state().await, ComparisonSessionState::Idle);
}

#[tokio::test]
async fn registration_failure_rolls_back_to_idle() {
    let h = harness("simInvest_desc");
    select(&h.store, &[1, 4], &[2]);
    h.backend.fail_register.lock().unwrap().push(4);

    let err = h.coordinator.start_comparison().await.unwrap_err();

    match err {
        CompareSessionError::BatchRequestFailed {
            operation, failed, ..
        } => {
            assert_eq!(operation, BackendOperation::RegisterSelection);
            assert_eq!(failed, vec![StartupId::new(4)]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(h.coordinator.state().await, ComparisonSessionState::Idle);
    assert!(h.coordinator.last_error().await.is_some());
    // Both registrations ran; nothing after the barrier did.
    let calls = h.backend.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| matches!(c, Call::Register(_))));
    // The selection is left for a retry.
    assert_eq!(h.store.snapshot().primary_ids().len(), 2);
}

#[tokio::test]
async fn cancel_after_compare_returns_to_idle_with_empty_view() {
    let backend = Arc::new(RecordingBackend::default());
    let store = Arc::new(SelectionStore::new(5));
    let coordinator = Arc::new(CompareSessionCoordinator::new(
        store.subscribe(),
        backend.clone(),
        backend.clone(),
        SortToken::decode("simInvest_desc"),
    ));
    let rank = Arc::new(RankQueryController::new(
        backend.clone(),
        SortToken::decode("revenue_desc"),
    ));
    let page = MySelection::new(store.clone(), coordinator.clone(), rank);
    select(&store, &[1], &[2, 3]);

    coordinator.start_comparison().await.unwrap();
    assert_eq!(page.comparison_view().await.rows.len(), 1);

    let state = coordinator.cancel_comparison().await.unwrap();

    assert_eq!(state, ComparisonSessionState::Idle);
    let view = page.comparison_view().await;
    assert!(view.rows.is_empty());
    assert!(!view.is_visible());
    assert_eq!(
        backend.calls()[3..].to_vec(),
        vec![
            Call::Unregister(1),
            Call::Cancel(vec![2, 3]),
            Call::Fetch("simInvest_desc".to_string()),
        ]
    );
}

#[tokio::test]
async fn submit_failure_rolls_back_to_idle() {
    let h = harness("simInvest_desc");
    select(&h.store, &[1], &[2, 3]);
    *h.backend.fail_submit.lock().unwrap() = true;

    let err = h.coordinator.start_comparison().await.unwrap_err();

    assert!(err.is_request_failure());
    assert_eq!(h.coordinator.state().await, ComparisonSessionState::Idle);
    assert!(h.coordinator.last_error().await.is_some());
    assert!(h.coordinator.results().await.is_empty());
    assert_eq!(
        h.backend.calls(),
        vec![Call::Register(1), Call::Submit(vec![2, 3])]
    );
}

#[tokio::test]
async fn fetch_failure_rolls_back_to_idle() {
    let h = harness("simInvest_desc");
    select(&h.store, &[1], &[2]);
    *h.backend.fail_fetch.lock().unwrap() = true;

    let err = h.coordinator.start_comparison().await.unwrap_err();

    assert!(matches!(err, CompareSessionError::RequestFailed(_)));
    assert_eq!(h.coordinator.state().await, ComparisonSessionState::Idle);
    assert!(h.coordinator.last_error().await.is_some());
}

#[tokio::test]
async fn unregister_failure_rolls_cancel_back_to_done() {
    let h = harness("simInvest_desc");
    select(&h.store, &[1, 5], &[2]);
    h.coordinator.start_comparison().await.unwrap();
    h.backend.fail_unregister.lock().unwrap().push(5);

    let err = h.coordinator.cancel_comparison().await.unwrap_err();

    match err {
        CompareSessionError::BatchRequestFailed {
            operation, failed, ..
        } => {
            assert_eq!(operation, BackendOperation::UnregisterSelection);
            assert_eq!(failed, vec![StartupId::new(5)]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(h.coordinator.state().await, ComparisonSessionState::Done);
    assert!(h.coordinator.last_error().await.is_some());
    // Results from the compare stay visible.
    assert_eq!(h.coordinator.results().await.len(), 1);
}

#[tokio::test]
async fn cancel_undoes_the_submitted_selection_after_edits() {
    let h = harness("simInvest_desc");
    select(&h.store, &[1], &[2, 3]);
    h.coordinator.start_comparison().await.unwrap();

    h.store.remove_primary(StartupId::new(1));
    h.store.add_primary(startup(9));
    h.store.remove_candidate(StartupId::new(3));
    h.store.add_candidate(startup(4)).unwrap();
    let before_cancel = h.backend.calls().len();

    let state = h.coordinator.cancel_comparison().await.unwrap();

    assert_eq!(state, ComparisonSessionState::Idle);
    assert_eq!(
        h.backend.calls()[before_cancel..].to_vec(),
        vec![
            Call::Unregister(1),
            Call::Cancel(vec![2, 3]),
            Call::Fetch("simInvest_desc".to_string()),
        ]
    );

    // The next compare works from the edited selection.
    h.coordinator.start_comparison().await.unwrap();
    let before_second_cancel = h.backend.calls().len();
    h.coordinator.cancel_comparison().await.unwrap();
    assert_eq!(
        h.backend.calls()[before_second_cancel..2 + before_second_cancel].to_vec(),
        vec![Call::Unregister(9), Call::Cancel(vec![2, 4])]
    );
}

#[tokio::test]
async fn cancel_tolerates_ids_unknown_to_backend() {
    let h = harness("simInvest_desc");
    select(&h.store, &[1, 5], &[2]);
    h.coordinator.start_comparison().await.unwrap();
    h.backend.unknown_on_unregister.lock().unwrap().push(5);

    let state = h.coordinator.cancel_comparison().await.unwrap();

    assert_eq!(state, ComparisonSessionState::Idle);
    assert_eq!(h.coordinator.last_error().await, None);
}

#[tokio::test]
async fn cancel_while_idle_and_compare_while_done_are_no_ops() {
    let h = harness("simInvest_desc");
    select(&h.store, &[1], &[2]);

    assert_eq!(
        h.coordinator.cancel_comparison().await.unwrap(),
        ComparisonSessionState::Idle
    );
    assert!(h.backend.calls().is_empty());

    h.coordinator.start_comparison().await.unwrap();
    let calls = h.backend.calls().len();
    assert_eq!(
        h.coordinator.start_comparison().await.unwrap(),
        ComparisonSessionState::Done
    );
    assert_eq!(h.backend.calls().len(), calls);
}

#[tokio::test]
async fn overlapping_start_is_rejected_while_in_progress() {
    let h = harness("slow_desc");
    select(&h.store, &[1], &[2]);
    let release = h.backend.close_gate();

    let (first, second) = tokio::join!(h.coordinator.start_comparison(), async {
        let second = h.coordinator.start_comparison().await;
        let _ = release.send(());
        second
    });

    assert_eq!(first.unwrap(), ComparisonSessionState::Done);
    assert!(matches!(
        second,
        Err(CompareSessionError::SessionBusy {
            operation: SessionOperation::Compare
        })
    ));
    let registers = h
        .backend
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Register(_)))
        .count();
    assert_eq!(registers, 1);
}

#[tokio::test]
async fn latest_sort_wins_even_when_older_response_arrives_last() {
    let h = harness("simInvest_desc");
    let release = h.backend.close_gate();

    let (older, newer) = tokio::join!(h.coordinator.set_sort("slow_desc"), async {
        let newer = h.coordinator.set_sort("revenue_asc").await;
        let _ = release.send(());
        newer
    });

    assert_eq!(newer.unwrap(), FetchOutcome::Applied);
    assert_eq!(older.unwrap(), FetchOutcome::Superseded);
    let results = h.coordinator.results().await;
    assert_eq!(results[0].name, "revenue_asc");
    assert_eq!(h.coordinator.sort().await.encode(), "revenue_asc");
}

#[tokio::test]
async fn rank_with_empty_primary_selection_never_fetches() {
    let h = harness("simInvest_desc");

    let listener = h.rank.clone().spawn_selection_listener(h.store.subscribe());
    h.store.add_candidate(startup(2)).unwrap();
    tokio::task::yield_now().await;

    assert!(h.rank.results().await.is_empty());
    assert!(h.backend.calls().is_empty());
    listener.abort();
}

#[tokio::test]
async fn rank_follows_first_primary_selection() {
    let h = harness("simInvest_desc");
    let listener = h.rank.clone().spawn_selection_listener(h.store.subscribe());

    h.store.add_primary(startup(7));
    h.store.add_primary(startup(8));
    wait_until(|| h.backend.calls().contains(&Call::Rank(7, "revenue_desc".into()))).await;

    h.store.remove_primary(StartupId::new(7));
    wait_until(|| h.backend.calls().contains(&Call::Rank(8, "revenue_desc".into()))).await;

    h.store.reset();
    for _ in 0..50 {
        if h.rank.reference().await.is_none() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(h.rank.results().await.is_empty());
    // Adding a second primary does not move the reference, so no extra request.
    let rank_calls = h
        .backend
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Rank(..)))
        .count();
    assert_eq!(rank_calls, 2);
    listener.abort();
}

#[tokio::test]
async fn reset_all_clears_selection_and_session() {
    let h = harness("simInvest_desc");
    let page = MySelection::new(h.store.clone(), h.coordinator.clone(), h.rank.clone());
    select(&h.store, &[1], &[2]);
    h.coordinator.start_comparison().await.unwrap();
    h.rank.sync_reference(Some(StartupId::new(1))).await.unwrap();

    page.reset_all().await.unwrap();

    assert!(page.selection().is_empty());
    assert_eq!(h.coordinator.state().await, ComparisonSessionState::Idle);
    assert!(h.coordinator.results().await.is_empty());
    assert!(page.rank_view().await.rows.is_empty());
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
