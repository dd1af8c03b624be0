//! "My selection" page facade.
//!
//! Wires one [`SelectionStore`] to a [`CompareSessionCoordinator`] and a
//! [`RankQueryController`], each with its own sort state, and exposes the
//! combined operations the page needs.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, info_span, Instrument};

use vms_core::selection::SelectionError;
use vms_core::{SelectionSnapshot, Startup, StartupId};

use crate::usecases::compare_session::{CompareSessionCoordinator, CompareSessionError};
use crate::usecases::rank_query::RankQueryController;
use crate::usecases::selection_store::SelectionStore;
use crate::usecases::views::{ComparisonResultView, RankResultView};

pub struct MySelection {
    store: Arc<SelectionStore>,
    compare: Arc<CompareSessionCoordinator>,
    rank: Arc<RankQueryController>,
}

impl MySelection {
    pub fn new(
        store: Arc<SelectionStore>,
        compare: Arc<CompareSessionCoordinator>,
        rank: Arc<RankQueryController>,
    ) -> Self {
        Self {
            store,
            compare,
            rank,
        }
    }

    pub fn store(&self) -> &Arc<SelectionStore> {
        &self.store
    }

    pub fn compare(&self) -> &Arc<CompareSessionCoordinator> {
        &self.compare
    }

    pub fn rank(&self) -> &Arc<RankQueryController> {
        &self.rank
    }

    pub fn selection(&self) -> SelectionSnapshot {
        self.store.snapshot()
    }

    /// Keep the rank table following the primary selection in the background.
    pub fn start_rank_listener(&self) -> JoinHandle<()> {
        self.rank.clone().spawn_selection_listener(self.store.subscribe())
    }

    pub fn add_primary(&self, startup: Startup) -> bool {
        self.store.add_primary(startup)
    }

    pub fn remove_primary(&self, id: StartupId) -> bool {
        self.store.remove_primary(id)
    }

    pub fn add_candidate(&self, startup: Startup) -> Result<bool, SelectionError> {
        self.store.add_candidate(startup)
    }

    pub fn remove_candidate(&self, id: StartupId) -> bool {
        self.store.remove_candidate(id)
    }

    pub fn replace_candidates(
        &self,
        startups: impl IntoIterator<Item = Startup>,
    ) -> Result<(), SelectionError> {
        self.store.replace_candidates(startups)
    }

    /// Clear both selections and return the session to `Idle`.
    ///
    /// Rejected with `SessionBusy` while a compare or cancel is running; the
    /// selection is left untouched in that case.
    pub async fn reset_all(&self) -> Result<(), CompareSessionError> {
        async {
            self.compare.reset().await?;
            self.store.reset();
            self.rank.clear().await;
            info!("selection page reset");
            Ok(())
        }
        .instrument(info_span!("usecase.my_selection.reset_all"))
        .await
    }

    pub async fn comparison_view(&self) -> ComparisonResultView {
        let session = self.compare.snapshot().await;
        ComparisonResultView::project(&session, &self.store.snapshot())
    }

    pub async fn rank_view(&self) -> RankResultView {
        let rank = self.rank.snapshot().await;
        RankResultView::project(&rank, &self.store.snapshot())
    }
}
