//! Read-only result projections.
//!
//! Views hold no state of their own. They are rebuilt from a coordinator
//! snapshot plus the current selection whenever either changes.

use serde::Serialize;

use vms_core::session::ComparisonSessionState;
use vms_core::{RankedStartup, SelectionSnapshot, SortToken, Startup, StartupId};

use crate::usecases::compare_session::CompareSessionSnapshot;
use crate::usecases::rank_query::RankQuerySnapshot;

/// One rendered row. `highlighted` marks startups in the primary selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow<T> {
    #[serde(flatten)]
    pub record: T,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResultView {
    pub state: ComparisonSessionState,
    pub sort: SortToken,
    pub rows: Vec<ResultRow<Startup>>,
    pub error: Option<String>,
}

impl ComparisonResultView {
    /// Rows are only shown once the session is `Done`.
    pub fn project(session: &CompareSessionSnapshot, selection: &SelectionSnapshot) -> Self {
        let rows = if session.state.is_done() {
            rows(session.results.iter(), selection, |s| s.id)
        } else {
            Vec::new()
        };
        Self {
            state: session.state,
            sort: session.sort.clone(),
            rows,
            error: session.last_error.clone(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_done()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResultView {
    pub reference: Option<StartupId>,
    pub sort: SortToken,
    pub rows: Vec<ResultRow<RankedStartup>>,
    pub error: Option<String>,
}

impl RankResultView {
    pub fn project(rank: &RankQuerySnapshot, selection: &SelectionSnapshot) -> Self {
        Self {
            reference: rank.reference,
            sort: rank.sort.clone(),
            rows: rows(rank.results.iter(), selection, RankedStartup::id),
            error: rank.last_error.clone(),
        }
    }
}

fn rows<'a, T: Clone + 'a>(
    records: impl Iterator<Item = &'a T>,
    selection: &SelectionSnapshot,
    id_of: impl Fn(&T) -> StartupId,
) -> Vec<ResultRow<T>> {
    records
        .map(|record| ResultRow {
            highlighted: selection.is_primary(id_of(record)),
            record: record.clone(),
        })
        .collect()
}
