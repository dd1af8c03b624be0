//! Comparison session state machine.
//!
//! Defines a pure state transition function for the compare / cancel lifecycle.
//! Side effects are returned as [`SessionAction`]s and executed by the
//! application layer, which reports back with [`SessionEvent::StepsSettled`] or
//! [`SessionEvent::StepFailed`].

use serde::{Deserialize, Serialize};

/// Comparison session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ComparisonSessionState {
    /// Nothing submitted; result views are hidden.
    #[default]
    Idle,
    /// Requests in flight.
    InProgress { operation: SessionOperation },
    /// Comparison results are available.
    Done,
}

impl ComparisonSessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ComparisonSessionState::Idle)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ComparisonSessionState::Done)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, ComparisonSessionState::InProgress { .. })
    }

    /// The operation currently running, if any.
    pub fn operation(&self) -> Option<SessionOperation> {
        match self {
            ComparisonSessionState::InProgress { operation } => Some(*operation),
            _ => None,
        }
    }
}

/// Multi-step operation driving an `InProgress` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionOperation {
    Compare,
    Cancel,
}

impl SessionOperation {
    /// State reached when every step of the operation settles.
    pub fn settled_state(self) -> ComparisonSessionState {
        match self {
            SessionOperation::Compare => ComparisonSessionState::Done,
            SessionOperation::Cancel => ComparisonSessionState::Idle,
        }
    }

    /// Stable state the session was in before the operation started.
    pub fn rollback_state(self) -> ComparisonSessionState {
        match self {
            SessionOperation::Compare => ComparisonSessionState::Idle,
            SessionOperation::Cancel => ComparisonSessionState::Done,
        }
    }
}

/// Events that drive the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    CompareRequested,
    CancelRequested,
    StepsSettled,
    StepFailed,
    ResetRequested,
}

/// Side-effects produced by state transitions, executed in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Register every primary selection id (concurrently, awaited as a barrier).
    RegisterSelections,
    /// Submit the candidate id list as the comparison set.
    SubmitComparisonSet,
    /// Fetch comparison results with the active sort token.
    FetchComparisonResults,
    /// Unregister every primary selection id (concurrently, awaited as a barrier).
    UnregisterSelections,
    /// Cancel the candidate comparison set server-side.
    CancelComparisonSet,
    /// Drop the current result set.
    ClearResults,
}

/// Pure comparison session state machine.
pub struct CompareSessionStateMachine;

impl CompareSessionStateMachine {
    pub fn transition(
        state: ComparisonSessionState,
        event: SessionEvent,
    ) -> (ComparisonSessionState, Vec<SessionAction>) {
        use ComparisonSessionState::{Done, Idle, InProgress};

        match (state, event) {
            (Idle, SessionEvent::CompareRequested) => (
                InProgress {
                    operation: SessionOperation::Compare,
                },
                vec![
                    SessionAction::RegisterSelections,
                    SessionAction::SubmitComparisonSet,
                    SessionAction::FetchComparisonResults,
                ],
            ),
            (Done, SessionEvent::CancelRequested) => (
                InProgress {
                    operation: SessionOperation::Cancel,
                },
                vec![
                    SessionAction::UnregisterSelections,
                    SessionAction::CancelComparisonSet,
                    SessionAction::FetchComparisonResults,
                ],
            ),
            (InProgress { operation }, SessionEvent::StepsSettled) => {
                (operation.settled_state(), Vec::new())
            }
            (InProgress { operation }, SessionEvent::StepFailed) => {
                (operation.rollback_state(), Vec::new())
            }
            (Idle | Done, SessionEvent::ResetRequested) => {
                (Idle, vec![SessionAction::ClearResults])
            }
            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(?state, event = ?_event, "comparison session event ignored");
                (state, Vec::new())
            }
        }
    }
}
