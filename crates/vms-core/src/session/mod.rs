//! Comparison session domain module.

pub mod state_machine;

pub use state_machine::{
    CompareSessionStateMachine, ComparisonSessionState, SessionAction, SessionEvent,
    SessionOperation,
};
