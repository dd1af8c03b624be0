//! Comparison session use case.

mod context;
mod coordinator;

pub use context::CompareSessionContext;
pub use coordinator::{CompareSessionCoordinator, CompareSessionError, CompareSessionSnapshot};
