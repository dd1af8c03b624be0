use async_trait::async_trait;

use super::BackendError;
use crate::ids::StartupId;
use crate::sort::SortToken;
use crate::startup::Startup;

/// Server-side comparison set and its computed results.
#[async_trait]
pub trait ComparisonPort: Send + Sync {
    /// Replace the server-side candidate set with `ids` (in order).
    async fn submit_comparison_set(&self, ids: Vec<StartupId>) -> Result<(), BackendError>;

    async fn cancel_comparison_set(&self, ids: Vec<StartupId>) -> Result<(), BackendError>;

    /// Comparison rows ordered by `sort`.
    async fn fetch_comparison_results(&self, sort: SortToken)
        -> Result<Vec<Startup>, BackendError>;
}
