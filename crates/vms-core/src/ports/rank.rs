use async_trait::async_trait;

use super::BackendError;
use crate::ids::StartupId;
use crate::sort::SortToken;
use crate::startup::RankedStartup;

/// Ranking relative to a single reference startup.
#[async_trait]
pub trait RankPort: Send + Sync {
    async fn fetch_rank_results(
        &self,
        reference: StartupId,
        sort: SortToken,
    ) -> Result<Vec<RankedStartup>, BackendError>;
}
