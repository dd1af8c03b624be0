use async_trait::async_trait;

use super::BackendError;
use crate::ids::InvestorId;
use crate::investment::InvestmentRecord;

#[async_trait]
pub trait InvestmentPort: Send + Sync {
    /// Submit `record` for `investor`.
    ///
    /// Returns the HTTP-like status code the backend answered with; only
    /// transport-level failures are reported as errors.
    async fn submit_investment(
        &self,
        investor: InvestorId,
        record: &InvestmentRecord,
    ) -> Result<u16, BackendError>;
}
