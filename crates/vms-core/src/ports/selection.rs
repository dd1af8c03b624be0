use async_trait::async_trait;

use super::BackendError;
use crate::ids::StartupId;

/// Persists "my selections" on the backend.
#[async_trait]
pub trait SelectionPort: Send + Sync {
    /// Register `id` as one of the user's own startups. Idempotent.
    async fn register_selection(&self, id: StartupId) -> Result<(), BackendError>;

    /// Undo [`SelectionPort::register_selection`]. Unknown ids yield
    /// [`BackendError::NotFound`], which callers treat as benign.
    async fn unregister_selection(&self, id: StartupId) -> Result<(), BackendError>;
}
