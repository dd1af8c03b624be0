use async_trait::async_trait;

use super::BackendError;
use crate::ids::StartupId;
use crate::startup::{Page, PageQuery, Startup};

/// Read access to the startup catalog.
#[async_trait]
pub trait StartupCatalogPort: Send + Sync {
    async fn get_startup(&self, id: StartupId) -> Result<Startup, BackendError>;

    async fn list_startups(&self, query: PageQuery) -> Result<Page<Startup>, BackendError>;
}
