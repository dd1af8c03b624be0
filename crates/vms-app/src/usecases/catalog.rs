//! Startup catalog lookups.

use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use vms_core::ports::{BackendError, StartupCatalogPort};
use vms_core::{Page, PageQuery, Startup, StartupId};

/// Fetch a single startup by id.
pub struct GetStartup {
    catalog: Arc<dyn StartupCatalogPort>,
}

impl GetStartup {
    pub fn new(catalog: Arc<dyn StartupCatalogPort>) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self, id: StartupId) -> Result<Startup, BackendError> {
        self.catalog
            .get_startup(id)
            .instrument(info_span!("usecase.get_startup.execute", startup_id = %id))
            .await
    }
}

/// List one page of the catalog.
pub struct ListStartups {
    catalog: Arc<dyn StartupCatalogPort>,
}

impl ListStartups {
    pub fn new(catalog: Arc<dyn StartupCatalogPort>) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self, query: PageQuery) -> Result<Page<Startup>, BackendError> {
        let span = info_span!(
            "usecase.list_startups.execute",
            page = query.page,
            page_size = query.page_size
        );
        async {
            let page = self.catalog.list_startups(query).await?;
            debug!(
                items = page.items.len(),
                total = page.total_count,
                "startup page loaded"
            );
            Ok(page)
        }
        .instrument(span)
        .await
    }
}
