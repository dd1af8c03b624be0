//! Dependency wiring: backend adapter → ports → use cases.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use vms_app::{AppDeps, UseCases};
use vms_core::AppConfig;
use vms_infra::HttpBackend;

pub fn wire_use_cases(config: &AppConfig) -> anyhow::Result<UseCases> {
    let backend = HttpBackend::new(&config.backend).context("Failed to create HTTP backend")?;
    info!(base_url = %backend.base_url(), "backend adapter ready");
    let deps = AppDeps::from_backend(Arc::new(backend));
    Ok(UseCases::new(deps, config))
}
