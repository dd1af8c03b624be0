//! # Application Dependencies / 应用依赖
//!
//! This module defines the dependency grouping for use case construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - Just parameter grouping

use std::sync::Arc;
use vms_core::ports::*;

/// Backend port grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required. A single adapter usually implements every
/// port; it is cloned into each field as `Arc<dyn Port>`.
#[derive(Clone)]
pub struct AppDeps {
    pub selection: Arc<dyn SelectionPort>,
    pub comparison: Arc<dyn ComparisonPort>,
    pub rank: Arc<dyn RankPort>,
    pub investment: Arc<dyn InvestmentPort>,
    pub catalog: Arc<dyn StartupCatalogPort>,
}

impl AppDeps {
    /// Group one adapter that implements every backend port.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: SelectionPort + ComparisonPort + RankPort + InvestmentPort + StartupCatalogPort + 'static,
    {
        Self {
            selection: backend.clone(),
            comparison: backend.clone(),
            rank: backend.clone(),
            investment: backend.clone(),
            catalog: backend,
        }
    }
}
