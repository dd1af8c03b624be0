//! Startup read models returned by the backend.
//!
//! The core never owns startups; it holds denormalized snapshots for display and
//! refers to them by [`StartupId`].

use serde::{Deserialize, Serialize};

use crate::ids::StartupId;
use crate::sort::SortToken;

/// Startup category label.
///
/// Comparison rows carry the category as `{ "category": "..." }` while rank rows
/// carry a flat string; both shapes deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "CategoryRepr")]
pub struct Category {
    pub category: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Flat(String),
    Nested { category: String },
}

impl From<CategoryRepr> for Category {
    fn from(repr: CategoryRepr) -> Self {
        match repr {
            CategoryRepr::Flat(category) | CategoryRepr::Nested { category } => Self { category },
        }
    }
}

impl Category {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.category
    }
}

/// Startup snapshot as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Startup {
    pub id: StartupId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub description: Option<String>,
    /// Accumulated View My Startup investment amount.
    #[serde(default)]
    pub sim_invest: i64,
    #[serde(default)]
    pub revenue: i64,
    #[serde(default)]
    pub employees: i64,
}

impl Startup {
    /// Minimal snapshot, mostly useful for fixtures and lookups that only know a name.
    pub fn new(id: StartupId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
            category: Category::new(category),
            description: None,
            sim_invest: 0,
            revenue: 0,
            employees: 0,
        }
    }
}

/// Rank table row: a startup plus the ordinal the backend assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStartup {
    pub rank: u32,
    #[serde(flatten)]
    pub startup: Startup,
}

impl RankedStartup {
    pub fn id(&self) -> StartupId {
        self.startup.id
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

/// Listing request for the startup catalog. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
    pub keyword: Option<String>,
    pub sort: Option<SortToken>,
}

impl PageQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
            keyword: None,
            sort: None,
        }
    }
}
