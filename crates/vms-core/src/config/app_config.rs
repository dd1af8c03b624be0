//! Application configuration domain model

use serde::{Deserialize, Serialize};

use crate::selection::DEFAULT_CANDIDATE_LIMIT;
use crate::sort::{SortToken, COMPARISON_DEFAULT, RANK_DEFAULT};

/// Application configuration
///
/// Every section falls back to its defaults, so a partial TOML file (or none at
/// all) still yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend service settings
    pub backend: BackendConfig,

    /// Selection settings
    pub selection: SelectionConfig,

    /// Initial sort tokens of the two result tables
    pub sort: SortConfig,

    /// User-facing message settings
    pub ui: UiConfig,
}

/// Backend service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Selection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Maximum number of comparison candidates
    pub candidate_limit: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

/// Sort configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub comparison: SortToken,
    pub rank: SortToken,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            comparison: SortToken::decode(COMPARISON_DEFAULT),
            rank: SortToken::decode(RANK_DEFAULT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub locale: Locale,
}

/// Language of user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}
