//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML configuration file into [`AppConfig`]. Sections and keys
//! missing from the file keep their defaults; overrides from the command line
//! and environment are applied afterwards by [`apply_overrides`].

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vms_core::config::AppConfig;

/// Environment variable overriding `[backend] base_url`.
pub const BASE_URL_ENV: &str = "VMS_BASE_URL";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML for
/// [`AppConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// `<config dir>/view-my-startup/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("view-my-startup").join("config.toml"))
}

/// Pick the configuration source.
///
/// An explicit path must exist. Without one, the default path is used when
/// present; otherwise built-in defaults apply.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        info!(path = %path.display(), "loading config");
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            info!(path = %path.display(), "loading config");
            load_config(&path)
        }
        _ => {
            debug!("no config file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Apply base URL overrides: command line first, then environment.
pub fn apply_overrides(
    mut config: AppConfig,
    cli_base_url: Option<String>,
    env_base_url: Option<String>,
) -> AppConfig {
    if let Some(url) = cli_base_url.or(env_base_url).filter(|u| !u.trim().is_empty()) {
        debug!(base_url = %url, "backend base url overridden");
        config.backend.base_url = url;
    }
    config
}
