//! Bootstrap module - Application initialization and wiring
//! 引导模块 - 应用初始化和连接

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{apply_overrides, default_config_path, load_config, resolve_config};
pub use wiring::wire_use_cases;
