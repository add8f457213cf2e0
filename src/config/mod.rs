//! Configuration module for regsync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (REGSYNC_*)
//! 3. Project config (regsync.toml)
//! 4. User config (~/.config/regsync/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_overrides, find_config_file, resolve, with_env_overrides, ConfigWarning,
    PROJECT_CONFIG_FILE,
};
pub use types::{
    Config, PathsConfig, ProbeConfig, ResolvedPaths, RuntimeConfig, WatchConfig,
};
