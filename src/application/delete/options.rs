//! Delete options

use std::path::PathBuf;

use crate::config::ResolvedPaths;
use crate::infrastructure::fs::lock_path_for;

/// Files and directories an analyzer leaves behind
#[derive(Debug, Clone)]
pub struct DeleteOptions {
    pub analytics_code: PathBuf,
    pub analyzer_configs: PathBuf,
    pub components: PathBuf,
    pub local_storage: PathBuf,
    /// Cross-process lock shared with reconciliation passes
    pub lock_path: Option<PathBuf>,
}

impl DeleteOptions {
    pub fn from_paths(paths: &ResolvedPaths) -> Self {
        Self {
            analytics_code: paths.analytics_code.clone(),
            analyzer_configs: paths.analyzer_configs.clone(),
            components: paths.components.clone(),
            local_storage: paths.local_storage.clone(),
            lock_path: Some(lock_path_for(&paths.compose)),
        }
    }
}
