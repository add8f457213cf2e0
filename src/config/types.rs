//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ServiceTemplate;
use crate::error::RegsyncResult;
use crate::infrastructure::runtime::{DEFAULT_COMPOSE_COMMAND, DEFAULT_DOCKER_COMMAND};

use super::loader::{self, ConfigWarning};

/// Files the platform reads and writes, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_registry_path")]
    pub registry: PathBuf,

    #[serde(default = "default_compose_path")]
    pub compose: PathBuf,

    #[serde(default = "default_analytics_code_path")]
    pub analytics_code: PathBuf,

    #[serde(default = "default_analyzer_configs_path")]
    pub analyzer_configs: PathBuf,

    #[serde(default = "default_components_path")]
    pub components: PathBuf,

    #[serde(default = "default_local_storage_path")]
    pub local_storage: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            registry: default_registry_path(),
            compose: default_compose_path(),
            analytics_code: default_analytics_code_path(),
            analyzer_configs: default_analyzer_configs_path(),
            components: default_components_path(),
            local_storage: default_local_storage_path(),
        }
    }
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("src/app/analyzers/registry.json")
}

fn default_compose_path() -> PathBuf {
    PathBuf::from("docker-compose.yml")
}

fn default_analytics_code_path() -> PathBuf {
    PathBuf::from("src/app/analyticscode")
}

fn default_analyzer_configs_path() -> PathBuf {
    PathBuf::from("src/app/config/analyzers")
}

fn default_components_path() -> PathBuf {
    PathBuf::from("src/app/components/analyzers")
}

fn default_local_storage_path() -> PathBuf {
    PathBuf::from("localStorage.json")
}

/// Watch loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period after the last registry change before a pass runs
    pub debounce_ms: u64,
    /// Run one pass before waiting for the first change
    pub reconcile_on_start: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            reconcile_on_start: false,
        }
    }
}

/// Readiness probe configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub required_files: Vec<String>,
    pub timeout_ms: u64,
    pub interval_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            required_files: vec![
                "Dockerfile".to_string(),
                "main.py".to_string(),
                "requirements.txt".to_string(),
            ],
            timeout_ms: 30_000,
            interval_ms: 1000,
        }
    }
}

/// External container tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Compose invocation, e.g. `["docker", "compose"]` or `["docker-compose"]`
    pub compose_command: Vec<String>,
    pub docker_command: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            compose_command: DEFAULT_COMPOSE_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
            docker_command: DEFAULT_DOCKER_COMMAND.to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RegsyncResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> RegsyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (REGSYNC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe.timeout_ms)
    }

    /// Poll interval, at least one millisecond so `interval_ms = 0` cannot busy-loop
    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe.interval_ms.max(1))
    }

    /// Resolve every configured path against the project root
    pub fn resolve_paths(&self, root: &Path) -> ResolvedPaths {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            }
        };

        ResolvedPaths {
            root: root.to_path_buf(),
            registry: resolve(&self.paths.registry),
            compose: resolve(&self.paths.compose),
            analytics_code: resolve(&self.paths.analytics_code),
            analyzer_configs: resolve(&self.paths.analyzer_configs),
            components: resolve(&self.paths.components),
            local_storage: resolve(&self.paths.local_storage),
        }
    }
}

/// Absolute (root-joined) locations of every file the platform shares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub registry: PathBuf,
    pub compose: PathBuf,
    pub analytics_code: PathBuf,
    pub analyzer_configs: PathBuf,
    pub components: PathBuf,
    pub local_storage: PathBuf,
}

impl ResolvedPaths {
    /// Directory compose resolves relative paths against
    pub fn compose_dir(&self) -> &Path {
        match self.compose.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => &self.root,
        }
    }

    /// Template whose analytics root is written relative to the manifest
    pub fn service_template(&self) -> ServiceTemplate {
        let root = match self.analytics_code.strip_prefix(self.compose_dir()) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => self.analytics_code.clone(),
        };
        ServiceTemplate::new(to_manifest_path(&root))
    }

    /// Source directory of one analyzer
    pub fn analyzer_dir(&self, id: &str) -> PathBuf {
        self.analytics_code.join(id)
    }
}

/// Manifest paths always use `/`
fn to_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
