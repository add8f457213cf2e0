//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegsyncError, RegsyncResult};

use super::types::Config;

/// File name looked up at the project root
pub const PROJECT_CONFIG_FILE: &str = "regsync.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> RegsyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut ignored: Vec<String> = Vec::new();
    let config: Config = serde_ignored::deserialize(
        toml::de::Deserializer::new(&content),
        |field| ignored.push(field.to_string()),
    )
    .map_err(|e| RegsyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // `watch.debounse_ms` is reported by its last segment
    let warnings = ignored
        .iter()
        .map(|field| {
            let key = field.rsplit('.').next().unwrap_or(field);
            ConfigWarning {
                key: key.to_string(),
                file: path.to_path_buf(),
                line: line_of(&content, key),
                suggestion: suggest_key(key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// First existing config file: project `regsync.toml`, then the user config
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    let project_config = project_root.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        return Some(project_config);
    }

    let user_config = user_config_dir()?.join("regsync/config.toml");
    user_config.is_file().then_some(user_config)
}

/// Resolve configuration for a project.
///
/// An explicit path must exist and parse. Otherwise the project file, then the
/// user file, then the built-in defaults are used. Environment overrides apply
/// last.
pub fn resolve(
    project_root: &Path,
    explicit: Option<&Path>,
) -> RegsyncResult<(Config, Vec<ConfigWarning>)> {
    let found = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(project_root),
    };

    let (config, warnings) = match found {
        Some(path) => load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (REGSYNC_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from any key lookup (the environment in production)
pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // REGSYNC_DEBOUNCE_MS
    if let Some(ms) = lookup("REGSYNC_DEBOUNCE_MS").and_then(|v| v.trim().parse().ok()) {
        config.watch.debounce_ms = ms;
    }

    // REGSYNC_PROBE_TIMEOUT_MS
    if let Some(ms) = lookup("REGSYNC_PROBE_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()) {
        config.probe.timeout_ms = ms;
    }

    // REGSYNC_COMPOSE_COMMAND (whitespace-separated)
    if let Some(command) = lookup("REGSYNC_COMPOSE_COMMAND") {
        let parts: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        if !parts.is_empty() {
            config.runtime.compose_command = parts;
        }
    }

    // REGSYNC_DOCKER_COMMAND
    if let Some(command) = lookup("REGSYNC_DOCKER_COMMAND") {
        let command = command.trim();
        if !command.is_empty() {
            config.runtime.docker_command = command.to_string();
        }
    }

    config
}

/// `$XDG_CONFIG_HOME`, falling back to the platform config dir
fn user_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// 1-based line of the first occurrence of `key`
fn line_of(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(key))
        .map(|index| index + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "registry",
        "compose",
        "analytics_code",
        "analyzer_configs",
        "components",
        "local_storage",
        "watch",
        "debounce_ms",
        "reconcile_on_start",
        "probe",
        "required_files",
        "timeout_ms",
        "interval_ms",
        "runtime",
        "compose_command",
        "docker_command",
    ];

    // Ties go to the earlier candidate
    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, edit_distance(unknown, candidate)))
        .min_by_key(|(_, distance)| *distance)
        .filter(|(_, distance)| *distance <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

/// Byte-wise Levenshtein distance over a single rolling row
fn edit_distance(left: &str, right: &str) -> usize {
    let right = right.as_bytes();
    let mut row: Vec<usize> = (0..=right.len()).collect();

    for (i, l) in left.bytes().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, r) in right.iter().enumerate() {
            let substitution = diagonal + usize::from(l != *r);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[right.len()]
}

#[cfg(test)]
pub(super) fn suggest_key_for_test(unknown: &str) -> Option<String> {
    suggest_key(unknown)
}
