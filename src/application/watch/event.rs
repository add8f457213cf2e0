//! Watch options and debounce state

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

/// Default debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 1000;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Registry file to watch
    pub registry: PathBuf,
    /// Compose manifest (reported in the start event)
    pub compose: PathBuf,
    /// Quiet period before a pass runs
    pub debounce: Duration,
    /// Run one pass before waiting for changes
    pub reconcile_on_start: bool,
}

impl WatchOptions {
    /// Create new watch options with minimal required fields
    pub fn new(registry: PathBuf, compose: PathBuf) -> Self {
        Self {
            registry,
            compose,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            reconcile_on_start: false,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_reconcile_on_start(mut self, reconcile_on_start: bool) -> Self {
        self.reconcile_on_start = reconcile_on_start;
        self
    }

    /// Directory watched for registry events
    pub fn watch_dir(&self) -> &Path {
        match self.registry.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// True if an event path refers to the registry file
    pub fn is_registry_path(&self, path: &Path) -> bool {
        path.file_name().is_some() && path.file_name() == self.registry.file_name()
    }
}

/// Watcher state for debouncing
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
    debounce: Duration,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl WatcherState {
    /// Create a new watcher state
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
            debounce,
        }
    }

    /// Add a file change to pending changes; restarts the debounce window
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if debounce period has passed and we have pending changes
    pub fn should_sync(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= self.debounce
        } else {
            false
        }
    }

    /// Take all pending changes, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }

    /// Check if there are pending changes
    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}

/// SHA-256 of file content, or None if the file cannot be read
pub fn content_hash(path: &Path) -> Option<String> {
    let content = std::fs::read(path).ok()?;
    let digest = Sha256::digest(&content);
    Some(digest.iter().map(|b| format!("{:02x}", b)).collect())
}
