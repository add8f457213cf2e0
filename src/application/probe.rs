//! File readiness probe
//!
//! Analyzer source files are generated by another process. A new service is
//! only wired into compose once every required file exists in its directory.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Lower bound on the poll interval
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Result of waiting for an analyzer directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Every required file is present
    Ready,
    /// The timeout elapsed with files still missing
    TimedOut { missing: Vec<String> },
}

impl ProbeOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeOutcome::Ready)
    }
}

/// Polls a directory until a fixed set of files exists
#[derive(Debug, Clone)]
pub struct ReadinessProbe {
    required_files: Vec<String>,
    timeout: Duration,
    interval: Duration,
}

impl ReadinessProbe {
    pub fn new(required_files: Vec<String>, timeout: Duration) -> Self {
        Self {
            required_files,
            timeout,
            interval: Duration::from_secs(1),
        }
    }

    /// Poll interval, never below one millisecond
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
    }

    pub fn required_files(&self) -> &[String] {
        &self.required_files
    }

    /// Required files not yet present under `dir`
    pub fn missing(&self, dir: &Path) -> Vec<String> {
        self.required_files
            .iter()
            .filter(|file| !dir.join(file).is_file())
            .cloned()
            .collect()
    }

    /// Block until every required file exists or the timeout elapses.
    ///
    /// Presence is checked once more after the deadline, so a zero timeout still
    /// reports `Ready` for a complete directory.
    pub fn wait(&self, dir: &Path) -> ProbeOutcome {
        // A timeout past the clock's range never expires
        let deadline = Instant::now().checked_add(self.timeout);

        loop {
            let missing = self.missing(dir);
            if missing.is_empty() {
                return ProbeOutcome::Ready;
            }

            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        tracing::debug!(dir = %dir.display(), ?missing, "probe timed out");
                        return ProbeOutcome::TimedOut { missing };
                    }
                    self.interval.min(deadline - now)
                }
                None => self.interval,
            };
            thread::sleep(pause);
        }
    }
}

/// True once every file in `required_files` exists under `path`, false on timeout
pub fn verify(path: &Path, required_files: &[String], timeout: Duration) -> bool {
    ReadinessProbe::new(required_files.to_vec(), timeout)
        .wait(path)
        .is_ready()
}
