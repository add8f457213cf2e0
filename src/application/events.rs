//! Sync event types for NDJSON output

use serde::Serialize;

/// Progress of the watch loop, a reconciliation pass, or a deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    /// Watch started
    WatchStarted { registry: String, compose: String },
    /// Registry content changed after the debounce window
    RegistryChanged { path: String },
    /// Pass started
    PassStarted,
    /// Computed add/remove lists
    Plan {
        to_add: Vec<String>,
        to_remove: Vec<String>,
    },
    /// Stale service stopped, removed, and dropped from the manifest
    ServiceRemoved { service: String },
    /// Analyzer source directory does not exist; not added this pass
    SourceMissing { service: String, path: String },
    /// Analyzer files did not appear before the probe timeout
    ProbeTimeout {
        service: String,
        missing: Vec<String>,
    },
    /// Service definition written to the manifest
    ServiceAdded { service: String },
    /// Service built and started
    ServiceStarted { service: String },
    /// A container tool or manifest write failed for one service
    ServiceFailed {
        service: String,
        stage: String,
        message: String,
    },
    /// Pass completed
    PassComplete {
        added: usize,
        removed: usize,
        failed: usize,
    },
    /// Pass aborted or watcher error
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl SyncEvent {
    /// Convert to JSON string with a "command" field included
    pub fn to_json(&self, command: &str) -> String {
        // Serialize to Value, add command field, then serialize to string
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!(command));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Whether the event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SyncEvent::ServiceFailed { .. } | SyncEvent::Error { .. } | SyncEvent::ProbeTimeout { .. }
        )
    }
}
