//! Event rendering: timestamped lines for humans, NDJSON for machines

use regsync::application::SyncEvent;

/// Prints `SyncEvent`s for one command
#[derive(Debug, Clone, Copy)]
pub struct EventPrinter {
    json: bool,
    command: &'static str,
}

impl EventPrinter {
    pub fn new(command: &'static str, json: bool) -> Self {
        Self { json, command }
    }

    pub fn emit(&self, event: &SyncEvent) {
        if self.json {
            println!("{}", event.to_json(self.command));
            return;
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S");
        let line = format!("[{}] {}", timestamp, describe(event));
        match event {
            SyncEvent::Error { .. } | SyncEvent::ServiceFailed { .. } => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}

/// One-line human description of an event
pub fn describe(event: &SyncEvent) -> String {
    match event {
        SyncEvent::WatchStarted { registry, compose } => {
            format!("Watching {} (compose: {})", registry, compose)
        }
        SyncEvent::RegistryChanged { path } => format!("Registry changed: {}", path),
        SyncEvent::PassStarted => "Reconciling...".to_string(),
        SyncEvent::Plan { to_add, to_remove } => format!(
            "Plan: add [{}], remove [{}]",
            to_add.join(", "),
            to_remove.join(", ")
        ),
        SyncEvent::ServiceRemoved { service } => format!("Removed {}", service),
        SyncEvent::SourceMissing { service, path } => {
            format!("Skipped {}: no source directory at {}", service, path)
        }
        SyncEvent::ProbeTimeout { service, missing } => format!(
            "Skipped {}: timed out waiting for {}",
            service,
            missing.join(", ")
        ),
        SyncEvent::ServiceAdded { service } => format!("Added {} to compose", service),
        SyncEvent::ServiceStarted { service } => format!("Started {}", service),
        SyncEvent::ServiceFailed {
            service,
            stage,
            message,
        } => format!("Failed to {} {}: {}", stage, service, message),
        SyncEvent::PassComplete {
            added,
            removed,
            failed,
        } => format!(
            "Done: {} added, {} removed, {} failed",
            added, removed, failed
        ),
        SyncEvent::Error { message } => format!("Error: {}", message),
        SyncEvent::Shutdown => "Stopped watching".to_string(),
    }
}
