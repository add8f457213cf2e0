//! In-memory ports shared by the use case tests

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::application::events::SyncEvent;
use crate::domain::entities::{ComposeDocument, Registry};
use crate::domain::ports::{
    ComposeError, ComposeRepository, ContainerRuntime, RegistryError, RegistryRepository,
    RuntimeError,
};

#[derive(Default)]
pub struct MockRegistryRepository {
    pub registry: RefCell<Registry>,
    pub corrupted: bool,
    pub missing: bool,
    pub saves: RefCell<usize>,
}

impl MockRegistryRepository {
    pub fn with(registry: Registry) -> Self {
        Self {
            registry: RefCell::new(registry),
            ..Self::default()
        }
    }
}

impl RegistryRepository for &MockRegistryRepository {
    fn load(&self) -> Result<Registry, RegistryError> {
        if self.missing {
            return Err(RegistryError::NotFound {
                path: PathBuf::from("registry.json"),
            });
        }
        if self.corrupted {
            return Err(RegistryError::Corrupted {
                path: PathBuf::from("registry.json"),
                message: "expected value at line 1 column 1".to_string(),
            });
        }
        Ok(self.registry.borrow().clone())
    }

    fn save(&self, registry: &Registry) -> Result<(), RegistryError> {
        *self.registry.borrow_mut() = registry.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockComposeRepository {
    pub document: RefCell<ComposeDocument>,
    pub saves: RefCell<usize>,
    pub read_only: bool,
    /// Number of upcoming saves that fail before saves succeed again
    pub failing_saves: RefCell<usize>,
}

impl MockComposeRepository {
    pub fn with_services(names: &[&str]) -> Self {
        let mut yaml = String::from("services:\n");
        for name in names {
            yaml.push_str(&format!("  {}:\n    image: {}\n", name, name));
        }
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        Self {
            document: RefCell::new(ComposeDocument::from_value(value).unwrap()),
            ..Self::default()
        }
    }

    pub fn service_names(&self) -> Vec<String> {
        self.document.borrow().service_names()
    }
}

impl ComposeRepository for &MockComposeRepository {
    fn load(&self) -> Result<ComposeDocument, ComposeError> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, document: &ComposeDocument) -> Result<(), ComposeError> {
        let pending_failure = *self.failing_saves.borrow() > 0;
        if self.read_only || pending_failure {
            if pending_failure {
                *self.failing_saves.borrow_mut() -= 1;
            }
            return Err(ComposeError::AccessError {
                message: "permission denied".to_string(),
            });
        }
        *self.document.borrow_mut() = document.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

/// Records every call as `"<operation> <args>"`; calls listed in `failing` error
#[derive(Default)]
pub struct RecordingRuntime {
    pub calls: RefCell<Vec<String>>,
    pub failing: HashSet<String>,
    pub listed: Vec<String>,
}

impl RecordingRuntime {
    pub fn failing(calls: &[&str]) -> Self {
        Self {
            failing: calls.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> Result<String, RuntimeError> {
        self.calls.borrow_mut().push(call.clone());
        if self.failing.contains(&call) {
            return Err(RuntimeError::Failed {
                command: call,
                code: Some(1),
                stderr: "boom".to_string(),
            });
        }
        Ok(String::new())
    }
}

impl ContainerRuntime for &RecordingRuntime {
    fn start(&self, service: &str) -> Result<String, RuntimeError> {
        self.record(format!("start {}", service))
    }

    fn stop_and_remove(&self, service: &str) -> Result<String, RuntimeError> {
        self.record(format!("stop_and_remove {}", service))
    }

    fn stop(&self, service: &str) -> Result<String, RuntimeError> {
        self.record(format!("stop {}", service))
    }

    fn remove_container(&self, service: &str) -> Result<String, RuntimeError> {
        self.record(format!("remove_container {}", service))
    }

    fn remove_image(&self, service: &str) -> Result<String, RuntimeError> {
        self.record(format!("remove_image {}", service))
    }

    fn list_services(&self) -> Result<Vec<String>, RuntimeError> {
        self.record("list_services".to_string())?;
        Ok(self.listed.clone())
    }

    fn up(&self, services: &[String]) -> Result<String, RuntimeError> {
        self.record(format!("up {}", services.join(" ")))
    }
}

/// Collects emitted events
#[derive(Default)]
pub struct EventLog {
    events: RefCell<Vec<SyncEvent>>,
}

impl EventLog {
    pub fn sink(&self) -> impl Fn(SyncEvent) + '_ {
        move |event| self.events.borrow_mut().push(event)
    }

    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.borrow().clone()
    }
}
