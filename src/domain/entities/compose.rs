//! Compose document entity
//!
//! The compose manifest is the observed state. Analyzer services are produced
//! from a fixed template; every other part of the manifest (core services,
//! networks, volumes, unknown keys) is carried as opaque YAML so a rewrite never
//! drops fields this crate does not model.

use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};

/// Services owned by the platform itself; reconciliation never touches them
pub const CORE_SERVICES: &[&str] = &["gateway", "backend"];

pub const ANALYZER_NETWORK: &str = "analyzer-network";
pub const DOCKERFILE: &str = "Dockerfile";
pub const SERVICE_PORT: u16 = 8000;
pub const CONTAINER_APP_DIR: &str = "/app";
pub const SERVICE_USER: &str = "${DOCKER_UID}:${DOCKER_GID}";
pub const RESTART_POLICY: &str = "unless-stopped";
pub const HEALTH_PATH: &str = "/health";
pub const HEALTH_INTERVAL: &str = "30s";
pub const HEALTH_TIMEOUT: &str = "10s";
pub const HEALTH_RETRIES: u32 = 3;
pub const HEALTH_START_PERIOD: &str = "20s";

/// Default analytics code root, relative to the manifest directory
pub const DEFAULT_ANALYTICS_ROOT: &str = "src/app/analyticscode";

const SERVICES_KEY: &str = "services";

pub fn is_core_service(id: &str) -> bool {
    CORE_SERVICES.contains(&id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    pub context: String,
    pub dockerfile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub test: Vec<String>,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
    pub start_period: String,
}

/// A compose service generated for an analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub build: BuildSpec,
    pub networks: Vec<String>,
    pub volumes: Vec<String>,
    pub environment: Vec<String>,
    pub user: String,
    pub restart: String,
    pub healthcheck: HealthCheck,
}

/// Inputs of the analyzer service template that vary per installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTemplate {
    /// Analytics code root as written into the manifest (relative to it)
    pub analytics_root: String,
}

impl Default for ServiceTemplate {
    fn default() -> Self {
        Self {
            analytics_root: DEFAULT_ANALYTICS_ROOT.to_string(),
        }
    }
}

impl ServiceTemplate {
    pub fn new(analytics_root: impl Into<String>) -> Self {
        Self {
            analytics_root: analytics_root.into(),
        }
    }

    fn context_for(&self, id: &str) -> String {
        let root = self.analytics_root.trim_end_matches('/');
        if root.is_empty() {
            id.to_string()
        } else {
            format!("{}/{}", root, id)
        }
    }

    /// Bind mount sources must be explicit paths, so bare relative roots get `./`
    fn mount_source_for(&self, id: &str) -> String {
        let context = self.context_for(id);
        if context.starts_with('/') || context.starts_with("./") || context.starts_with("../") {
            context
        } else {
            format!("./{}", context)
        }
    }
}

/// Build the compose service for an analyzer identifier
pub fn analyzer_service(id: &str, template: &ServiceTemplate) -> ServiceDefinition {
    ServiceDefinition {
        build: BuildSpec {
            context: template.context_for(id),
            dockerfile: DOCKERFILE.to_string(),
        },
        networks: vec![ANALYZER_NETWORK.to_string()],
        volumes: vec![format!(
            "{}:{}:ro",
            template.mount_source_for(id),
            CONTAINER_APP_DIR
        )],
        environment: vec![
            format!("SERVICE_NAME={}", id),
            format!("SERVICE_PORT={}", SERVICE_PORT),
            format!("PYTHONPATH={}", CONTAINER_APP_DIR),
        ],
        user: SERVICE_USER.to_string(),
        restart: RESTART_POLICY.to_string(),
        healthcheck: HealthCheck {
            test: vec![
                "CMD".to_string(),
                "curl".to_string(),
                "-f".to_string(),
                format!("http://localhost:{}{}", SERVICE_PORT, HEALTH_PATH),
            ],
            interval: HEALTH_INTERVAL.to_string(),
            timeout: HEALTH_TIMEOUT.to_string(),
            retries: HEALTH_RETRIES,
            start_period: HEALTH_START_PERIOD.to_string(),
        },
    }
}

/// In-memory compose manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeDocument {
    root: Mapping,
}

impl ComposeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed YAML value; an empty document is accepted as empty
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            other => Err(format!(
                "manifest root must be a mapping, found {}",
                value_kind(&other)
            )),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Mapping(self.root.clone())
    }

    fn services(&self) -> Option<&Mapping> {
        self.root.get(SERVICES_KEY).and_then(Value::as_mapping)
    }

    /// Service names in manifest order
    pub fn service_names(&self) -> Vec<String> {
        self.services()
            .map(|services| {
                services
                    .keys()
                    .filter_map(|key| key.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains_service(&self, id: &str) -> bool {
        self.services()
            .map(|services| services.contains_key(id))
            .unwrap_or(false)
    }

    pub fn service(&self, id: &str) -> Option<&Value> {
        self.services().and_then(|services| services.get(id))
    }

    /// Insert (or replace) a service definition
    pub fn add_service(
        &mut self,
        id: &str,
        definition: &ServiceDefinition,
    ) -> Result<(), serde_yaml_ng::Error> {
        let key = Value::String(id.to_string());
        let value = serde_yaml_ng::to_value(definition)?;
        if let Some(Value::Mapping(services)) = self.root.get_mut(SERVICES_KEY) {
            services.insert(key, value);
        } else {
            // A missing or null `services:` key becomes a fresh mapping in place
            let mut services = Mapping::new();
            services.insert(key, value);
            self.root.insert(
                Value::String(SERVICES_KEY.to_string()),
                Value::Mapping(services),
            );
        }
        Ok(())
    }

    /// Remove a service; removing an absent service is a no-op
    pub fn remove_service(&mut self, id: &str) -> bool {
        match self.root.get_mut(SERVICES_KEY) {
            Some(Value::Mapping(services)) => services.shift_remove(id).is_some(),
            _ => false,
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
