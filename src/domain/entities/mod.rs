//! Domain Entities
//!
//! Core domain objects: the analyzer registry (desired state) and the compose
//! document (observed state).

pub mod compose;
pub mod registry;

pub use compose::{
    analyzer_service, is_core_service, BuildSpec, ComposeDocument, HealthCheck,
    ServiceDefinition, ServiceTemplate, CORE_SERVICES,
};
pub use registry::{analyzer_id, compact_name, Registry, RegistryEntry, ANALYZER_SUFFIX};
