//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod compose_repository;
pub mod container_runtime;
pub mod registry_repository;

pub use compose_repository::{ComposeError, ComposeRepository};
pub use container_runtime::{ContainerRuntime, RuntimeError};
pub use registry_repository::{RegistryError, RegistryRepository};
