//! Container runtime implementations
//!
//! Concrete implementations of the ContainerRuntime port.

mod compose_cli;

pub use compose_cli::{image_name_base, ComposeCli, DEFAULT_COMPOSE_COMMAND, DEFAULT_DOCKER_COMMAND};
