//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod compose;
mod registry;

pub use compose::YamlComposeRepository;
pub use registry::JsonRegistryRepository;
