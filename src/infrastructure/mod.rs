//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic writes and advisory locks
//! - `repositories/` - Registry (JSON) and compose manifest (YAML)
//! - `runtime/` - docker compose command line

pub mod fs;
pub mod repositories;
pub mod runtime;

// Re-export for convenience
pub use fs::{atomic_write, lock_path_for, FileLock};
pub use repositories::{JsonRegistryRepository, YamlComposeRepository};
pub use runtime::ComposeCli;
