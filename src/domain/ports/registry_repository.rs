//! RegistryRepository port
//!
//! Persists the analyzer registry (`registry.json`).

use crate::domain::entities::Registry;
use std::path::PathBuf;

pub trait RegistryRepository {
    fn load(&self) -> Result<Registry, RegistryError>;
    fn save(&self, registry: &Registry) -> Result<(), RegistryError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Failed to access registry: {message}")]
    AccessError { message: String },

    #[error("Failed to serialize registry: {message}")]
    SerializationError { message: String },

    #[error("registry file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("registry file corrupted: {path}\n  → Details: {message}")]
    Corrupted { path: PathBuf, message: String },
}
