//! ComposeRepository port
//!
//! Persists the compose manifest (`docker-compose.yml`).

use crate::domain::entities::ComposeDocument;
use std::path::PathBuf;

pub trait ComposeRepository {
    fn load(&self) -> Result<ComposeDocument, ComposeError>;
    fn save(&self, document: &ComposeDocument) -> Result<(), ComposeError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Failed to access compose manifest: {message}")]
    AccessError { message: String },

    #[error("compose manifest not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to serialize compose manifest: {message}")]
    SerializationError { message: String },

    #[error("compose manifest corrupted: {path}\n  → Details: {message}")]
    Corrupted { path: PathBuf, message: String },
}
