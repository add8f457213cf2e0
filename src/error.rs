//! Error types for regsync
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{ComposeError, RegistryError, RuntimeError};

/// Result type alias for regsync operations
pub type RegsyncResult<T> = Result<T, RegsyncError>;

/// Main error type for regsync operations
#[derive(Error, Debug)]
pub enum RegsyncError {
    /// Registry file could not be read, parsed, or written
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Compose manifest could not be read, parsed, or written
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// A container tool invocation failed
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// File watcher could not be set up
    #[error("failed to watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    /// Advisory lock could not be taken
    #[error("failed to lock {path}: {message}")]
    Lock { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegsyncError {
    /// True for malformed registry or manifest content
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            RegsyncError::Registry(RegistryError::Corrupted { .. })
                | RegsyncError::Compose(ComposeError::Corrupted { .. })
        )
    }
}
