//! YAML Compose Repository
//!
//! Reads and rewrites the docker-compose manifest.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::ComposeDocument;
use crate::domain::ports::{ComposeError, ComposeRepository};
use crate::infrastructure::fs::atomic_write;

pub struct YamlComposeRepository {
    path: PathBuf,
}

impl YamlComposeRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ComposeRepository for YamlComposeRepository {
    fn load(&self) -> Result<ComposeDocument, ComposeError> {
        if !self.path.exists() {
            return Err(ComposeError::NotFound {
                path: self.path.clone(),
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ComposeError::AccessError {
            message: e.to_string(),
        })?;

        let value: serde_yaml_ng::Value =
            serde_yaml_ng::from_str(&content).map_err(|e| ComposeError::Corrupted {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        ComposeDocument::from_value(value).map_err(|message| ComposeError::Corrupted {
            path: self.path.clone(),
            message,
        })
    }

    fn save(&self, document: &ComposeDocument) -> Result<(), ComposeError> {
        let content = serde_yaml_ng::to_string(&document.to_value()).map_err(|e| {
            ComposeError::SerializationError {
                message: e.to_string(),
            }
        })?;

        atomic_write(&self.path, content.as_bytes()).map_err(|e| ComposeError::AccessError {
            message: e.to_string(),
        })
    }
}
