//! JSON Registry Repository
//!
//! Reads and rewrites the analyzer registry (`src/app/analyzers/registry.json`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::{Registry, RegistryEntry};
use crate::domain::ports::{RegistryError, RegistryRepository};
use crate::infrastructure::fs::{atomic_write, lock_path_for, FileLock};

pub struct JsonRegistryRepository {
    path: PathBuf,
}

impl JsonRegistryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(&self) -> Result<Registry, RegistryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RegistryError::NotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) => {
                return Err(RegistryError::AccessError {
                    message: e.to_string(),
                })
            }
        };

        // A writer between truncate and write leaves an empty file; `{}` is the empty registry
        if content.trim().is_empty() {
            return Err(RegistryError::Corrupted {
                path: self.path.clone(),
                message: "file is empty".to_string(),
            });
        }

        let entries: BTreeMap<String, RegistryEntry> =
            serde_json::from_str(&content).map_err(|e| RegistryError::Corrupted {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        Ok(Registry::from_entries(entries))
    }

    fn save_to_disk(&self, registry: &Registry) -> Result<(), RegistryError> {
        let mut content = serde_json::to_string_pretty(registry.entries()).map_err(|e| {
            RegistryError::SerializationError {
                message: e.to_string(),
            }
        })?;
        content.push('\n');

        atomic_write(&self.path, content.as_bytes()).map_err(|e| RegistryError::AccessError {
            message: e.to_string(),
        })
    }
}

impl RegistryRepository for JsonRegistryRepository {
    fn load(&self) -> Result<Registry, RegistryError> {
        self.load_from_disk()
    }

    fn save(&self, registry: &Registry) -> Result<(), RegistryError> {
        let _lock =
            FileLock::acquire(&lock_path_for(&self.path)).map_err(|e| RegistryError::AccessError {
                message: e.to_string(),
            })?;
        self.save_to_disk(registry)
    }
}
