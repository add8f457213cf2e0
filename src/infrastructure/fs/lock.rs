//! Advisory file locks
//!
//! Exclusive `fs2` locks on a sidecar `.lock` file. Held for the duration of a
//! registry save, a reconciliation pass, or an analyzer deletion so separate
//! `regsync` processes serialize instead of interleaving writes.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Sidecar lock path for a data file (`docker-compose.yml` -> `docker-compose.yml.lock`)
pub fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

/// Held exclusive lock; released on drop
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the exclusive lock on `lock_path` is acquired
    pub fn acquire(lock_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(lock_path)?;
        file.lock_exclusive()?;
        Ok(Self {
            file,
            path: lock_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
