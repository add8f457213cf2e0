//! File system helpers
//!
//! Atomic replacement and advisory locking for the shared manifest files.

mod atomic;
mod lock;

pub use atomic::atomic_write;
pub use lock::{lock_path_for, FileLock};
