//! Watch Use Case
//!
//! Continuous reconciliation driven by registry changes:
//! - File system monitoring (via `notify` crate) of the registry's directory
//! - Debouncing (1000ms default)
//! - Content-hash dedupe of editor noise
//! - One reconciliation pass per settled change
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(options, reconcile);
//! use_case.start(running, |event| { ... });
//! ```

mod event;
mod use_case;


pub use event::{content_hash, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::WatchUseCase;
