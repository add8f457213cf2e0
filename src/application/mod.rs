//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ReconcileUseCase` - One pass: plan, remove stale services, probe and add new ones
//! - `DeleteUseCase` - Removes an analyzer and everything generated for it
//! - `WatchUseCase` - Runs passes as the registry changes
//!
//! ## Services
//!
//! - `ReadinessProbe` / `verify` - Wait for analyzer source files

pub mod delete;
pub mod events;
pub mod probe;
pub mod reconcile;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_support;

pub use delete::{CleanupStep, DeleteOptions, DeleteResult, DeleteUseCase, StepOutcome, StepReport};
pub use events::SyncEvent;
pub use probe::{verify, ProbeOutcome, ReadinessProbe};
pub use reconcile::{
    FailureStage, PassResult, ReconcileOptions, ReconcileUseCase, ServiceFailure, SkipReason,
    SkippedService,
};
pub use watch::{content_hash, WatchOptions, WatchUseCase, WatcherState, DEBOUNCE_MS};
