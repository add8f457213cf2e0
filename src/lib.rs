//! regsync - analyzer registry reconciliation
//!
//! regsync watches the analyzer registry written by the platform's web
//! application, diffs it against the non-core services of the docker-compose
//! manifest, and drives container lifecycle until both agree.
//!
//! ## Layers
//!
//! - `domain` - Registry and compose models, the planner, and the ports
//! - `application` - Reconcile, delete, and watch use cases
//! - `infrastructure` - JSON/YAML repositories and the compose CLI runtime
//! - `config` - `regsync.toml` loading with environment overrides

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    DeleteResult, DeleteUseCase, PassResult, ReconcileUseCase, SyncEvent, WatchUseCase,
};
pub use config::Config;
pub use domain::entities::{analyzer_id, ComposeDocument, Registry, RegistryEntry};
pub use domain::services::{plan, ReconcilePlan};
pub use error::{RegsyncError, RegsyncResult};
