//! Reconcile Use Case
//!
//! One reconciliation pass:
//! - Load the registry and the compose manifest
//! - Plan additions and removals (core services excluded)
//! - Stop, remove, and unlist stale services
//! - Probe new analyzer directories, write their services, start them

mod options;
mod result;
mod use_case;


pub use options::ReconcileOptions;
pub use result::{FailureStage, PassResult, ServiceFailure, SkipReason, SkippedService};
pub use use_case::ReconcileUseCase;
