//! Reconcile result types

use serde::Serialize;

use crate::domain::services::ReconcilePlan;

/// Stage of a pass at which a service failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Stopping or removing the running service
    Remove,
    /// Writing the compose manifest
    Manifest,
    /// Building or starting the service
    Start,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Remove => write!(f, "remove"),
            FailureStage::Manifest => write!(f, "manifest"),
            FailureStage::Start => write!(f, "start"),
        }
    }
}

/// Why an analyzer in `to_add` was not added this pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The analyzer source directory does not exist
    SourceMissing,
    /// Required files did not appear in time
    ProbeTimeout { missing: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedService {
    pub service: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceFailure {
    pub service: String,
    pub stage: FailureStage,
    pub message: String,
}

/// Result of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassResult {
    pub plan: ReconcilePlan,
    /// Services stopped and dropped from the manifest
    pub removed: Vec<String>,
    /// Services written to the manifest
    pub added: Vec<String>,
    /// Added services whose start succeeded
    pub started: Vec<String>,
    pub skipped: Vec<SkippedService>,
    pub failed: Vec<ServiceFailure>,
}

impl PassResult {
    pub fn new(plan: ReconcilePlan) -> Self {
        Self {
            plan,
            ..Self::default()
        }
    }

    /// True when no service failed (skips are expected and retried)
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when the manifest matches the registry, with nothing left to retry
    pub fn is_settled(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}
