//! Delete result types

use serde::Serialize;

/// One cleanup step of an analyzer deletion, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupStep {
    StopContainer,
    RemoveContainer,
    RemoveImage,
    RemoveLocalStorage,
    RemoveComposeService,
    RemoveRegistryEntry,
    DeleteConfigFiles,
    DeleteSourceDirectory,
    DeleteComponent,
    RestartServices,
}

impl CleanupStep {
    /// Steps whose failure makes the whole deletion unsuccessful
    pub fn is_primary(self) -> bool {
        matches!(
            self,
            CleanupStep::RemoveContainer
                | CleanupStep::RemoveRegistryEntry
                | CleanupStep::DeleteConfigFiles
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            CleanupStep::StopContainer => "stop container",
            CleanupStep::RemoveContainer => "remove container",
            CleanupStep::RemoveImage => "remove image",
            CleanupStep::RemoveLocalStorage => "remove local storage record",
            CleanupStep::RemoveComposeService => "remove compose service",
            CleanupStep::RemoveRegistryEntry => "remove registry entry",
            CleanupStep::DeleteConfigFiles => "delete config files",
            CleanupStep::DeleteSourceDirectory => "delete source directory",
            CleanupStep::DeleteComponent => "delete component",
            CleanupStep::RestartServices => "restart remaining services",
        }
    }
}

impl std::fmt::Display for CleanupStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Done {
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// Nothing to do (already absent)
    Skipped { reason: String },
    Failed { message: String },
}

impl StepOutcome {
    pub fn done() -> Self {
        StepOutcome::Done { detail: None }
    }

    pub fn done_with(detail: impl Into<String>) -> Self {
        StepOutcome::Done {
            detail: Some(detail.into()),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        StepOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn failed(message: impl ToString) -> Self {
        StepOutcome::Failed {
            message: message.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: CleanupStep,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Result of deleting one analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    /// Display name as given
    pub name: String,
    /// Derived identifier
    pub analyzer: String,
    pub steps: Vec<StepReport>,
}

impl DeleteResult {
    pub fn new(name: impl Into<String>, analyzer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            analyzer: analyzer.into(),
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: CleanupStep, outcome: StepOutcome) {
        self.steps.push(StepReport { step, outcome });
    }

    pub fn outcome(&self, step: CleanupStep) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|report| report.step == step)
            .map(|report| &report.outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|report| report.outcome.is_failed())
    }

    /// True when no primary step failed
    pub fn is_success(&self) -> bool {
        !self.failures().any(|report| report.step.is_primary())
    }
}
