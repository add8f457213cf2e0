//! Reconcile options

use std::path::PathBuf;

use crate::application::probe::ReadinessProbe;
use crate::config::{Config, ResolvedPaths};
use crate::domain::entities::ServiceTemplate;
use crate::infrastructure::fs::lock_path_for;

/// Inputs of one reconciliation pass besides the ports
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Directory holding one source directory per analyzer
    pub analytics_code: PathBuf,
    /// Template for new compose services
    pub template: ServiceTemplate,
    /// Readiness probe run before a service is added
    pub probe: ReadinessProbe,
    /// Cross-process lock held for the whole pass
    pub lock_path: Option<PathBuf>,
}

impl ReconcileOptions {
    pub fn new(analytics_code: impl Into<PathBuf>, probe: ReadinessProbe) -> Self {
        Self {
            analytics_code: analytics_code.into(),
            template: ServiceTemplate::default(),
            probe,
            lock_path: None,
        }
    }

    pub fn from_config(config: &Config, paths: &ResolvedPaths) -> Self {
        let probe = ReadinessProbe::new(config.probe.required_files.clone(), config.probe_timeout())
            .with_interval(config.probe_interval());

        Self::new(paths.analytics_code.clone(), probe)
            .with_template(paths.service_template())
            .with_lock_path(lock_path_for(&paths.compose))
    }

    pub fn with_template(mut self, template: ServiceTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_lock_path(mut self, lock_path: impl Into<PathBuf>) -> Self {
        self.lock_path = Some(lock_path.into());
        self
    }
}
