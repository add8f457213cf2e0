//! Reconcile Use Case implementation

use crate::application::events::SyncEvent;
use crate::application::probe::ProbeOutcome;
use crate::domain::entities::{analyzer_service, ComposeDocument, CORE_SERVICES};
use crate::domain::ports::{ComposeError, ComposeRepository, ContainerRuntime, RegistryRepository};
use crate::domain::services::{plan, ReconcilePlan};
use crate::error::{RegsyncError, RegsyncResult};
use crate::infrastructure::fs::FileLock;

use super::options::ReconcileOptions;
use super::result::{FailureStage, PassResult, ServiceFailure, SkipReason, SkippedService};

/// Reconcile use case - drives compose services toward the registry
pub struct ReconcileUseCase<RR, CR, RT>
where
    RR: RegistryRepository,
    CR: ComposeRepository,
    RT: ContainerRuntime,
{
    registry_repo: RR,
    compose_repo: CR,
    runtime: RT,
    options: ReconcileOptions,
}

impl<RR, CR, RT> ReconcileUseCase<RR, CR, RT>
where
    RR: RegistryRepository,
    CR: ComposeRepository,
    RT: ContainerRuntime,
{
    pub fn new(registry_repo: RR, compose_repo: CR, runtime: RT, options: ReconcileOptions) -> Self {
        Self {
            registry_repo,
            compose_repo,
            runtime,
            options,
        }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Compute the plan without side effects
    pub fn plan(&self) -> RegsyncResult<ReconcilePlan> {
        let registry = self.registry_repo.load()?;
        let compose = self.compose_repo.load()?;
        let compose_ids = compose.service_names();

        Ok(plan(
            registry.ids(),
            compose_ids.iter().map(String::as_str),
            CORE_SERVICES,
        ))
    }

    /// Run one full pass: removals first, then probe, manifest write, and start.
    ///
    /// Read or parse failures abort the pass before anything changes. Per-service
    /// failures are reported and the remaining services continue.
    pub fn run_pass(&self, on_event: &impl Fn(SyncEvent)) -> RegsyncResult<PassResult> {
        let _lock = match self.lock() {
            Ok(lock) => lock,
            Err(e) => return Err(abort(on_event, e)),
        };

        on_event(SyncEvent::PassStarted);

        let (plan, mut document) = match self.load_plan() {
            Ok(loaded) => loaded,
            Err(e) => return Err(abort(on_event, e)),
        };

        on_event(SyncEvent::Plan {
            to_add: plan.to_add.clone(),
            to_remove: plan.to_remove.clone(),
        });

        let mut result = PassResult::new(plan);
        self.remove_stale(&mut document, &mut result, on_event);
        self.add_new(&mut document, &mut result, on_event);
        self.start_added(&mut result, on_event);

        on_event(SyncEvent::PassComplete {
            added: result.started.len(),
            removed: result.removed.len(),
            failed: result.failed.len(),
        });

        Ok(result)
    }

    fn lock(&self) -> RegsyncResult<Option<FileLock>> {
        let Some(path) = &self.options.lock_path else {
            return Ok(None);
        };
        FileLock::acquire(path)
            .map(Some)
            .map_err(|e| RegsyncError::Lock {
                path: path.clone(),
                message: e.to_string(),
            })
    }

    fn load_plan(&self) -> RegsyncResult<(ReconcilePlan, ComposeDocument)> {
        let registry = self.registry_repo.load()?;
        let document = self.compose_repo.load()?;
        let compose_ids = document.service_names();

        let plan = plan(
            registry.ids(),
            compose_ids.iter().map(String::as_str),
            CORE_SERVICES,
        );
        Ok((plan, document))
    }

    fn remove_stale(
        &self,
        document: &mut ComposeDocument,
        result: &mut PassResult,
        on_event: &impl Fn(SyncEvent),
    ) {
        for service in result.plan.to_remove.clone() {
            // Containers go first; on failure the service stays in the manifest
            if let Err(e) = self.runtime.stop_and_remove(&service) {
                fail(result, on_event, &service, FailureStage::Remove, e.to_string());
                continue;
            }

            let before = document.clone();
            document.remove_service(&service);
            if let Err(e) = self.compose_repo.save(document) {
                *document = before;
                fail(result, on_event, &service, FailureStage::Manifest, e.to_string());
                continue;
            }

            tracing::info!(%service, "removed stale service");
            on_event(SyncEvent::ServiceRemoved {
                service: service.clone(),
            });
            result.removed.push(service);
        }
    }

    fn add_new(
        &self,
        document: &mut ComposeDocument,
        result: &mut PassResult,
        on_event: &impl Fn(SyncEvent),
    ) {
        for service in result.plan.to_add.clone() {
            let dir = self.options.analytics_code.join(&service);
            if !dir.is_dir() {
                on_event(SyncEvent::SourceMissing {
                    service: service.clone(),
                    path: dir.display().to_string(),
                });
                result.skipped.push(SkippedService {
                    service,
                    reason: SkipReason::SourceMissing,
                });
                continue;
            }

            if let ProbeOutcome::TimedOut { missing } = self.options.probe.wait(&dir) {
                on_event(SyncEvent::ProbeTimeout {
                    service: service.clone(),
                    missing: missing.clone(),
                });
                result.skipped.push(SkippedService {
                    service,
                    reason: SkipReason::ProbeTimeout { missing },
                });
                continue;
            }

            let definition = analyzer_service(&service, &self.options.template);
            let before = document.clone();
            let written = document
                .add_service(&service, &definition)
                .map_err(|e| ComposeError::SerializationError {
                    message: e.to_string(),
                })
                .and_then(|()| self.compose_repo.save(document));

            if let Err(e) = written {
                *document = before;
                fail(result, on_event, &service, FailureStage::Manifest, e.to_string());
                continue;
            }

            on_event(SyncEvent::ServiceAdded {
                service: service.clone(),
            });
            result.added.push(service);
        }
    }

    fn start_added(&self, result: &mut PassResult, on_event: &impl Fn(SyncEvent)) {
        for service in result.added.clone() {
            match self.runtime.start(&service) {
                Ok(_) => {
                    tracing::info!(%service, "started service");
                    on_event(SyncEvent::ServiceStarted {
                        service: service.clone(),
                    });
                    result.started.push(service);
                }
                Err(e) => fail(result, on_event, &service, FailureStage::Start, e.to_string()),
            }
        }
    }
}

/// Report a pass that stops before touching any service
fn abort(on_event: &impl Fn(SyncEvent), error: RegsyncError) -> RegsyncError {
    tracing::warn!(%error, "reconciliation pass aborted");
    on_event(SyncEvent::Error {
        message: error.to_string(),
    });
    error
}

fn fail(
    result: &mut PassResult,
    on_event: &impl Fn(SyncEvent),
    service: &str,
    stage: FailureStage,
    message: String,
) {
    tracing::warn!(%service, %stage, %message, "service failed");
    on_event(SyncEvent::ServiceFailed {
        service: service.to_string(),
        stage: stage.to_string(),
        message: message.clone(),
    });
    result.failed.push(ServiceFailure {
        service: service.to_string(),
        stage,
        message,
    });
}
