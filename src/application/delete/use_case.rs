//! Delete Use Case implementation

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::entities::{analyzer_id, compact_name, ANALYZER_SUFFIX};
use crate::domain::ports::{
    ComposeError, ComposeRepository, ContainerRuntime, RegistryError, RegistryRepository,
};
use crate::error::{RegsyncError, RegsyncResult};
use crate::infrastructure::fs::{atomic_write, FileLock};

use super::options::DeleteOptions;
use super::result::{CleanupStep, DeleteResult, StepOutcome};

/// Config directory entries that never belong to a single analyzer
const SHARED_CONFIG_FILE: &str = "registry.json";
const COMPONENT_EXTENSION: &str = "tsx";

/// Delete use case - removes an analyzer and everything generated for it
pub struct DeleteUseCase<RR, CR, RT>
where
    RR: RegistryRepository,
    CR: ComposeRepository,
    RT: ContainerRuntime,
{
    registry_repo: RR,
    compose_repo: CR,
    runtime: RT,
    options: DeleteOptions,
}

impl<RR, CR, RT> DeleteUseCase<RR, CR, RT>
where
    RR: RegistryRepository,
    CR: ComposeRepository,
    RT: ContainerRuntime,
{
    pub fn new(registry_repo: RR, compose_repo: CR, runtime: RT, options: DeleteOptions) -> Self {
        Self {
            registry_repo,
            compose_repo,
            runtime,
            options,
        }
    }

    /// Run every cleanup step for `name`.
    ///
    /// Step failures are recorded and never stop later steps. Only failing to
    /// take the manifest lock is an error.
    pub fn execute(&self, name: &str) -> RegsyncResult<DeleteResult> {
        let _lock = match &self.options.lock_path {
            Some(path) => Some(FileLock::acquire(path).map_err(|e| RegsyncError::Lock {
                path: path.clone(),
                message: e.to_string(),
            })?),
            None => None,
        };

        let id = analyzer_id(name);
        let mut result = DeleteResult::new(name, &id);

        // A service that was never deployed has no container to remove
        let deployed = match self.compose_repo.load() {
            Ok(document) => document.contains_service(&id),
            Err(_) => true,
        };
        if deployed {
            result.record(CleanupStep::StopContainer, outcome_of(self.runtime.stop(&id)));
            result.record(
                CleanupStep::RemoveContainer,
                outcome_of(self.runtime.remove_container(&id)),
            );
            result.record(CleanupStep::RemoveImage, outcome_of(self.runtime.remove_image(&id)));
        } else {
            for step in [
                CleanupStep::StopContainer,
                CleanupStep::RemoveContainer,
                CleanupStep::RemoveImage,
            ] {
                result.record(step, StepOutcome::skipped("service not in manifest"));
            }
        }

        result.record(CleanupStep::RemoveLocalStorage, self.remove_local_storage(name));
        result.record(CleanupStep::RemoveComposeService, self.remove_compose_service(&id));
        result.record(CleanupStep::RemoveRegistryEntry, self.remove_registry_entry(&id));
        result.record(CleanupStep::DeleteConfigFiles, self.delete_config_files(name));
        result.record(CleanupStep::DeleteSourceDirectory, self.delete_source_directory(&id));
        result.record(CleanupStep::DeleteComponent, self.delete_component(&id));
        result.record(CleanupStep::RestartServices, self.restart_remaining());

        for report in &result.steps {
            match &report.outcome {
                StepOutcome::Failed { message } => {
                    tracing::warn!(analyzer = %id, step = %report.step, %message, "cleanup step failed")
                }
                outcome => tracing::debug!(analyzer = %id, step = %report.step, ?outcome, "cleanup step"),
            }
        }

        Ok(result)
    }

    /// Drop records whose `name` matches case-insensitively from the JSON array
    fn remove_local_storage(&self, name: &str) -> StepOutcome {
        let path = &self.options.local_storage;
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return StepOutcome::skipped("no local storage file")
            }
            Err(e) => return StepOutcome::failed(e),
        };

        let records: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => return StepOutcome::failed(format!("{}: {}", path.display(), e)),
        };

        let wanted = name.to_lowercase();
        let before = records.len();
        let kept: Vec<serde_json::Value> = records
            .into_iter()
            .filter(|record| {
                record
                    .get("name")
                    .and_then(serde_json::Value::as_str)
                    .map(|n| n.to_lowercase() != wanted)
                    .unwrap_or(true)
            })
            .collect();

        let removed = before - kept.len();
        if removed == 0 {
            return StepOutcome::skipped("no matching record");
        }

        match serde_json::to_string_pretty(&kept) {
            Ok(json) => match atomic_write(path, json.as_bytes()) {
                Ok(()) => StepOutcome::done_with(format!("{} record(s)", removed)),
                Err(e) => StepOutcome::failed(e),
            },
            Err(e) => StepOutcome::failed(e),
        }
    }

    fn remove_compose_service(&self, id: &str) -> StepOutcome {
        let mut document = match self.compose_repo.load() {
            Ok(document) => document,
            Err(ComposeError::NotFound { .. }) => return StepOutcome::skipped("no manifest"),
            Err(e) => return StepOutcome::failed(e),
        };

        if !document.remove_service(id) {
            return StepOutcome::skipped("service not in manifest");
        }
        match self.compose_repo.save(&document) {
            Ok(()) => StepOutcome::done(),
            Err(e) => StepOutcome::failed(e),
        }
    }

    fn remove_registry_entry(&self, id: &str) -> StepOutcome {
        let mut registry = match self.registry_repo.load() {
            Ok(registry) => registry,
            Err(RegistryError::NotFound { .. }) => return StepOutcome::skipped("no registry file"),
            Err(e) => return StepOutcome::failed(e),
        };

        if !registry.remove(id) {
            return StepOutcome::skipped("not registered");
        }
        match self.registry_repo.save(&registry) {
            Ok(()) => StepOutcome::done(),
            Err(e) => StepOutcome::failed(e),
        }
    }

    /// Delete `*.json` files whose name contains the compact analyzer name
    fn delete_config_files(&self, name: &str) -> StepOutcome {
        let dir = &self.options.analyzer_configs;
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return StepOutcome::skipped("no config directory")
            }
            Err(e) => return StepOutcome::failed(e),
        };

        let needle = compact_name(name);
        let mut deleted = Vec::new();
        let mut errors = Vec::new();

        for entry in entries.flatten() {
            let file_name = entry.file_name().to_string_lossy().to_lowercase();
            if !is_analyzer_config(&file_name, &needle) || !entry.path().is_file() {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => deleted.push(file_name),
                Err(e) => errors.push(format!("{}: {}", entry.path().display(), e)),
            }
        }

        if !errors.is_empty() {
            return StepOutcome::failed(errors.join("; "));
        }
        if deleted.is_empty() {
            return StepOutcome::skipped("no matching config files");
        }
        deleted.sort();
        StepOutcome::done_with(deleted.join(", "))
    }

    fn delete_source_directory(&self, id: &str) -> StepOutcome {
        remove_path(&self.options.analytics_code.join(id), true)
    }

    fn delete_component(&self, id: &str) -> StepOutcome {
        let file = self
            .options
            .components
            .join(format!("{}.{}", id, COMPONENT_EXTENSION));
        remove_path(&file, false)
    }

    /// Bring the remaining analyzer services back up
    fn restart_remaining(&self) -> StepOutcome {
        let services = match self.runtime.list_services() {
            Ok(services) => services,
            Err(e) => return StepOutcome::failed(e),
        };

        let analyzers: Vec<String> = services
            .into_iter()
            .filter(|service| service.contains(ANALYZER_SUFFIX))
            .collect();
        if analyzers.is_empty() {
            return StepOutcome::skipped("no remaining analyzers");
        }

        match self.runtime.up(&analyzers) {
            Ok(_) => StepOutcome::done_with(analyzers.join(" ")),
            Err(e) => StepOutcome::failed(e),
        }
    }
}

fn outcome_of<T, E: ToString>(result: Result<T, E>) -> StepOutcome {
    match result {
        Ok(_) => StepOutcome::done(),
        Err(e) => StepOutcome::failed(e),
    }
}

/// `file_name` must already be lowercase
fn is_analyzer_config(file_name: &str, needle: &str) -> bool {
    file_name.ends_with(".json") && file_name != SHARED_CONFIG_FILE && file_name.contains(needle)
}

fn remove_path(path: &Path, directory: bool) -> StepOutcome {
    if !path.exists() {
        return StepOutcome::skipped("not present");
    }
    let removed = if directory {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match removed {
        Ok(()) => StepOutcome::done(),
        Err(e) => StepOutcome::failed(format!("{}: {}", path.display(), e)),
    }
}
