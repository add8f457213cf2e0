//! Delete Use Case Tests

use super::*;
use crate::application::test_support::{
    MockComposeRepository, MockRegistryRepository, RecordingRuntime,
};
use crate::domain::entities::{Registry, RegistryEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn options(&self) -> DeleteOptions {
        DeleteOptions {
            analytics_code: self.path("analyticscode"),
            analyzer_configs: self.path("config/analyzers"),
            components: self.path("components/analyzers"),
            local_storage: self.path("localStorage.json"),
            lock_path: Some(self.path("docker-compose.yml.lock")),
        }
    }
}

fn registry(ids: &[&str]) -> Registry {
    let mut registry = Registry::new();
    for id in ids {
        registry.insert(*id, RegistryEntry::new(*id, format!("{}.json", id)));
    }
    registry
}

fn exists(path: &Path) -> bool {
    path.exists()
}

#[test]
fn delete_foo_cleans_everything_and_restarts_siblings() {
    let project = Project::new();
    project.write(
        "localStorage.json",
        r#"[{"name": "FOO", "id": 1}, {"name": "Bar", "id": 2}]"#,
    );
    project.write("config/analyzers/foo.json", "{}");
    project.write("config/analyzers/fooanalyzer.json", "{}");
    project.write("config/analyzers/bar.json", "{}");
    project.write("config/analyzers/registry.json", "{}");
    project.write("analyticscode/fooanalyzer/main.py", "");
    project.write("components/analyzers/fooanalyzer.tsx", "");

    let registry_repo = MockRegistryRepository::with(registry(&["fooanalyzer", "baranalyzer"]));
    let compose_repo =
        MockComposeRepository::with_services(&["gateway", "backend", "fooanalyzer", "baranalyzer"]);
    let runtime = RecordingRuntime {
        listed: vec![
            "gateway".to_string(),
            "backend".to_string(),
            "baranalyzer".to_string(),
        ],
        ..RecordingRuntime::default()
    };

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Foo")
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.analyzer, "fooanalyzer");
    assert_eq!(result.steps.len(), 10);
    assert!(result.failures().next().is_none());

    assert_eq!(
        runtime.calls(),
        vec![
            "stop fooanalyzer",
            "remove_container fooanalyzer",
            "remove_image fooanalyzer",
            "list_services",
            "up baranalyzer",
        ]
    );

    let storage: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project.path("localStorage.json")).unwrap())
            .unwrap();
    assert_eq!(storage, serde_json::json!([{"name": "Bar", "id": 2}]));

    assert_eq!(
        compose_repo.service_names(),
        vec!["gateway", "backend", "baranalyzer"]
    );
    assert!(!registry_repo.registry.borrow().contains("fooanalyzer"));
    assert!(registry_repo.registry.borrow().contains("baranalyzer"));

    assert!(!exists(&project.path("config/analyzers/foo.json")));
    assert!(!exists(&project.path("config/analyzers/fooanalyzer.json")));
    assert!(exists(&project.path("config/analyzers/bar.json")));
    assert!(exists(&project.path("config/analyzers/registry.json")));
    assert!(!exists(&project.path("analyticscode/fooanalyzer")));
    assert!(!exists(&project.path("components/analyzers/fooanalyzer.tsx")));

    assert_eq!(
        result.outcome(CleanupStep::DeleteConfigFiles),
        Some(&StepOutcome::done_with("foo.json, fooanalyzer.json"))
    );
}

#[test]
fn failing_container_step_does_not_abort_later_steps() {
    let project = Project::new();
    project.write("config/analyzers/foo.json", "{}");

    let registry_repo = MockRegistryRepository::with(registry(&["fooanalyzer"]));
    let compose_repo = MockComposeRepository::with_services(&["gateway", "fooanalyzer"]);
    let runtime = RecordingRuntime::failing(&["stop fooanalyzer", "remove_image fooanalyzer"]);

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Foo")
        .unwrap();

    assert!(result.outcome(CleanupStep::StopContainer).unwrap().is_failed());
    assert!(result.outcome(CleanupStep::RemoveImage).unwrap().is_failed());
    // neither step is primary
    assert!(result.is_success());
    assert!(registry_repo.registry.borrow().is_empty());
    assert!(!exists(&project.path("config/analyzers/foo.json")));
}

#[test]
fn failing_container_removal_marks_result_unsuccessful() {
    let project = Project::new();
    let registry_repo = MockRegistryRepository::with(registry(&["fooanalyzer"]));
    let compose_repo = MockComposeRepository::with_services(&["fooanalyzer"]);
    let runtime = RecordingRuntime::failing(&["remove_container fooanalyzer"]);

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Foo")
        .unwrap();

    assert!(!result.is_success());
    let failed: Vec<_> = result.failures().map(|r| r.step).collect();
    assert_eq!(failed, vec![CleanupStep::RemoveContainer]);
    // later steps still ran
    assert!(registry_repo.registry.borrow().is_empty());
    assert!(compose_repo.service_names().is_empty());
}

#[test]
fn undeployed_analyzer_skips_container_steps() {
    let project = Project::new();
    let registry_repo = MockRegistryRepository::with(registry(&["fooanalyzer"]));
    let compose_repo = MockComposeRepository::with_services(&["gateway"]);
    let runtime = RecordingRuntime::default();

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Foo")
        .unwrap();

    assert!(result.is_success());
    assert_eq!(
        result.outcome(CleanupStep::RemoveContainer),
        Some(&StepOutcome::skipped("service not in manifest"))
    );
    assert_eq!(runtime.calls(), vec!["list_services"]);
}

#[test]
fn unknown_analyzer_is_all_skips() {
    let project = Project::new();
    let registry_repo = MockRegistryRepository::default();
    let compose_repo = MockComposeRepository::with_services(&["gateway"]);
    let runtime = RecordingRuntime::default();

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Ghost")
        .unwrap();

    assert!(result.is_success());
    assert!(result
        .steps
        .iter()
        .all(|report| matches!(report.outcome, StepOutcome::Skipped { .. })));
    assert_eq!(*registry_repo.saves.borrow(), 0);
    assert_eq!(*compose_repo.saves.borrow(), 0);
}

#[test]
fn corrupted_registry_fails_primary_step() {
    let project = Project::new();
    let registry_repo = MockRegistryRepository {
        corrupted: true,
        ..MockRegistryRepository::default()
    };
    let compose_repo = MockComposeRepository::default();
    let runtime = RecordingRuntime::default();

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Foo")
        .unwrap();

    assert!(result
        .outcome(CleanupStep::RemoveRegistryEntry)
        .unwrap()
        .is_failed());
    assert!(!result.is_success());
}

#[test]
fn missing_registry_file_skips_registry_step() {
    let project = Project::new();
    let registry_repo = MockRegistryRepository {
        missing: true,
        ..MockRegistryRepository::default()
    };
    let compose_repo = MockComposeRepository::default();
    let runtime = RecordingRuntime::default();

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Foo")
        .unwrap();

    assert_eq!(
        result.outcome(CleanupStep::RemoveRegistryEntry),
        Some(&StepOutcome::skipped("no registry file"))
    );
    assert!(result.is_success());
    assert_eq!(*registry_repo.saves.borrow(), 0);
}

#[test]
fn malformed_local_storage_is_reported() {
    let project = Project::new();
    project.write("localStorage.json", "{\"not\": \"an array\"}");

    let registry_repo = MockRegistryRepository::default();
    let compose_repo = MockComposeRepository::default();
    let runtime = RecordingRuntime::default();

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Foo")
        .unwrap();

    assert!(result
        .outcome(CleanupStep::RemoveLocalStorage)
        .unwrap()
        .is_failed());
    // not a primary step
    assert!(result.is_success());
    assert_eq!(
        fs::read_to_string(project.path("localStorage.json")).unwrap(),
        "{\"not\": \"an array\"}"
    );
}

#[test]
fn multi_word_name_derives_compact_identifier() {
    let project = Project::new();
    project.write("config/analyzers/foobar.json", "{}");
    project.write("components/analyzers/foobaranalyzer.tsx", "");

    let registry_repo = MockRegistryRepository::with(registry(&["foobaranalyzer"]));
    let compose_repo = MockComposeRepository::default();
    let runtime = RecordingRuntime::default();

    let result = DeleteUseCase::new(&registry_repo, &compose_repo, &runtime, project.options())
        .execute("Foo Bar")
        .unwrap();

    assert_eq!(result.analyzer, "foobaranalyzer");
    assert!(registry_repo.registry.borrow().is_empty());
    assert!(!exists(&project.path("config/analyzers/foobar.json")));
    assert!(!exists(&project.path("components/analyzers/foobaranalyzer.tsx")));
}

#[test]
fn result_serializes_steps_flat() {
    let mut result = DeleteResult::new("Foo", "fooanalyzer");
    result.record(CleanupStep::StopContainer, StepOutcome::done());
    result.record(
        CleanupStep::RemoveImage,
        StepOutcome::failed("no such image"),
    );

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Foo",
            "analyzer": "fooanalyzer",
            "steps": [
                {"step": "stop_container", "status": "done"},
                {"step": "remove_image", "status": "failed", "message": "no such image"}
            ]
        })
    );
}
