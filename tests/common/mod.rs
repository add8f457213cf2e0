//! Common test utilities for regsync CLI tests.
//!
//! `TestProject` is an isolated project root whose `regsync.toml` replaces the
//! container tools with harmless commands, so no docker daemon is needed.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub const COMPOSE: &str = "services:
  gateway:
    build: ./gateway
  backend:
    build: ./backend
";

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Project with core services only, an empty registry, and `true` as every tool
    pub fn new() -> Self {
        let project = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        project.write("docker-compose.yml", COMPOSE);
        project.write("src/app/analyzers/registry.json", "{}\n");
        project.write_config(&["true"], "true");
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn write_config(&self, compose_command: &[&str], docker_command: &str) {
        let compose = compose_command
            .iter()
            .map(|part| format!("{:?}", part))
            .collect::<Vec<_>>()
            .join(", ");
        self.write(
            "regsync.toml",
            &format!(
                "[watch]\ndebounce_ms = 200\n\n[probe]\ntimeout_ms = 300\ninterval_ms = 50\n\n[runtime]\ncompose_command = [{}]\ndocker_command = {:?}\n",
                compose, docker_command
            ),
        );
    }

    /// Registry with one entry per display name
    pub fn register(&self, names: &[&str]) {
        let entries: serde_json::Map<String, serde_json::Value> = names
            .iter()
            .map(|name| {
                let id = format!("{}analyzer", name.replace(' ', "").to_lowercase());
                let entry = serde_json::json!({
                    "name": name,
                    "componentName": format!("{}Analyzer", name.replace(' ', "")),
                    "configPath": format!("config/analyzers/{}.json", id),
                });
                (id, entry)
            })
            .collect();
        self.write(
            "src/app/analyzers/registry.json",
            &serde_json::to_string_pretty(&entries).unwrap(),
        );
    }

    /// Complete analyzer source directory
    pub fn analyzer_source(&self, id: &str) {
        for file in ["Dockerfile", "main.py", "requirements.txt"] {
            self.write(&format!("src/app/analyticscode/{}/{}", id, file), "");
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_regsync"));
        cmd.current_dir(self.root())
            .env("XDG_CONFIG_HOME", self.path(".xdg"))
            .env("HOME", self.root())
            .env_remove("RUST_LOG")
            .env_remove("REGSYNC_DEBOUNCE_MS")
            .env_remove("REGSYNC_PROBE_TIMEOUT_MS")
            .env_remove("REGSYNC_COMPOSE_COMMAND")
            .env_remove("REGSYNC_DOCKER_COMMAND");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }

    pub fn compose_services(&self) -> Vec<String> {
        let value: serde_yaml_ng::Value =
            serde_yaml_ng::from_str(&self.read("docker-compose.yml")).unwrap();
        value["services"]
            .as_mapping()
            .map(|services| {
                services
                    .keys()
                    .filter_map(|key| key.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Parse NDJSON stdout into values
pub fn events(output: &Output) -> Vec<serde_json::Value> {
    stdout(output)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
