//! docker compose CLI runtime
//!
//! Implements the `ContainerRuntime` port by shelling out to `docker compose`
//! (or any compatible command line) and `docker`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::ports::{ContainerRuntime, RuntimeError};

pub const DEFAULT_COMPOSE_COMMAND: &[&str] = &["docker", "compose"];
pub const DEFAULT_DOCKER_COMMAND: &str = "docker";

/// Container runtime backed by external processes
#[derive(Debug, Clone)]
pub struct ComposeCli {
    compose_command: Vec<String>,
    docker_command: String,
    compose_file: PathBuf,
    working_dir: Option<PathBuf>,
}

impl ComposeCli {
    pub fn new(compose_file: impl Into<PathBuf>) -> Self {
        Self {
            compose_command: DEFAULT_COMPOSE_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
            docker_command: DEFAULT_DOCKER_COMMAND.to_string(),
            compose_file: compose_file.into(),
            working_dir: None,
        }
    }

    /// Replace the compose invocation (`["docker-compose"]`, `["podman", "compose"]`, ...)
    pub fn with_compose_command(mut self, command: Vec<String>) -> Self {
        if !command.is_empty() {
            self.compose_command = command;
        }
        self
    }

    pub fn with_docker_command(mut self, command: impl Into<String>) -> Self {
        self.docker_command = command.into();
        self
    }

    /// Directory the tools run in (the project root)
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn compose_file(&self) -> &Path {
        &self.compose_file
    }

    fn compose(&self, args: &[&str]) -> Result<String, RuntimeError> {
        let (program, prefix) = match self.compose_command.split_first() {
            Some((program, prefix)) => (program.as_str(), prefix),
            None => (DEFAULT_COMPOSE_COMMAND[0], &[][..]),
        };

        let file = self.compose_file.display().to_string();
        let mut full: Vec<&str> = prefix.iter().map(String::as_str).collect();
        full.push("-f");
        full.push(&file);
        full.extend_from_slice(args);

        self.run(program, &full)
    }

    fn docker(&self, args: &[&str]) -> Result<String, RuntimeError> {
        self.run(&self.docker_command, args)
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<String, RuntimeError> {
        let command_line = render_command(program, args);
        tracing::debug!(command = %command_line, "running container tool");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| RuntimeError::Spawn {
            command: command_line.clone(),
            message: e.to_string(),
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(RuntimeError::Failed {
                command: command_line,
                code: output.status.code(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            tracing::debug!(command = %command_line, %stderr, "tool stderr");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `docker rm -f` every container whose name matches the service
    fn remove_named_containers(&self, service: &str) -> Result<String, RuntimeError> {
        let filter = format!("name={}", service);
        let listed = self.docker(&["ps", "-aq", "-f", &filter])?;
        let ids = split_ids(&listed);
        if ids.is_empty() {
            return Ok(String::new());
        }

        let mut args = vec!["rm", "-f"];
        args.extend(ids.iter().map(String::as_str));
        self.docker(&args)
    }

    /// `docker rmi -f` every image whose reference contains `needle`
    fn remove_matching_images(&self, needle: &str) -> Result<String, RuntimeError> {
        let filter = format!("reference=*{}*", needle);
        let listed = self.docker(&["images", "-q", "--filter", &filter])?;
        let ids = split_ids(&listed);
        if ids.is_empty() {
            return Ok(String::new());
        }

        let mut args = vec!["rmi", "-f"];
        args.extend(ids.iter().map(String::as_str));
        self.docker(&args)
    }
}

impl ContainerRuntime for ComposeCli {
    fn start(&self, service: &str) -> Result<String, RuntimeError> {
        self.compose(&["up", "-d", "--build", service])
    }

    fn stop_and_remove(&self, service: &str) -> Result<String, RuntimeError> {
        let mut output = String::new();
        output.push_str(&self.stop(service)?);
        output.push_str(&self.remove_container(service)?);
        output.push_str(&self.remove_named_containers(service)?);
        output.push_str(&self.remove_matching_images(service)?);
        Ok(output)
    }

    fn stop(&self, service: &str) -> Result<String, RuntimeError> {
        self.compose(&["stop", service])
    }

    fn remove_container(&self, service: &str) -> Result<String, RuntimeError> {
        self.compose(&["rm", "-f", service])
    }

    fn remove_image(&self, service: &str) -> Result<String, RuntimeError> {
        self.remove_matching_images(&image_name_base(service))
    }

    fn list_services(&self) -> Result<Vec<String>, RuntimeError> {
        let listed = self.compose(&["ps", "--services"])?;
        Ok(listed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn up(&self, services: &[String]) -> Result<String, RuntimeError> {
        if services.is_empty() {
            return Ok(String::new());
        }
        let mut args = vec!["up", "-d"];
        args.extend(services.iter().map(String::as_str));
        self.compose(&args)
    }
}

/// Image names are matched on the alphanumeric part of the service name
pub fn image_name_base(service: &str) -> String {
    service.chars().filter(char::is_ascii_alphanumeric).collect()
}

fn split_ids(listed: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in listed.split_whitespace() {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

fn render_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
