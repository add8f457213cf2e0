//! ContainerRuntime port
//!
//! Container lifecycle operations for compose services. Every call blocks until
//! the underlying tool exits and returns its stdout.

pub trait ContainerRuntime {
    /// Build and start one service in the background
    fn start(&self, service: &str) -> Result<String, RuntimeError>;

    /// Stop the service, remove its containers, then remove its images.
    ///
    /// The first failing step aborts the chain.
    fn stop_and_remove(&self, service: &str) -> Result<String, RuntimeError>;

    fn stop(&self, service: &str) -> Result<String, RuntimeError>;

    fn remove_container(&self, service: &str) -> Result<String, RuntimeError>;

    /// Force-remove images whose reference contains the service name
    fn remove_image(&self, service: &str) -> Result<String, RuntimeError>;

    /// Services known to the compose project
    fn list_services(&self) -> Result<Vec<String>, RuntimeError>;

    /// Start (without rebuilding) the given services
    fn up(&self, services: &[String]) -> Result<String, RuntimeError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("failed to run `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("`{command}` exited with {}: {stderr}", exit_label(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
