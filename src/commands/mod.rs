//! Command handlers

pub mod delete;
pub mod output;
pub mod plan;
pub mod project;
pub mod reconcile;
pub mod watch;

pub use project::Project;
