//! Delete Use Case
//!
//! Removes one analyzer from the platform:
//! - Stopping and removing its container and image
//! - Dropping it from local storage, the compose manifest, and the registry
//! - Deleting its config files, source directory, and UI component
//! - Restarting the analyzers that remain

mod options;
mod result;
mod use_case;

#[cfg(test)]
mod tests;

pub use options::DeleteOptions;
pub use result::{CleanupStep, DeleteResult, StepOutcome, StepReport};
pub use use_case::DeleteUseCase;
