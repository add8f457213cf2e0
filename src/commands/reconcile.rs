use anyhow::{Context, Result};

use super::output::EventPrinter;
use super::Project;

/// One pass; the process fails only when the pass is aborted
pub fn cmd_reconcile(project: &Project, json: bool) -> Result<()> {
    let printer = EventPrinter::new("reconcile", json);
    let result = project
        .reconcile()
        .run_pass(&|event| printer.emit(&event))
        .context("reconciliation pass aborted")?;

    tracing::info!(
        removed = result.removed.len(),
        started = result.started.len(),
        skipped = result.skipped.len(),
        failed = result.failed.len(),
        "pass finished"
    );
    Ok(())
}
