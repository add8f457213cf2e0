use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use regsync::application::{WatchOptions, WatchUseCase};

use super::output::EventPrinter;
use super::Project;

pub fn cmd_watch(project: &Project, reconcile_on_start: bool, json: bool) -> Result<()> {
    let options = WatchOptions::new(project.paths.registry.clone(), project.paths.compose.clone())
        .with_debounce(project.config.debounce())
        .with_reconcile_on_start(reconcile_on_start || project.config.watch.reconcile_on_start);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let printer = EventPrinter::new("watch", json);
    WatchUseCase::new(options, project.reconcile())
        .start(running, |event| printer.emit(&event))?;

    Ok(())
}
