use anyhow::{bail, Result};
use dialoguer::Confirm;
use is_terminal::IsTerminal;

use regsync::application::{DeleteResult, StepOutcome};
use regsync::domain::entities::analyzer_id;

use super::Project;

pub fn cmd_delete(project: &Project, name: &str, yes: bool, json: bool) -> Result<()> {
    let id = analyzer_id(name);

    if !yes && std::io::stdin().is_terminal() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete analyzer '{}' ({}) with its container, files, and registry entry?",
                name, id
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let result = project.delete().execute(name)?;

    if json {
        let mut value = serde_json::to_value(&result)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("delete"));
            obj.insert("success".to_string(), serde_json::json!(result.is_success()));
        }
        println!("{}", serde_json::to_string(&value)?);
    } else {
        print!("{}", render_result(&result));
    }

    if !result.is_success() {
        bail!("failed to delete analyzer '{}'", name);
    }
    Ok(())
}

fn render_result(result: &DeleteResult) -> String {
    let mut out = format!("Deleting {} ({})\n", result.name, result.analyzer);
    for report in &result.steps {
        let (status, note) = match &report.outcome {
            StepOutcome::Done { detail } => ("done", detail.clone()),
            StepOutcome::Skipped { reason } => ("skipped", Some(reason.clone())),
            StepOutcome::Failed { message } => ("FAILED", Some(message.clone())),
        };
        match note {
            Some(note) => out.push_str(&format!("  {:<8} {} ({})\n", status, report.step, note)),
            None => out.push_str(&format!("  {:<8} {}\n", status, report.step)),
        }
    }
    out
}
