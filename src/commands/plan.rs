use anyhow::{Context, Result};

use regsync::domain::services::ReconcilePlan;

use super::Project;

pub fn cmd_plan(project: &Project, json: bool) -> Result<()> {
    let plan = project
        .reconcile()
        .plan()
        .context("failed to compute plan")?;

    if json {
        let mut value = serde_json::to_value(&plan)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("plan"));
        }
        println!("{}", serde_json::to_string(&value)?);
    } else {
        print!("{}", render_plan(&plan));
    }
    Ok(())
}

fn render_plan(plan: &ReconcilePlan) -> String {
    if plan.is_empty() {
        return "Registry and compose are in sync.\n".to_string();
    }

    let mut out = String::new();
    for service in &plan.to_remove {
        out.push_str(&format!("- {}\n", service));
    }
    for service in &plan.to_add {
        out.push_str(&format!("+ {}\n", service));
    }
    out.push_str(&format!(
        "{} to add, {} to remove\n",
        plan.to_add.len(),
        plan.to_remove.len()
    ));
    out
}
