//! Reconciliation planning service
//!
//! Pure set-difference between the registry (desired) and the compose manifest
//! (observed). No I/O; the caller executes the plan.

use std::collections::BTreeSet;

use serde::Serialize;

/// Services to tear down and services to bring up in one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcilePlan {
    /// Registry identifiers without a compose service (sorted)
    pub to_add: Vec<String>,
    /// Non-core compose services without a registry entry (sorted)
    pub to_remove: Vec<String>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute the plan. Core identifiers are never added or removed.
pub fn plan<'a, R, C>(registry_ids: R, compose_ids: C, core_ids: &[&str]) -> ReconcilePlan
where
    R: IntoIterator<Item = &'a str>,
    C: IntoIterator<Item = &'a str>,
{
    let is_core = |id: &&str| core_ids.contains(id);

    let registered: BTreeSet<&str> = registry_ids
        .into_iter()
        .filter(|id| !is_core(id))
        .collect();
    let running: BTreeSet<&str> = compose_ids
        .into_iter()
        .filter(|id| !is_core(id))
        .collect();

    ReconcilePlan {
        to_add: registered
            .difference(&running)
            .map(|id| id.to_string())
            .collect(),
        to_remove: running
            .difference(&registered)
            .map(|id| id.to_string())
            .collect(),
    }
}
