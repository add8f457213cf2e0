//! Property tests for reconciliation planning.

use std::collections::BTreeSet;

use proptest::prelude::*;

use regsync::domain::entities::CORE_SERVICES;
use regsync::plan;

fn service_ids() -> impl Strategy<Value = BTreeSet<String>> {
    let id = prop_oneof![
        proptest::string::string_regex("[a-z]{1,8}analyzer").unwrap(),
        Just("gateway".to_string()),
        Just("backend".to_string()),
    ];
    proptest::collection::btree_set(id, 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: additions and removals never overlap and never name a core service.
    #[test]
    fn property_plan_is_disjoint_and_skips_core(
        registry in service_ids(),
        compose in service_ids(),
    ) {
        let plan = plan(
            registry.iter().map(String::as_str),
            compose.iter().map(String::as_str),
            CORE_SERVICES,
        );

        for id in &plan.to_add {
            prop_assert!(!plan.to_remove.contains(id), "{id} planned both ways");
            prop_assert!(!CORE_SERVICES.contains(&id.as_str()));
            prop_assert!(registry.contains(id) && !compose.contains(id));
        }
        for id in &plan.to_remove {
            prop_assert!(!CORE_SERVICES.contains(&id.as_str()));
            prop_assert!(compose.contains(id) && !registry.contains(id));
        }
    }

    /// PROPERTY: applying a plan to the compose side yields an empty plan.
    #[test]
    fn property_applied_plan_converges(
        registry in service_ids(),
        compose in service_ids(),
    ) {
        let first = plan(
            registry.iter().map(String::as_str),
            compose.iter().map(String::as_str),
            CORE_SERVICES,
        );

        let mut applied = compose.clone();
        for id in &first.to_remove {
            applied.remove(id);
        }
        applied.extend(first.to_add.iter().cloned());

        let second = plan(
            registry.iter().map(String::as_str),
            applied.iter().map(String::as_str),
            CORE_SERVICES,
        );
        prop_assert!(second.is_empty(), "not converged: {:?}", second);

        // Core services present before are still present
        for core in CORE_SERVICES {
            prop_assert_eq!(compose.contains(*core), applied.contains(*core));
        }
    }
}
