//! Property tests for compose manifest edits.

use proptest::prelude::*;

use regsync::domain::entities::{analyzer_service, ComposeDocument, ServiceTemplate};

fn analyzer_ids() -> impl Strategy<Value = Vec<String>> {
    let id = proptest::string::string_regex("[a-z]{1,8}analyzer").unwrap();
    proptest::collection::btree_set(id, 0..6).prop_map(|ids| ids.into_iter().collect())
}

fn manifest() -> ComposeDocument {
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(
        "version: '3.8'\nservices:\n  gateway:\n    build: ./gateway\n  backend:\n    build: ./backend\n",
    )
    .unwrap();
    ComposeDocument::from_value(value).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: adding then removing analyzers restores the original manifest.
    #[test]
    fn property_add_then_remove_restores_manifest(ids in analyzer_ids()) {
        let template = ServiceTemplate::default();
        let original = manifest();
        let mut doc = original.clone();

        for id in &ids {
            doc.add_service(id, &analyzer_service(id, &template)).unwrap();
        }
        prop_assert_eq!(doc.service_names().len(), 2 + ids.len());

        for id in &ids {
            prop_assert!(doc.remove_service(id));
            // removing twice is a no-op
            prop_assert!(!doc.remove_service(id));
        }
        prop_assert_eq!(doc, original);
    }

    /// PROPERTY: the generated service depends only on the identifier.
    #[test]
    fn property_analyzer_service_is_deterministic(
        id in proptest::string::string_regex("[a-z]{1,12}analyzer").unwrap()
    ) {
        let template = ServiceTemplate::default();
        let first = analyzer_service(&id, &template);
        let second = analyzer_service(&id, &template);
        prop_assert_eq!(&first, &second);

        let service_name = format!("SERVICE_NAME={}", id);
        prop_assert!(first.build.context.ends_with(&id));
        prop_assert!(first.environment.contains(&service_name));
    }
}
