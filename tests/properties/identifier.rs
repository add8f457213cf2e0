//! Property tests for analyzer identifier derivation.

use proptest::prelude::*;

use regsync::domain::entities::{analyzer_id, compact_name, ANALYZER_SUFFIX};

proptest! {
    /// PROPERTY: identifiers are lowercase, whitespace-free, and end in the suffix.
    #[test]
    fn property_analyzer_id_shape(name in "[A-Za-z0-9 ]{0,24}") {
        let id = analyzer_id(&name);

        prop_assert!(id.ends_with(ANALYZER_SUFFIX));
        prop_assert!(!id.chars().any(char::is_whitespace));
        prop_assert_eq!(id.to_lowercase(), id.clone());
        prop_assert_eq!(id, format!("{}{}", compact_name(&name), ANALYZER_SUFFIX));
    }

    /// PROPERTY: spacing and case in the display name do not change the identifier.
    #[test]
    fn property_analyzer_id_ignores_spacing_and_case(name in "[a-z]{1,8}( [a-z]{1,8}){0,3}") {
        let squashed = name.replace(' ', "");
        prop_assert_eq!(analyzer_id(&name), analyzer_id(&squashed.to_uppercase()));
    }
}
