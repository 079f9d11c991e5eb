//! Property tests for normalization, scoring and linking

mod common;

use common::create_test_contextifier;
use contextifyer_core::text::{normalize, ratio};
use contextifyer_core::MatchResult;
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "[a-zA-Z0-9 ,.;:!?'_\\-\t\n]{0,60}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_has_no_padding(text in "\\PC{0,40}") {
        let normalized = normalize(&text);
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
    }

    #[test]
    fn ratio_is_bounded_and_symmetric(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let ab = ratio(&a, &b);
        prop_assert!((0.0..=100.0).contains(&ab));
        prop_assert!((ab - ratio(&b, &a)).abs() < 1e-9);
        prop_assert_eq!(ratio(&a, &a), 100.0);
    }

    #[test]
    fn candidates_with_digits_never_match(prefix in "[a-z]{0,6}", digit in "[0-9]", suffix in "[a-z]{0,6}") {
        let candidate = format!("{}{}{}", prefix, digit, suffix);
        let contextifier = create_test_contextifier(&[(candidate.as_str(), "urn:x"), ("module", "urn:m")]);
        prop_assert_eq!(contextifier.match_text(&candidate), MatchResult::NoMatch);
    }

    #[test]
    fn labels_present_verbatim_are_linked(label in "[a-z]{2,10}( [a-z]{2,10}){0,2}") {
        let contextifier = create_test_contextifier(&[(label.as_str(), "urn:x")]);
        let defaults = contextifier.matcher_config().clone();
        prop_assume!(!label.split(' ').all(|w| defaults.stopwords.contains(w)));

        let shouted = label.to_uppercase();
        prop_assert_eq!(contextifier.transform(&shouted), format!("[{}](urn:x)", shouted));
    }

    #[test]
    fn transform_is_deterministic(text in "[a-zA-Z .,]{0,80}") {
        let contextifier = create_test_contextifier(common::MATERIAL_LABELS);
        prop_assert_eq!(contextifier.transform(&text), contextifier.transform(&text));
    }

    #[test]
    fn empty_index_only_collapses_whitespace(text in "[a-zA-Z0-9 \t\n.,]{0,80}") {
        let contextifier = create_test_contextifier(&[]);
        let expected = text.split_whitespace().collect::<Vec<_>>().join(" ");
        prop_assert_eq!(contextifier.transform(&text), expected);
    }
}
