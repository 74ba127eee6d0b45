//! Property-based tests for ganalytics-core.
//!
//! These tests verify invariants hold for arbitrary inputs using proptest.
//!
//! Run with: cargo test -p ganalytics-core --test `property_tests`

use ganalytics_core::{classify_metric, ReportEntry, Value, ValueMap};
use proptest::prelude::*;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,12}"
}

fn arb_dimension_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ._-]{0,16}"
}

// ============================================================================
// Numeric classification
// ============================================================================

proptest! {
    #[test]
    fn prop_digits_classify_as_integer(n in 0i64..i64::MAX) {
        prop_assert_eq!(classify_metric(&n.to_string()), Value::Integer(n));
    }

    #[test]
    fn prop_decimals_classify_as_float(whole in 0u32..1_000_000, frac in 0u32..10_000) {
        let raw = format!("{whole}.{frac}");
        let value = classify_metric(&raw);
        prop_assert!(matches!(value, Value::Float(_)), "{} classified as {:?}", raw, value);
    }

    #[test]
    fn prop_scientific_classifies_as_float(mantissa in 1u32..100, exp in 0u32..20) {
        let raw = format!("{mantissa}E{exp}");
        prop_assert!(matches!(classify_metric(&raw), Value::Float(_)));
    }

    #[test]
    fn prop_classification_is_deterministic(raw in "[0-9.E+-]{0,12}") {
        prop_assert_eq!(classify_metric(&raw), classify_metric(&raw));
    }
}

// ============================================================================
// Report entries
// ============================================================================

proptest! {
    #[test]
    fn prop_display_is_dimensions_in_insertion_order(
        dims in prop::collection::vec((arb_name(), arb_dimension_value()), 1..6)
    ) {
        let mut dimensions = ValueMap::new();
        let mut expected: Vec<(String, String)> = Vec::new();
        for (name, value) in &dims {
            dimensions.insert(name.clone(), value.clone());
            match expected.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.clone(),
                None => expected.push((name.clone(), value.clone())),
            }
        }

        let entry = ReportEntry::new(ValueMap::new(), dimensions);
        let joined: Vec<&str> = expected.iter().map(|(_, v)| v.as_str()).collect();
        prop_assert_eq!(entry.to_string(), joined.join(" "));
    }

    #[test]
    fn prop_names_live_in_one_partition(
        metric_names in prop::collection::vec(arb_name(), 0..5),
        dimension_names in prop::collection::vec(arb_name(), 0..5),
    ) {
        let metrics: ValueMap = metric_names.iter().map(|n| (n.clone(), Value::Integer(1))).collect();
        let dimensions: ValueMap = dimension_names.iter().map(|n| (n.clone(), "x")).collect();
        let entry = ReportEntry::new(metrics, dimensions);

        for name in entry.dimensions().keys() {
            prop_assert!(!entry.metrics().contains_key(name));
        }
    }
}
