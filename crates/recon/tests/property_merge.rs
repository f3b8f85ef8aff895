// Property-based tests for schema reconciliation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::BTreeSet;

use proptest::prelude::*;
use entitycheck_recon::classify::classify;
use entitycheck_recon::model::{Necessity, PerSchemaPropertyResult, ResponseCode, SchemaReport};
use entitycheck_recon::{merge_schemas, AllowedPolicy, MergeOptions};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_necessity() -> impl Strategy<Value = Necessity> {
    prop_oneof![
        Just(Necessity::Required),
        Just(Necessity::Optional),
        Just(Necessity::Absent),
    ]
}

/// Mostly known codes, sometimes the absent marker or an unknown code.
fn arb_response() -> impl Strategy<Value = Option<ResponseCode>> {
    prop_oneof![
        6 => prop_oneof![
            Just(ResponseCode::Present),
            Just(ResponseCode::Correct),
            Just(ResponseCode::Missing),
            Just(ResponseCode::Incorrect),
            Just(ResponseCode::TooManyStatements),
            Just(ResponseCode::NotEnoughStatements),
            Just(ResponseCode::Allowed),
        ].prop_map(Some),
        2 => Just(None),
        1 => Just(Some(ResponseCode::Other("error".to_string()))),
    ]
}

fn arb_result() -> impl Strategy<Value = PerSchemaPropertyResult> {
    (arb_necessity(), arb_response()).prop_map(|(necessity, response)| PerSchemaPropertyResult {
        name: "label".to_string(),
        necessity,
        response,
    })
}

/// Up to five schemas with distinct ids, each reporting a subset of P1..P8.
fn arb_reports() -> impl Strategy<Value = Vec<SchemaReport>> {
    prop::collection::vec(
        prop::collection::btree_map(r"P[1-8]", arb_result(), 0..6),
        0..5,
    )
    .prop_map(|maps| {
        maps.into_iter()
            .enumerate()
            .map(|(i, properties)| SchemaReport {
                schema: format!("E{}", i + 1),
                properties,
                ..SchemaReport::default()
            })
            .collect()
    })
}

/// Like [`arb_reports`], but schema ids repeat (E1, E2, E1, ...).
fn arb_colliding_reports() -> impl Strategy<Value = Vec<SchemaReport>> {
    arb_reports().prop_map(|reports| {
        reports
            .into_iter()
            .enumerate()
            .map(|(i, report)| SchemaReport {
                schema: format!("E{}", i % 2 + 1),
                ..report
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = AllowedPolicy> {
    prop_oneof![Just(AllowedPolicy::FoldIntoPresent), Just(AllowedPolicy::Distinct)]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    /// Reversing or rotating the report order never changes a combined verdict.
    #[test]
    fn merge_is_order_independent(reports in arb_reports(), policy in arb_policy(), rotate in 0usize..5) {
        let options = MergeOptions { allowed: policy };
        let forward = merge_schemas(&reports, &options);

        let mut reversed = reports.clone();
        reversed.reverse();
        let mut rotated = reports.clone();
        if !rotated.is_empty() {
            let n = rotate % rotated.len();
            rotated.rotate_left(n);
        }

        for permuted in [reversed, rotated] {
            let other = merge_schemas(&permuted, &options);
            prop_assert_eq!(forward.len(), other.len());
            for (id, combined) in &forward {
                let o = &other[id];
                prop_assert_eq!(combined.combined_necessity, o.combined_necessity);
                prop_assert_eq!(&combined.combined_response, &o.combined_response);
                prop_assert_eq!(classify(combined), classify(o));
            }
        }
    }

    /// A schema id reported twice still merges the same way in any order.
    #[test]
    fn repeated_schema_ids_are_order_independent(reports in arb_colliding_reports(), policy in arb_policy()) {
        let options = MergeOptions { allowed: policy };
        let forward = merge_schemas(&reports, &options);

        let mut reversed = reports.clone();
        reversed.reverse();
        let backward = merge_schemas(&reversed, &options);

        prop_assert_eq!(forward.len(), backward.len());
        for (id, combined) in &forward {
            let other = &backward[id];
            prop_assert_eq!(&combined.per_schema, &other.per_schema);
            prop_assert_eq!(combined.combined_necessity, other.combined_necessity);
            prop_assert_eq!(&combined.combined_response, &other.combined_response);
        }
    }

    /// Output keys are exactly the union of reported keys, and each entry
    /// has one per-schema result per schema that mentioned it.
    #[test]
    fn output_is_the_union(reports in arb_reports()) {
        let merged = merge_schemas(&reports, &MergeOptions::default());

        let expected: BTreeSet<&String> = reports.iter().flat_map(|r| r.properties.keys()).collect();
        let actual: BTreeSet<&String> = merged.keys().collect();
        prop_assert_eq!(expected, actual);

        for (id, combined) in &merged {
            let mentioned = reports.iter().filter(|r| r.properties.contains_key(id)).count();
            prop_assert_eq!(combined.per_schema.len(), mentioned);
        }
    }

    /// A failing verdict from any schema is never hidden by a passing one.
    #[test]
    fn failure_dominates(reports in arb_reports()) {
        let merged = merge_schemas(&reports, &MergeOptions::default());
        for combined in merged.values() {
            let any_failure = combined.per_schema.values().any(|r| matches!(
                r.response,
                Some(ResponseCode::Incorrect
                    | ResponseCode::Missing
                    | ResponseCode::TooManyStatements
                    | ResponseCode::NotEnoughStatements)
            ));
            let passes = matches!(
                combined.combined_response,
                Some(ResponseCode::Correct | ResponseCode::Present | ResponseCode::Allowed)
            );
            prop_assert!(!(any_failure && passes));
        }
    }

    /// Any required schema makes the property required.
    #[test]
    fn required_dominates(reports in arb_reports()) {
        let merged = merge_schemas(&reports, &MergeOptions::default());
        for combined in merged.values() {
            let any_required = combined.per_schema.values().any(|r| r.necessity == Necessity::Required);
            prop_assert_eq!(any_required, combined.combined_necessity == Necessity::Required);
        }
    }
}
