use std::collections::BTreeMap;

use crate::model::{CheckSummary, ClassifiedProperty};
use crate::validity::{ValidityReport, ValidityStatus};

/// Compute summary statistics from classified properties.
pub fn compute_summary(properties: &[ClassifiedProperty], validity: &ValidityReport) -> CheckSummary {
    let mut bucket_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut unchecked = 0;
    let mut suppressed = 0;
    let mut failures = 0;

    for p in properties {
        let c = &p.classification;
        *bucket_counts.entry(c.bucket.to_string()).or_insert(0) += 1;
        *category_counts.entry(c.category.to_string()).or_insert(0) += 1;

        if c.is_unchecked() {
            unchecked += 1;
        }
        if c.is_suppressed() {
            suppressed += 1;
        }
        if c.is_failure() {
            failures += 1;
        }
    }

    CheckSummary {
        total_properties: properties.len(),
        bucket_counts,
        category_counts,
        unchecked,
        suppressed,
        failures,
        passed: failures == 0 && validity.combined != ValidityStatus::Fail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_verdict;
    use crate::model::{Necessity, ResponseCode};
    use crate::validity::combine;

    fn property(id: &str, necessity: Necessity, response: Option<ResponseCode>) -> ClassifiedProperty {
        ClassifiedProperty {
            id: id.into(),
            name: String::new(),
            necessity,
            classification: classify_verdict(necessity, response.as_ref()),
            response,
            badges: Vec::new(),
        }
    }

    #[test]
    fn summary_counts() {
        let properties = vec![
            property("P31", Necessity::Required, Some(ResponseCode::Correct)),
            property("P21", Necessity::Required, Some(ResponseCode::Missing)),
            property("P569", Necessity::Optional, Some(ResponseCode::Missing)),
            property("P18", Necessity::Absent, Some(ResponseCode::TooManyStatements)),
            property("P373", Necessity::Absent, None),
            property("P40", Necessity::Absent, Some(ResponseCode::Missing)),
        ];
        let summary = compute_summary(&properties, &combine(vec![]));
        assert_eq!(summary.total_properties, 6);
        assert_eq!(summary.bucket_counts["required"], 2);
        assert_eq!(summary.bucket_counts["optional"], 1);
        assert_eq!(summary.bucket_counts["other"], 3);
        assert_eq!(summary.category_counts["missing"], 3);
        assert_eq!(summary.category_counts["not_in_schema"], 1);
        assert_eq!(summary.unchecked, 1);
        assert_eq!(summary.suppressed, 1);
        assert_eq!(summary.failures, 2);
        assert!(!summary.passed);
    }

    #[test]
    fn clean_run_passes() {
        let properties = vec![
            property("P31", Necessity::Required, Some(ResponseCode::Correct)),
            property("P735", Necessity::Optional, Some(ResponseCode::Allowed)),
        ];
        let summary = compute_summary(&properties, &combine(vec![]));
        assert_eq!(summary.failures, 0);
        assert!(summary.passed);
    }
}
