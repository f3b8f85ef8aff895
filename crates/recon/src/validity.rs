use regex::Regex;
use serde::Serialize;

use crate::model::SchemaId;

/// Reason prefix the validator uses when a predicate has no valid statement.
pub const NO_MATCHING_TRIPLES: &str = "No matching triples found for predicate";

const MAX_PROPERTY_LEN: usize = 100;

/// Overall shape-validation verdict of one schema check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Validity {
    Pass,
    Fail {
        reason: String,
        missing_properties: Vec<String>,
    },
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityStatus {
    Pass,
    Fail,
    Unknown,
}

impl Validity {
    pub fn from_result(result: bool, reason: &str) -> Self {
        if result {
            Self::Pass
        } else {
            Self::Fail {
                reason: reason.to_string(),
                missing_properties: missing_properties(reason),
            }
        }
    }

    pub fn status(&self) -> ValidityStatus {
        match self {
            Self::Pass => ValidityStatus::Pass,
            Self::Fail { .. } => ValidityStatus::Fail,
            Self::Unknown => ValidityStatus::Unknown,
        }
    }
}

/// Property ids named by a "no matching triples" failure, first occurrence
/// order, without duplicates.
pub fn missing_properties(reason: &str) -> Vec<String> {
    if !reason.contains(NO_MATCHING_TRIPLES) {
        return Vec::new();
    }
    let Ok(re) = Regex::new(r"P\d+") else {
        return Vec::new();
    };

    let mut found: Vec<String> = Vec::new();
    for m in re.find_iter(reason) {
        let id = truncate(m.as_str());
        if !found.contains(&id) {
            found.push(id);
        }
    }
    found
}

fn truncate(id: &str) -> String {
    if id.chars().count() > MAX_PROPERTY_LEN {
        let head: String = id.chars().take(MAX_PROPERTY_LEN).collect();
        format!("{head}…")
    } else {
        id.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaValidity {
    pub schema: SchemaId,
    #[serde(flatten)]
    pub validity: Validity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidityReport {
    pub combined: ValidityStatus,
    pub per_schema: Vec<SchemaValidity>,
}

/// Fails if any schema failed; passes if none failed and at least one passed.
pub fn combine(per_schema: Vec<SchemaValidity>) -> ValidityReport {
    let statuses: Vec<ValidityStatus> = per_schema.iter().map(|s| s.validity.status()).collect();
    let combined = if statuses.contains(&ValidityStatus::Fail) {
        ValidityStatus::Fail
    } else if statuses.contains(&ValidityStatus::Pass) {
        ValidityStatus::Pass
    } else {
        ValidityStatus::Unknown
    };
    ValidityReport {
        combined,
        per_schema,
    }
}
