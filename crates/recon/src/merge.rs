//! Reductions from per-schema reports to one combined verdict.
//!
//! Properties are reduced by precedence ([`crate::rank`]), so the combined
//! necessity and response do not depend on report order. Statements and the
//! entity-level `general` checks are single-valued: they take the first
//! schema, in input order, that mentions them.

use std::collections::BTreeMap;

use crate::model::{
    CombinedGeneral, CombinedPropertyResult, CombinedStatementResult, PerSchemaPropertyResult,
    PropertyId, ResponseCode, SchemaId, SchemaReport, SchemaVerdict, StatementId,
};
use crate::rank::{necessity_rank, reduce_necessity, reduce_response, response_rank, MergeOptions};

/// Union every reported property, then reduce each one.
///
/// Schemas silent on a property contribute no `per_schema` entry. The stored
/// name is the last non-empty one in input order. A schema id seen twice
/// keeps its stronger result (see [`strength`]), whatever the order.
pub fn merge_schemas(
    reports: &[SchemaReport],
    options: &MergeOptions,
) -> BTreeMap<PropertyId, CombinedPropertyResult> {
    let mut union: BTreeMap<PropertyId, (String, BTreeMap<SchemaId, PerSchemaPropertyResult>)> =
        BTreeMap::new();

    for report in reports {
        for (property, result) in &report.properties {
            let entry = union
                .entry(property.clone())
                .or_insert_with(|| (String::new(), BTreeMap::new()));

            if !result.name.is_empty() {
                if !entry.0.is_empty() && entry.0 != result.name {
                    log::debug!(
                        "{property}: schema '{}' names it '{}', replacing '{}'",
                        report.schema,
                        result.name,
                        entry.0
                    );
                }
                entry.0 = result.name.clone();
            }

            let keep_existing = entry
                .1
                .get(&report.schema)
                .is_some_and(|kept| strength(kept, options) <= strength(result, options));
            if keep_existing {
                log::debug!(
                    "{property}: schema '{}' reported twice, keeping the stronger result",
                    report.schema
                );
            } else {
                entry.1.insert(report.schema.clone(), result.clone());
            }
        }
    }

    union
        .into_iter()
        .map(|(property, (name, per_schema))| {
            let combined_necessity = reduce_necessity(per_schema.values().map(|r| r.necessity));
            let combined_response = reduce_response(
                per_schema.values().filter_map(|r| r.response.as_ref()),
                options.allowed,
            );
            let combined = CombinedPropertyResult {
                name,
                per_schema,
                combined_necessity,
                combined_response,
            };
            (property, combined)
        })
        .collect()
}

/// Ordering key between two results filed under one schema id; smaller is
/// stronger. Response rank first, then necessity, then the raw text, so any
/// two distinct results compare unequal.
fn strength<'a>(
    result: &'a PerSchemaPropertyResult,
    options: &MergeOptions,
) -> (usize, usize, &'a str, &'a str) {
    let response = result.response.as_ref();
    (
        response
            .and_then(|code| response_rank(code, options.allowed))
            .unwrap_or(usize::MAX),
        necessity_rank(result.necessity),
        response.map_or("", |code| code.as_str()),
        result.name.as_str(),
    )
}

/// First schema with a verdict wins, per statement id.
pub fn merge_statements(reports: &[SchemaReport]) -> BTreeMap<StatementId, CombinedStatementResult> {
    let mut merged: BTreeMap<StatementId, CombinedStatementResult> = BTreeMap::new();

    for report in reports {
        for (id, statement) in &report.statements {
            let entry = merged.entry(id.clone()).or_default();
            if entry.property.is_none() {
                entry.property = statement.property.clone();
            }
            if entry.verdict.is_none() {
                entry.verdict = verdict(&report.schema, statement.response.as_ref());
            }
        }
    }

    merged
}

/// First schema with a verdict wins, per field.
pub fn merge_general(reports: &[SchemaReport]) -> CombinedGeneral {
    let language = reports
        .iter()
        .find_map(|r| verdict(&r.schema, r.general.language.as_ref()));
    let lexical_category = reports
        .iter()
        .find_map(|r| verdict(&r.schema, r.general.lexical_category.as_ref()));

    CombinedGeneral {
        language,
        lexical_category,
    }
}

fn verdict(schema: &str, response: Option<&ResponseCode>) -> Option<SchemaVerdict> {
    response.map(|response| SchemaVerdict {
        schema: schema.to_string(),
        response: response.clone(),
    })
}
