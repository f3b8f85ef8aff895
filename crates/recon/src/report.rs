//! Validator JSON → [`SchemaReport`].
//!
//! Only the document itself has to be well formed. Inside it every field is
//! optional and a field of the wrong type reads as if it were absent.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ReconError;
use crate::model::{
    GeneralResult, Necessity, PerSchemaPropertyResult, ResponseCode, SchemaReport, StatementResult,
};
use crate::validity::Validity;

/// Parse a single-schema validator response.
///
/// `source` labels errors and stands in for the schema id when the report
/// has none.
pub fn parse_report(source: &str, input: &str) -> Result<SchemaReport, ReconError> {
    let root = parse_object(source, input)?;
    check_error(source, &root)?;

    Ok(report_from_parts(
        source,
        root.get("schema"),
        root.get("name"),
        root.get("properties"),
        root.get("statements"),
        root.get("general"),
        root.get("validity"),
    ))
}

/// Parse a multi-schema validator response, where every field is a list in
/// schema order. Returns one report per listed schema, in that order.
pub fn parse_batch(source: &str, input: &str) -> Result<Vec<SchemaReport>, ReconError> {
    let root = parse_object(source, input)?;
    check_error(source, &root)?;

    let schemas = match root.get("schema") {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect(),
        _ => Vec::new(),
    };

    let reports = schemas
        .iter()
        .enumerate()
        .map(|(i, schema)| {
            let label = format!("{source}#{i}");
            report_from_parts(
                &label,
                Some(schema),
                nth(&root, "name", i),
                nth(&root, "properties", i),
                nth(&root, "statements", i),
                nth(&root, "general", i),
                nth(&root, "validity", i),
            )
        })
        .collect();

    Ok(reports)
}

fn parse_object(source: &str, input: &str) -> Result<Map<String, Value>, ReconError> {
    let value: Value = serde_json::from_str(input).map_err(|e| ReconError::ReportParse {
        source: source.to_string(),
        message: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ReconError::ReportParse {
            source: source.to_string(),
            message: "expected a JSON object".into(),
        }),
    }
}

fn check_error(source: &str, root: &Map<String, Value>) -> Result<(), ReconError> {
    match text(root.get("error")) {
        Some(message) => Err(ReconError::Validator {
            source: source.to_string(),
            message,
        }),
        None => Ok(()),
    }
}

fn nth<'a>(root: &'a Map<String, Value>, key: &str, index: usize) -> Option<&'a Value> {
    match root.get(key) {
        Some(Value::Array(items)) => items.get(index),
        _ => None,
    }
}

/// Non-blank string value.
fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn response(value: Option<&Value>) -> Option<ResponseCode> {
    value.and_then(Value::as_str).and_then(ResponseCode::from_wire)
}

fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

fn report_from_parts(
    source: &str,
    schema: Option<&Value>,
    name: Option<&Value>,
    properties: Option<&Value>,
    statements: Option<&Value>,
    general: Option<&Value>,
    validity: Option<&Value>,
) -> SchemaReport {
    // Schema ids are case-insensitive, as in config overrides.
    let schema = match text(schema) {
        Some(id) => id.to_uppercase(),
        None => {
            log::debug!("report '{source}' names no schema, using its source label");
            source.to_string()
        }
    };

    SchemaReport {
        name: text(name).unwrap_or_default(),
        properties: parse_properties(&schema, properties),
        statements: parse_statements(statements),
        general: parse_general(general),
        validity: parse_validity(validity),
        schema,
    }
}

fn parse_properties(schema: &str, value: Option<&Value>) -> BTreeMap<String, PerSchemaPropertyResult> {
    let Some(entries) = object(value) else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .map(|(id, entry)| {
            if !entry.is_object() {
                log::debug!("{schema}: property {id} is not an object, reading it as unset");
            }
            let result = PerSchemaPropertyResult {
                name: text(entry.get("name")).unwrap_or_default(),
                necessity: Necessity::from_wire(entry.get("necessity").and_then(Value::as_str)),
                response: response(entry.get("response")),
            };
            (id.clone(), result)
        })
        .collect()
}

fn parse_statements(value: Option<&Value>) -> BTreeMap<String, StatementResult> {
    let Some(entries) = object(value) else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .map(|(id, entry)| {
            let result = StatementResult {
                property: text(entry.get("property")),
                response: response(entry.get("response")),
            };
            (id.clone(), result)
        })
        .collect()
}

fn parse_general(value: Option<&Value>) -> GeneralResult {
    let Some(fields) = object(value) else {
        return GeneralResult::default();
    };
    GeneralResult {
        language: response(fields.get("language")),
        lexical_category: response(
            fields
                .get("lexicalCategory")
                .or_else(|| fields.get("lexical_category")),
        ),
    }
}

/// Only the first result counts; the validator checks one focus node.
fn parse_validity(value: Option<&Value>) -> Validity {
    let first = object(value)
        .and_then(|v| v.get("results"))
        .and_then(Value::as_array)
        .and_then(|results| results.first());

    match first {
        Some(result) => {
            let passed = result.get("result").and_then(Value::as_bool).unwrap_or(false);
            let reason = result.get("reason").and_then(Value::as_str).unwrap_or("");
            Validity::from_result(passed, reason)
        }
        None => Validity::Unknown,
    }
}
