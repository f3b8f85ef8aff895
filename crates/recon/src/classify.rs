use std::collections::BTreeMap;

use crate::model::{
    Classification, ClassificationBucket, ClassifiedProperty, ClassifiedView,
    CombinedPropertyResult, DisplayCategory, Necessity, PropertyId, ResponseCode, SchemaBadge,
};

/// Label for a property disallowed by every schema that still has statements.
pub const NOT_ALLOWED_LABEL: &str = "not allowed";
/// Label for a property no schema gave a verdict on.
pub const NOT_IN_SCHEMA_LABEL: &str = "Not in schema";

/// Bucket and badge for a merged property.
pub fn classify(combined: &CombinedPropertyResult) -> Classification {
    classify_verdict(combined.combined_necessity, combined.combined_response.as_ref())
}

/// Same mapping for any necessity/response pair, merged or per-schema.
pub fn classify_verdict(necessity: Necessity, response: Option<&ResponseCode>) -> Classification {
    Classification {
        bucket: bucket_for(necessity),
        category: category_for(response),
        label: label_for(necessity, response),
    }
}

pub fn bucket_for(necessity: Necessity) -> ClassificationBucket {
    match necessity {
        Necessity::Required => ClassificationBucket::Required,
        Necessity::Optional => ClassificationBucket::Optional,
        Necessity::Absent => ClassificationBucket::Other,
    }
}

pub fn category_for(response: Option<&ResponseCode>) -> DisplayCategory {
    match response {
        None => DisplayCategory::NotInSchema,
        Some(ResponseCode::Present | ResponseCode::Allowed) => DisplayCategory::Present,
        Some(ResponseCode::Correct) => DisplayCategory::Correct,
        Some(ResponseCode::Missing) => DisplayCategory::Missing,
        Some(_) => DisplayCategory::Wrong,
    }
}

/// Badge text. The raw reduced response is left untouched; only the label
/// turns "too many statements" on a disallowed property into "not allowed".
pub fn label_for(necessity: Necessity, response: Option<&ResponseCode>) -> String {
    match (necessity, response) {
        (_, None) => NOT_IN_SCHEMA_LABEL.to_string(),
        (Necessity::Absent, Some(ResponseCode::TooManyStatements)) => NOT_ALLOWED_LABEL.to_string(),
        (_, Some(code)) => code.as_str().to_string(),
    }
}

/// Listing order for property ids: letter prefix, then the number, so
/// `P21` comes before `P106`. Ids without a number sort by text.
pub fn property_order(id: &str) -> (&str, Option<u64>, &str) {
    let split = id.find(|c: char| c.is_ascii_digit()).unwrap_or(id.len());
    let (prefix, digits) = id.split_at(split);
    (prefix, digits.parse().ok(), id)
}

/// Classify every merged property, with a badge per contributing schema,
/// in [`property_order`].
pub fn classify_all(
    merged: &BTreeMap<PropertyId, CombinedPropertyResult>,
) -> Vec<ClassifiedProperty> {
    let mut classified: Vec<ClassifiedProperty> = merged
        .iter()
        .map(|(id, combined)| {
            let badges = combined
                .per_schema
                .iter()
                .map(|(schema, result)| {
                    let own = classify_verdict(result.necessity, result.response.as_ref());
                    SchemaBadge {
                        schema: schema.clone(),
                        category: own.category,
                        label: own.label,
                    }
                })
                .collect();

            ClassifiedProperty {
                id: id.clone(),
                name: combined.name.clone(),
                necessity: combined.combined_necessity,
                response: combined.combined_response.clone(),
                classification: classify(combined),
                badges,
            }
        })
        .collect();

    classified.sort_by(|a, b| property_order(&a.id).cmp(&property_order(&b.id)));
    classified
}

/// Split into the three listing columns plus the "not checked" group.
/// Suppressed entries are dropped.
pub fn partition(properties: Vec<ClassifiedProperty>) -> ClassifiedView {
    let mut view = ClassifiedView::default();

    for property in properties {
        let c = &property.classification;
        if c.is_suppressed() {
            continue;
        }
        if c.is_unchecked() {
            view.unchecked.push(property);
            continue;
        }
        match c.bucket {
            ClassificationBucket::Required => view.required.push(property),
            ClassificationBucket::Optional => view.optional.push(property),
            ClassificationBucket::Other => view.other.push(property),
        }
    }

    view
}
