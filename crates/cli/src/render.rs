//! Plain-text listing of a check result, in the three-column order the
//! entity page shows: required, optional, other, then the unchecked group.

use std::fmt::Write;

use entitycheck_recon::model::{ClassifiedProperty, SchemaVerdict};
use entitycheck_recon::validity::{Validity, ValidityStatus};
use entitycheck_recon::CheckResult;

pub fn render_listing(result: &CheckResult) -> String {
    let mut out = String::new();

    let _ = write!(out, "Checking against {}:", result.meta.schemas.join(", "));
    match result.validity.combined {
        ValidityStatus::Pass => out.push_str(" ✔ Pass"),
        ValidityStatus::Fail => {
            out.push_str(" ✘ Fail");
            for schema in &result.validity.per_schema {
                if let Validity::Fail { missing_properties, .. } = &schema.validity {
                    for property in missing_properties {
                        let _ = write!(out, " [{}: missing valid {property}]", schema.schema);
                    }
                }
            }
        }
        ValidityStatus::Unknown => {}
    }
    out.push('\n');

    section(&mut out, "Required properties", &result.properties.required);
    section(&mut out, "Optional properties", &result.properties.optional);
    section(&mut out, "Other properties", &result.properties.other);

    if !result.properties.unchecked.is_empty() {
        out.push_str("\nNot checked by any selected schema\n");
        for p in &result.properties.unchecked {
            let _ = writeln!(out, "  {} - {}", p.id, p.name);
        }
    }

    if !result.statements.is_empty() {
        out.push_str("\nStatements\n");
        for (id, verdict) in &result.statements {
            let _ = writeln!(out, "  {id}  {}", badge(verdict));
        }
    }

    let general = [
        ("language", result.general.language.as_ref()),
        ("lexical category", result.general.lexical_category.as_ref()),
    ];
    if general.iter().any(|(_, v)| v.is_some()) {
        out.push_str("\nGeneral\n");
        for (field, verdict) in general {
            if let Some(verdict) = verdict {
                let _ = writeln!(out, "  {field}  {}", badge(verdict));
            }
        }
    }

    out
}

fn section(out: &mut String, title: &str, properties: &[ClassifiedProperty]) {
    let _ = writeln!(out, "\n{title}");
    if properties.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    for p in properties {
        let _ = write!(out, "  [{}] {} - {}", p.classification.label, p.id, p.name);
        for b in &p.badges {
            let _ = write!(out, "  {}: {}", b.schema, b.label);
        }
        out.push('\n');
    }
}

fn badge(verdict: &SchemaVerdict) -> String {
    format!("{}: {}", verdict.schema, verdict.response)
}

/// One-line summary for stderr.
pub fn summary_line(result: &CheckResult) -> String {
    let s = &result.summary;
    let count = |key: &str| s.bucket_counts.get(key).copied().unwrap_or(0);
    format!(
        "{} schema(s), {} properties — {} required, {} optional, {} other, {} unchecked; {} failure(s)",
        result.meta.schemas.len(),
        s.total_properties,
        count("required"),
        count("optional"),
        count("other").saturating_sub(s.unchecked + s.suppressed),
        s.unchecked,
        s.failures,
    )
}
