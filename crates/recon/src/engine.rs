use std::collections::HashSet;

use crate::classify::{classify_all, partition};
use crate::config::CheckConfig;
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::merge::{merge_general, merge_schemas, merge_statements};
use crate::model::{CheckInput, CheckMeta, CheckResult, SchemaReport};
use crate::rank::MergeOptions;
use crate::report::{parse_batch, parse_report};
use crate::validity::{combine, SchemaValidity};

/// Collect every report a config names: `[[reports]]` first, then
/// `[[batches]]`, each in file order. `read` resolves a config file path to
/// its contents.
pub fn collect_reports<F>(config: &CheckConfig, mut read: F) -> Result<Vec<SchemaReport>, ReconError>
where
    F: FnMut(&str) -> Result<String, ReconError>,
{
    let mut reports = Vec::new();

    for source in &config.reports {
        let data = read(&source.file)?;
        let mut report = parse_report(&source.file, &data)?;
        if let Some(schema) = &source.schema {
            report.schema = schema.clone();
        }
        reports.push(report);
    }

    for source in &config.batches {
        let data = read(&source.file)?;
        reports.extend(parse_batch(&source.file, &data)?);
    }

    check_unique_schemas(&reports)?;
    Ok(reports)
}

/// Each schema may report once per run. Ids are compared after the
/// upper-casing done by the report parser and config overrides.
pub fn check_unique_schemas(reports: &[SchemaReport]) -> Result<(), ReconError> {
    let mut seen = HashSet::new();
    for report in reports {
        if !seen.insert(report.schema.as_str()) {
            return Err(ReconError::ConfigValidation(format!(
                "schema '{}' is reported more than once",
                report.schema
            )));
        }
    }
    Ok(())
}

/// Collect and reconcile in one step.
pub fn run_config<F>(config: &CheckConfig, read: F) -> Result<CheckResult, ReconError>
where
    F: FnMut(&str) -> Result<String, ReconError>,
{
    let input = CheckInput {
        name: config.name.clone(),
        entity: config.entity.clone(),
        reports: collect_reports(config, read)?,
    };
    Ok(run(&config.merge_options(), &input))
}

/// Reconcile every collected report. Returns classified properties,
/// single-valued verdicts and a summary.
///
/// Call only once all reports for the entity are in; nothing here depends on
/// the order reports arrived in except the first-match statement and
/// `general` verdicts, which follow `input.reports` order.
pub fn run(options: &MergeOptions, input: &CheckInput) -> CheckResult {
    let merged = merge_schemas(&input.reports, options);
    let classified = classify_all(&merged);

    let statements = merge_statements(&input.reports)
        .into_iter()
        .filter_map(|(id, combined)| combined.verdict.map(|v| (id, v)))
        .collect();
    let general = merge_general(&input.reports);

    let validity = combine(
        input
            .reports
            .iter()
            .map(|r| SchemaValidity {
                schema: r.schema.clone(),
                validity: r.validity.clone(),
            })
            .collect(),
    );

    let summary = compute_summary(&classified, &validity);

    log::debug!(
        "reconciled {} report(s): {} properties, {} failures",
        input.reports.len(),
        summary.total_properties,
        summary.failures
    );

    CheckResult {
        meta: CheckMeta {
            config_name: input.name.clone(),
            entity: input.entity.clone(),
            schemas: input.reports.iter().map(|r| r.schema.clone()).collect(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        properties: partition(classified),
        statements,
        general,
        validity,
    }
}
