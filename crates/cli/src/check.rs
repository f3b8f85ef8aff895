//! `entitycheck check` / `merge` / `validate` — reconcile validator reports
//! that are already on disk.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use entitycheck_recon::engine::check_unique_schemas;
use entitycheck_recon::model::CheckInput;
use entitycheck_recon::report::{parse_batch, parse_report};
use entitycheck_recon::{AllowedPolicy, CheckConfig, CheckResult, MergeOptions, ReconError};

use crate::exit_codes::{
    recon_exit_code, ErrorOutput, EXIT_CHECK_FAILED, EXIT_CHECK_RUNTIME, EXIT_ERROR,
};
use crate::render::{render_listing, summary_line};
use crate::CliError;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AllowedArg {
    FoldIntoPresent,
    Distinct,
}

impl From<AllowedArg> for AllowedPolicy {
    fn from(arg: AllowedArg) -> Self {
        match arg {
            AllowedArg::FoldIntoPresent => AllowedPolicy::FoldIntoPresent,
            AllowedArg::Distinct => AllowedPolicy::Distinct,
        }
    }
}

fn check_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn from_recon(err: ReconError, json: bool) -> CliError {
    let output = ErrorOutput::from_recon_error(&err);
    if json {
        // Already reported in structured form; keep the plain line off stderr.
        output.print_json();
        return check_err(output.exit_code, "");
    }
    let hint = match err {
        ReconError::Validator { .. } => {
            Some("the validator could not translate this schema; re-fetch the report".to_string())
        }
        _ => None,
    };
    CliError { code: recon_exit_code(&err), message: output.message, hint }
}

fn read_file(path: &Path) -> Result<String, ReconError> {
    std::fs::read_to_string(path)
        .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))
}

pub fn cmd_check(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config_str = read_file(&config_path).map_err(|e| from_recon(e, json_output))?;
    let config = CheckConfig::from_toml(&config_str).map_err(|e| from_recon(e, json_output))?;

    // Resolve report paths relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let result = entitycheck_recon::engine::run_config(&config, |file| {
        let path = base_dir.join(file);
        log::debug!("reading report {}", path.display());
        read_file(&path)
    })
    .map_err(|e| from_recon(e, json_output))?;

    let output_file = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    emit(&result, json_output, output_file)
}

pub fn cmd_merge(
    reports: Vec<PathBuf>,
    batch: bool,
    allowed: Option<AllowedArg>,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut collected = Vec::new();
    for path in &reports {
        let source = path.display().to_string();
        let data = read_file(path).map_err(|e| from_recon(e, json_output))?;
        if batch {
            collected.extend(parse_batch(&source, &data).map_err(|e| from_recon(e, json_output))?);
        } else {
            collected.push(parse_report(&source, &data).map_err(|e| from_recon(e, json_output))?);
        }
    }

    check_unique_schemas(&collected).map_err(|e| from_recon(e, json_output))?;

    let options = MergeOptions {
        allowed: allowed.map(AllowedPolicy::from).unwrap_or_default(),
    };
    let input = CheckInput {
        name: "merge".into(),
        entity: None,
        reports: collected,
    };
    let result = entitycheck_recon::run(&options, &input);

    emit(&result, json_output, output_file)
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = read_file(&config_path).map_err(|e| from_recon(e, false))?;
    let config = CheckConfig::from_toml(&config_str).map_err(|e| from_recon(e, false))?;
    eprintln!(
        "valid: check '{}' with {} report(s), {} batch(es), allowed = {}",
        config.name,
        config.reports.len(),
        config.batches.len(),
        config.allowed,
    );
    Ok(())
}

fn emit(result: &CheckResult, json_output: bool, output_file: Option<PathBuf>) -> Result<(), CliError> {
    let json_str = serde_json::to_string_pretty(result)
        .map_err(|e| check_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| check_err(EXIT_CHECK_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    } else {
        print!("{}", render_listing(result));
    }

    // Human summary to stderr
    eprintln!("{}", summary_line(result));

    if !result.summary.passed {
        return Err(check_err(EXIT_CHECK_FAILED, "check failed"));
    }
    Ok(())
}
