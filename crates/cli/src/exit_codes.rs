//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | check            | Reconciliation outcome and input codes   |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use entitycheck_recon::ReconError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (e.g. the result could not be
/// serialized). Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Check (3-9)
// =============================================================================

/// The merged verdict has failures (wrong values, missing required
/// properties, or a failed shape validation).
pub const EXIT_CHECK_FAILED: u8 = 3;

/// Config file could not be parsed or failed validation, or two reports
/// carry the same schema id.
pub const EXIT_CHECK_INVALID_CONFIG: u8 = 4;

/// A report file could not be read or is not a JSON object.
pub const EXIT_CHECK_RUNTIME: u8 = 5;

/// The validator answered with an error instead of a report.
pub const EXIT_CHECK_VALIDATOR: u8 = 6;

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_CHECK_INVALID_CONFIG,
        ReconError::ReportParse { .. } | ReconError::Io(_) => EXIT_CHECK_RUNTIME,
        ReconError::Validator { .. } => EXIT_CHECK_VALIDATOR,
    }
}

/// Structured error output for `--json` runs.
#[derive(Debug, serde::Serialize)]
pub struct ErrorOutput {
    pub error: &'static str,
    pub message: String,
    pub exit_code: u8,
}

impl ErrorOutput {
    pub fn from_recon_error(err: &ReconError) -> Self {
        let error = match err {
            ReconError::ConfigParse(_) => "config_parse",
            ReconError::ConfigValidation(_) => "config_validation",
            ReconError::ReportParse { .. } => "report_parse",
            ReconError::Validator { .. } => "unable_to_validate",
            ReconError::Io(_) => "io_error",
        };
        Self {
            error,
            message: err.to_string(),
            exit_code: recon_exit_code(err),
        }
    }

    /// Print the error to stderr as one JSON line.
    pub fn print_json(&self) {
        if let Ok(output) = serde_json::to_string(self) {
            eprintln!("{}", output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_CHECK_FAILED,
            EXIT_CHECK_INVALID_CONFIG,
            EXIT_CHECK_RUNTIME,
            EXIT_CHECK_VALIDATOR,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn error_mapping() {
        assert_eq!(recon_exit_code(&ReconError::ConfigParse("x".into())), EXIT_CHECK_INVALID_CONFIG);
        assert_eq!(recon_exit_code(&ReconError::Io("x".into())), EXIT_CHECK_RUNTIME);
        let validator = ReconError::Validator {
            source: "e1.json".into(),
            message: "boom".into(),
        };
        assert_eq!(recon_exit_code(&validator), EXIT_CHECK_VALIDATOR);
        assert_eq!(ErrorOutput::from_recon_error(&validator).error, "unable_to_validate");
    }

    #[test]
    fn json_error_shape() {
        let output = ErrorOutput::from_recon_error(&ReconError::ConfigValidation(
            "schema 'E10' is reported more than once".into(),
        ));
        let val = serde_json::to_value(&output).unwrap();
        assert_eq!(val["error"], "config_validation");
        assert_eq!(val["exit_code"], EXIT_CHECK_INVALID_CONFIG);
        assert!(val["message"].as_str().unwrap().contains("more than once"));
    }
}
