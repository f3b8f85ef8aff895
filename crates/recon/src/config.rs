use std::collections::HashSet;

use serde::Deserialize;

use crate::error::ReconError;
use crate::rank::{AllowedPolicy, MergeOptions};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A `*.check.toml` file: which validator reports to reconcile, and how.
#[derive(Debug, Deserialize)]
pub struct CheckConfig {
    pub name: String,
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub allowed: AllowedPolicy,
    #[serde(default)]
    pub reports: Vec<ReportSource>,
    #[serde(default)]
    pub batches: Vec<BatchSource>,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// A single-schema validator response on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSource {
    pub file: String,
    /// Replaces the schema id found in the report.
    #[serde(default)]
    pub schema: Option<String>,
}

/// A multi-schema validator response on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSource {
    pub file: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CheckConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let mut config: CheckConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            allowed: self.allowed,
        }
    }

    /// Schema ids are case-insensitive; `e10` and `E10` name the same schema.
    fn normalize(&mut self) {
        for source in &mut self.reports {
            if let Some(schema) = source.schema.as_mut() {
                *schema = schema.trim().to_uppercase();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        if self.reports.is_empty() && self.batches.is_empty() {
            return Err(ReconError::ConfigValidation(
                "at least one [[reports]] or [[batches]] entry is required".into(),
            ));
        }

        for (i, source) in self.reports.iter().enumerate() {
            if source.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "reports[{i}]: file must not be empty"
                )));
            }
        }
        for (i, source) in self.batches.iter().enumerate() {
            if source.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "batches[{i}]: file must not be empty"
                )));
            }
        }

        let mut seen = HashSet::new();
        for schema in self.reports.iter().filter_map(|s| s.schema.as_deref()) {
            if schema.is_empty() {
                return Err(ReconError::ConfigValidation(
                    "schema override must not be empty".into(),
                ));
            }
            if !seen.insert(schema) {
                return Err(ReconError::ConfigValidation(format!(
                    "schema '{schema}' is listed more than once"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "Douglas Adams"
entity = "Q42"

[[reports]]
file = "e10.json"
schema = "e10"

[[reports]]
file = "e20.json"

[output]
json = "result.json"
"#;

    #[test]
    fn parse_valid() {
        let config = CheckConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "Douglas Adams");
        assert_eq!(config.entity.as_deref(), Some("Q42"));
        assert_eq!(config.reports.len(), 2);
        assert!(config.batches.is_empty());
        assert_eq!(config.output.json.as_deref(), Some("result.json"));
        assert_eq!(config.allowed, AllowedPolicy::FoldIntoPresent);
    }

    #[test]
    fn schema_overrides_are_upper_cased() {
        let config = CheckConfig::from_toml(VALID).unwrap();
        assert_eq!(config.reports[0].schema.as_deref(), Some("E10"));
        assert_eq!(config.reports[1].schema, None);
    }

    #[test]
    fn parse_allowed_policy() {
        let input = format!("allowed = \"distinct\"\n{VALID}");
        let config = CheckConfig::from_toml(&input).unwrap();
        assert_eq!(config.merge_options().allowed, AllowedPolicy::Distinct);
    }

    #[test]
    fn reject_unknown_allowed_policy() {
        let input = format!("allowed = \"fold\"\n{VALID}");
        let err = CheckConfig::from_toml(&input);
        assert!(matches!(err, Err(ReconError::ConfigParse(_))));
    }

    #[test]
    fn batches_alone_are_enough() {
        let input = r#"
name = "Batch"

[[batches]]
file = "payload.json"
"#;
        let config = CheckConfig::from_toml(input).unwrap();
        assert_eq!(config.batches.len(), 1);
    }

    #[test]
    fn reject_no_sources() {
        let err = CheckConfig::from_toml("name = \"Empty\"\n").unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn reject_duplicate_schema_case_insensitive() {
        let input = r#"
name = "Dupes"

[[reports]]
file = "a.json"
schema = "E10"

[[reports]]
file = "b.json"
schema = "e10"
"#;
        let err = CheckConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("'E10'"));
    }

    #[test]
    fn reject_empty_file() {
        let input = r#"
name = "Blank"

[[reports]]
file = " "
"#;
        let err = CheckConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("reports[0]"));
    }

    #[test]
    fn reject_missing_name() {
        let input = r#"
[[reports]]
file = "a.json"
"#;
        assert!(matches!(CheckConfig::from_toml(input), Err(ReconError::ConfigParse(_))));
    }
}
