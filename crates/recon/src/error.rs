use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (no reports, duplicate schema, etc.).
    ConfigValidation(String),
    /// A report file is not a JSON object.
    ReportParse { source: String, message: String },
    /// The validator answered with an error instead of a report.
    Validator { source: String, message: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::ReportParse { source, message } => {
                write!(f, "report '{source}': cannot parse: {message}")
            }
            Self::Validator { source, message } => {
                write!(f, "report '{source}': unable to validate schema: {message}")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
