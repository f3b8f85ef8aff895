use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::validity::{Validity, ValidityReport};

pub type PropertyId = String;
pub type SchemaId = String;
pub type StatementId = String;

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// A schema's stance on a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Necessity {
    Required,
    Optional,
    /// Disallowed, or not mentioned by the schema.
    Absent,
}

impl Necessity {
    /// Read a validator necessity. Missing and unknown values read as `Absent`.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("required") => Self::Required,
            Some("optional") => Self::Optional,
            _ => Self::Absent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Absent => "absent",
        }
    }
}

impl std::fmt::Display for Necessity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validator verdict for one property (or statement) under one schema.
///
/// The "schema is silent" marker is not a variant: it is `None` wherever a
/// response is optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    Present,
    Correct,
    Missing,
    Incorrect,
    TooManyStatements,
    NotEnoughStatements,
    Allowed,
    /// A code outside the known vocabulary, kept verbatim.
    Other(String),
}

/// Wire text the validator uses when a schema does not mention an element.
pub const NOT_IN_SCHEMA: &str = "not in schema";

impl ResponseCode {
    /// Parse a validator response. Returns `None` for the absent marker
    /// (`"not in schema"` or blank).
    pub fn from_wire(value: &str) -> Option<Self> {
        let normalized = value.trim().replace('_', " ").to_ascii_lowercase();
        let code = match normalized.as_str() {
            "" | NOT_IN_SCHEMA => return None,
            "present" => Self::Present,
            "correct" => Self::Correct,
            "missing" => Self::Missing,
            "incorrect" => Self::Incorrect,
            "too many statements" => Self::TooManyStatements,
            "not enough statements" | "not enough correct statements" => {
                Self::NotEnoughStatements
            }
            "allowed" => Self::Allowed,
            _ => Self::Other(value.trim().to_string()),
        };
        Some(code)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Present => "present",
            Self::Correct => "correct",
            Self::Missing => "missing",
            Self::Incorrect => "incorrect",
            Self::TooManyStatements => "too many statements",
            Self::NotEnoughStatements => "not enough correct statements",
            Self::Allowed => "allowed",
            Self::Other(text) => text,
        }
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One schema's verdict on one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerSchemaPropertyResult {
    pub name: String,
    pub necessity: Necessity,
    pub response: Option<ResponseCode>,
}

/// One schema's verdict on one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatementResult {
    pub property: Option<PropertyId>,
    pub response: Option<ResponseCode>,
}

/// Entity-level checks (lexemes only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneralResult {
    pub language: Option<ResponseCode>,
    pub lexical_category: Option<ResponseCode>,
}

/// Everything one schema check reported about the entity.
#[derive(Debug, Clone, Default)]
pub struct SchemaReport {
    pub schema: SchemaId,
    pub name: String,
    pub properties: BTreeMap<PropertyId, PerSchemaPropertyResult>,
    pub statements: BTreeMap<StatementId, StatementResult>,
    pub general: GeneralResult,
    pub validity: Validity,
}

/// All reports for one entity, collected before reduction.
#[derive(Debug, Clone, Default)]
pub struct CheckInput {
    pub name: String,
    pub entity: Option<String>,
    pub reports: Vec<SchemaReport>,
}

// ---------------------------------------------------------------------------
// Merge output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedPropertyResult {
    pub name: String,
    pub per_schema: BTreeMap<SchemaId, PerSchemaPropertyResult>,
    pub combined_necessity: Necessity,
    pub combined_response: Option<ResponseCode>,
}

/// The schema whose response was taken for a single-valued element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaVerdict {
    pub schema: SchemaId,
    pub response: ResponseCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinedStatementResult {
    pub property: Option<PropertyId>,
    pub verdict: Option<SchemaVerdict>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinedGeneral {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<SchemaVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexical_category: Option<SchemaVerdict>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationBucket {
    Required,
    Optional,
    Other,
}

impl std::fmt::Display for ClassificationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Optional => write!(f, "optional"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCategory {
    Present,
    Correct,
    Missing,
    Wrong,
    NotInSchema,
}

impl std::fmt::Display for DisplayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Correct => write!(f, "correct"),
            Self::Missing => write!(f, "missing"),
            Self::Wrong => write!(f, "wrong"),
            Self::NotInSchema => write!(f, "not_in_schema"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub bucket: ClassificationBucket,
    pub category: DisplayCategory,
    /// Text shown on the badge.
    pub label: String,
}

impl Classification {
    /// Not checked by any selected schema; listed apart from the three columns.
    pub fn is_unchecked(&self) -> bool {
        self.bucket == ClassificationBucket::Other && self.category == DisplayCategory::NotInSchema
    }

    /// Missing from the "other" column: not listed at all.
    pub fn is_suppressed(&self) -> bool {
        self.bucket == ClassificationBucket::Other && self.category == DisplayCategory::Missing
    }

    pub fn is_failure(&self) -> bool {
        match self.category {
            DisplayCategory::Wrong => true,
            DisplayCategory::Missing => self.bucket == ClassificationBucket::Required,
            _ => false,
        }
    }
}

/// Badge for one schema's own verdict on a merged property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaBadge {
    pub schema: SchemaId,
    pub category: DisplayCategory,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedProperty {
    pub id: PropertyId,
    pub name: String,
    pub necessity: Necessity,
    pub response: Option<ResponseCode>,
    #[serde(flatten)]
    pub classification: Classification,
    pub badges: Vec<SchemaBadge>,
}

/// Properties grouped the way the three-column listing paints them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassifiedView {
    pub required: Vec<ClassifiedProperty>,
    pub optional: Vec<ClassifiedProperty>,
    pub other: Vec<ClassifiedProperty>,
    pub unchecked: Vec<ClassifiedProperty>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub total_properties: usize,
    pub bucket_counts: BTreeMap<String, usize>,
    pub category_counts: BTreeMap<String, usize>,
    pub unchecked: usize,
    pub suppressed: usize,
    pub failures: usize,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub meta: CheckMeta,
    pub summary: CheckSummary,
    pub properties: ClassifiedView,
    pub statements: BTreeMap<StatementId, SchemaVerdict>,
    pub general: CombinedGeneral,
    pub validity: ValidityReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckMeta {
    pub config_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    pub schemas: Vec<SchemaId>,
    pub engine_version: String,
    pub run_at: String,
}
