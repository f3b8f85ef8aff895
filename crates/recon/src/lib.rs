//! `entitycheck-recon` — Reconciles entity-schema validation reports.
//!
//! Pure engine crate: receives per-schema reports already parsed from the
//! validator, returns merged and classified results. No CLI or IO dependencies.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod merge;
pub mod model;
pub mod rank;
pub mod report;
pub mod validity;

pub use classify::classify;
pub use config::CheckConfig;
pub use engine::run;
pub use error::ReconError;
pub use merge::{merge_general, merge_schemas, merge_statements};
pub use model::{
    CheckInput, CheckResult, ClassificationBucket, CombinedPropertyResult, DisplayCategory,
    Necessity, ResponseCode, SchemaReport,
};
pub use rank::{AllowedPolicy, MergeOptions, DEFAULT_ALLOWED_POLICY};
