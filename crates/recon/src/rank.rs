//! Precedence tables consulted by the reductions in [`crate::merge`].
//!
//! Both tables are ordered strongest first. A reduction picks the entry with
//! the lowest index among the values it was given, so the result never
//! depends on the order in which schemas reported.

use serde::Deserialize;

use crate::model::{Necessity, ResponseCode};

/// Most restrictive requirement wins.
pub const NECESSITY_PRECEDENCE: [Necessity; 3] =
    [Necessity::Required, Necessity::Optional, Necessity::Absent];

/// Failures dominate passes. Codes not listed here never win a reduction.
pub const RESPONSE_PRECEDENCE: [ResponseCode; 7] = [
    ResponseCode::Incorrect,
    ResponseCode::Missing,
    ResponseCode::TooManyStatements,
    ResponseCode::NotEnoughStatements,
    ResponseCode::Correct,
    ResponseCode::Present,
    ResponseCode::Allowed,
];

/// How `allowed` relates to `present` during response reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedPolicy {
    /// `allowed` is read as `present` before ranking.
    FoldIntoPresent,
    /// `allowed` keeps its own rank, just below `present`.
    Distinct,
}

pub const DEFAULT_ALLOWED_POLICY: AllowedPolicy = AllowedPolicy::FoldIntoPresent;

impl Default for AllowedPolicy {
    fn default() -> Self {
        DEFAULT_ALLOWED_POLICY
    }
}

impl AllowedPolicy {
    pub fn fold(self, code: &ResponseCode) -> ResponseCode {
        match (self, code) {
            (Self::FoldIntoPresent, ResponseCode::Allowed) => ResponseCode::Present,
            _ => code.clone(),
        }
    }
}

impl std::fmt::Display for AllowedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FoldIntoPresent => write!(f, "fold_into_present"),
            Self::Distinct => write!(f, "distinct"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub allowed: AllowedPolicy,
}

pub fn necessity_rank(necessity: Necessity) -> usize {
    NECESSITY_PRECEDENCE
        .iter()
        .position(|n| *n == necessity)
        .unwrap_or(NECESSITY_PRECEDENCE.len())
}

/// Position of `code` in [`RESPONSE_PRECEDENCE`] after applying `policy`.
/// `None` for codes that take no part in the reduction.
pub fn response_rank(code: &ResponseCode, policy: AllowedPolicy) -> Option<usize> {
    let folded = policy.fold(code);
    RESPONSE_PRECEDENCE.iter().position(|ranked| *ranked == folded)
}

/// Highest-ranked necessity, `Absent` when there is none.
pub fn reduce_necessity<I>(necessities: I) -> Necessity
where
    I: IntoIterator<Item = Necessity>,
{
    necessities
        .into_iter()
        .min_by_key(|n| necessity_rank(*n))
        .unwrap_or(Necessity::Absent)
}

/// Highest-ranked response, `None` ("not in schema") when no code ranks.
pub fn reduce_response<'a, I>(codes: I, policy: AllowedPolicy) -> Option<ResponseCode>
where
    I: IntoIterator<Item = &'a ResponseCode>,
{
    codes
        .into_iter()
        .filter_map(|code| response_rank(code, policy).map(|rank| (rank, policy.fold(code))))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, code)| code)
}
