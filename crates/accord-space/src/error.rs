//! Error types for building reference spaces.

use accord_types::DomainError;

/// Errors raised while constructing a utility or outcome space.
#[derive(Debug, thiserror::Error)]
pub enum SpaceError {
    #[error("expected {expected} {what}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("issue '{issue}' has invalid weight {weight}")]
    InvalidWeight { issue: String, weight: f64 },

    #[error("issue weights sum to zero")]
    ZeroWeights,

    #[error("evaluation {evaluation} for '{issue}'='{value}' is outside [0, 1]")]
    InvalidEvaluation {
        issue: String,
        value: String,
        evaluation: f64,
    },

    #[error("outcome space too large to enumerate ({count} outcomes, limit {limit})")]
    TooManyOutcomes { count: String, limit: u64 },

    #[error(transparent)]
    Domain(#[from] DomainError),
}
