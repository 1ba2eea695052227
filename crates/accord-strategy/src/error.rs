//! Error types for the bidding strategy.

use crate::env::EnvironmentError;

/// Errors that can surface from a decision cycle or session setup.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// A consumed capability (utility space, outcome index) failed.
    #[error("environment error: {0}")]
    Environment(#[from] EnvironmentError),

    /// No outcome at or above the threshold was found within the attempt bound.
    #[error("no bid with utility >= {threshold:.4} found in {attempts} attempts")]
    NoAdmissibleBid { threshold: f64, attempts: usize },

    /// An opponent model was asked for an estimate before observing any bid.
    #[error("opponent model has no observed bids")]
    NoObservations,

    /// The strategy configuration is out of range.
    #[error("invalid strategy configuration: {0}")]
    InvalidConfig(String),

    /// The protocol already ended the session.
    #[error("negotiation session has ended")]
    SessionEnded,
}
