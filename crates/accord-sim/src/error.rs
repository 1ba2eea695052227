//! Error types for the replay harness.

use accord_space::SpaceError;
use accord_strategy::StrategyError;
use accord_types::DomainError;

/// Errors that can occur while building or replaying a scenario.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The scenario is structurally invalid.
    #[error("invalid scenario: {0}")]
    Scenario(String),

    /// An offer did not fit the scenario's domain.
    #[error("invalid offer: {0}")]
    Domain(#[from] DomainError),

    /// The preference profile or outcome space could not be built.
    #[error("space error: {0}")]
    Space(#[from] SpaceError),

    /// The agent failed to decide.
    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),
}
