//! Tunable parameters of the bidding strategy.

use serde::{Deserialize, Serialize};

use crate::error::StrategyError;

/// Strategy configuration.
///
/// Every field has a default, so a partial TOML table (or none at all)
/// deserializes into a working configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Hard floor below which the agent never proposes or accepts.
    #[serde(default = "default_reservation_value")]
    pub reservation_value: f64,

    /// Fraction of the session during which the agent only offers its
    /// maximum-utility bid.
    #[serde(default = "default_opening_phase")]
    pub opening_phase: f64,

    /// Threshold at `t = 0`, before any concession.
    #[serde(default = "default_initial_target")]
    pub initial_target: f64,

    /// Concession rate divisor when no opponent is stubborn.
    #[serde(default = "default_patient_rate")]
    pub patient_rate: f64,

    /// Concession rate divisor when some opponent is stubborn. Smaller
    /// divisors concede faster.
    #[serde(default = "default_stubborn_rate")]
    pub stubborn_rate: f64,

    /// Stubbornness score above which an opponent counts as stubborn.
    #[serde(default = "default_stubborn_threshold")]
    pub stubborn_threshold: f64,

    /// Number of trailing offers an opponent must have made before its
    /// stubbornness is scored.
    #[serde(default = "default_stubbornness_window")]
    pub stubbornness_window: usize,

    /// Improvement in our own utility across the stubbornness window that
    /// counts as a full concession. Smaller movements score as stubborn.
    #[serde(default = "default_concession_scale")]
    pub concession_scale: f64,

    /// Admissible candidates sampled per generated bid.
    #[serde(default = "default_candidate_count")]
    pub candidate_count: usize,

    /// Upper bound on nearest-utility lookups while sampling one admissible
    /// candidate.
    #[serde(default = "default_max_sampling_attempts")]
    pub max_sampling_attempts: usize,

    /// Weight added to an issue whose value an opponent left unchanged
    /// between consecutive offers.
    #[serde(default = "default_weight_learning_rate")]
    pub weight_learning_rate: f64,
}

fn default_reservation_value() -> f64 {
    0.4
}

fn default_opening_phase() -> f64 {
    0.20
}

fn default_initial_target() -> f64 {
    0.9
}

fn default_patient_rate() -> f64 {
    10.0
}

fn default_stubborn_rate() -> f64 {
    7.0
}

fn default_stubborn_threshold() -> f64 {
    0.1
}

fn default_stubbornness_window() -> usize {
    40
}

fn default_concession_scale() -> f64 {
    0.1
}

fn default_candidate_count() -> usize {
    100
}

fn default_max_sampling_attempts() -> usize {
    1000
}

fn default_weight_learning_rate() -> f64 {
    0.1
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            reservation_value: default_reservation_value(),
            opening_phase: default_opening_phase(),
            initial_target: default_initial_target(),
            patient_rate: default_patient_rate(),
            stubborn_rate: default_stubborn_rate(),
            stubborn_threshold: default_stubborn_threshold(),
            stubbornness_window: default_stubbornness_window(),
            concession_scale: default_concession_scale(),
            candidate_count: default_candidate_count(),
            max_sampling_attempts: default_max_sampling_attempts(),
            weight_learning_rate: default_weight_learning_rate(),
        }
    }
}

impl StrategyConfig {
    /// Checks that every parameter is inside its meaningful range.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::InvalidConfig`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), StrategyError> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.reservation_value) {
            return Err(invalid("reservation_value must be within [0, 1]"));
        }
        if !(0.0..1.0).contains(&self.opening_phase) {
            return Err(invalid("opening_phase must be within [0, 1)"));
        }
        if !unit.contains(&self.initial_target) {
            return Err(invalid("initial_target must be within [0, 1]"));
        }
        if !(self.patient_rate > 0.0 && self.patient_rate.is_finite()) {
            return Err(invalid("patient_rate must be positive"));
        }
        if !(self.stubborn_rate > 0.0 && self.stubborn_rate.is_finite()) {
            return Err(invalid("stubborn_rate must be positive"));
        }
        if !unit.contains(&self.stubborn_threshold) {
            return Err(invalid("stubborn_threshold must be within [0, 1]"));
        }
        if self.stubbornness_window < 2 {
            return Err(invalid("stubbornness_window must be at least 2"));
        }
        if !(self.concession_scale > 0.0 && self.concession_scale.is_finite()) {
            return Err(invalid("concession_scale must be positive"));
        }
        if self.candidate_count == 0 {
            return Err(invalid("candidate_count must be at least 1"));
        }
        if self.max_sampling_attempts == 0 {
            return Err(invalid("max_sampling_attempts must be at least 1"));
        }
        if !(self.weight_learning_rate >= 0.0 && self.weight_learning_rate.is_finite()) {
            return Err(invalid("weight_learning_rate must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> StrategyError {
    StrategyError::InvalidConfig(reason.to_string())
}
