//! Time-dependent concession schedule.
//!
//! The threshold starts at `initial_target` and erodes with
//! `log10(1 - t) / rate`: barely at all for most of the session, then
//! collapsing to the reservation value in the last moments before the
//! deadline. Against a stubborn counterpart the rate divisor shrinks, so
//! the agent concedes faster.

use crate::config::StrategyConfig;

/// Maps elapsed time and opponent stubbornness to a minimum self-utility.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcessionScheduler {
    reservation_value: f64,
    opening_phase: f64,
    initial_target: f64,
    patient_rate: f64,
    stubborn_rate: f64,
    stubborn_threshold: f64,
}

impl ConcessionScheduler {
    pub fn new(config: &StrategyConfig) -> Self {
        Self {
            reservation_value: config.reservation_value,
            opening_phase: config.opening_phase,
            initial_target: config.initial_target,
            patient_rate: config.patient_rate,
            stubborn_rate: config.stubborn_rate,
            stubborn_threshold: config.stubborn_threshold,
        }
    }

    /// Whether `t` falls in the opening phase, where the agent only offers
    /// its maximum-utility bid.
    pub fn in_opening_phase(&self, t: f64) -> bool {
        t < self.opening_phase
    }

    /// Concession rate divisor for the given aggregate stubbornness.
    ///
    /// Switches to the stubborn rate only when the signal strictly exceeds
    /// the stubbornness threshold.
    pub fn rate(&self, stubbornness: f64) -> f64 {
        if stubbornness > self.stubborn_threshold {
            self.stubborn_rate
        } else {
            self.patient_rate
        }
    }

    /// Minimum self-utility the agent proposes or accepts at time `t`.
    ///
    /// `t` is clamped into `[0, 1]`; at `t >= 1` the logarithm is undefined
    /// and the reservation value is returned directly.
    pub fn min_acceptable_utility(&self, t: f64, stubbornness: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.reservation_value;
        }
        let target = (1.0 - t).log10() / self.rate(stubbornness) + self.initial_target;
        target.max(self.reservation_value)
    }

    pub fn reservation_value(&self) -> f64 {
        self.reservation_value
    }
}

/// Folds per-opponent stubbornness scores into the scheduler's signal.
///
/// Opponents without a score are skipped; with no scores at all the signal
/// is 0.
pub fn aggregate_stubbornness<I>(scores: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    scores.into_iter().flatten().fold(0.0, f64::max)
}
