//! Linear additive utility over a discrete domain.

use accord_strategy::{EnvironmentError, UtilitySpace};
use accord_types::{Bid, Domain};

use crate::error::SpaceError;

/// `utility(bid) = Σ weight_i · evaluation_i(bid_i)` with weights summing
/// to 1 and every evaluation in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdditiveUtilitySpace {
    domain: Domain,
    weights: Vec<f64>,
    evaluations: Vec<Vec<f64>>,
}

impl AdditiveUtilitySpace {
    /// Builds a utility space. `weights` are normalised to sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError`] if the shapes disagree with the domain, a
    /// weight is negative or non-finite, all weights are zero, or an
    /// evaluation lies outside `[0, 1]`.
    pub fn new(
        domain: Domain,
        weights: Vec<f64>,
        evaluations: Vec<Vec<f64>>,
    ) -> Result<Self, SpaceError> {
        if weights.len() != domain.issue_count() {
            return Err(SpaceError::ShapeMismatch {
                what: "issue weights",
                expected: domain.issue_count(),
                actual: weights.len(),
            });
        }
        if evaluations.len() != domain.issue_count() {
            return Err(SpaceError::ShapeMismatch {
                what: "issue evaluation tables",
                expected: domain.issue_count(),
                actual: evaluations.len(),
            });
        }

        for ((issue, &weight), table) in domain.issues.iter().zip(&weights).zip(&evaluations) {
            if !(weight >= 0.0 && weight.is_finite()) {
                return Err(SpaceError::InvalidWeight {
                    issue: issue.name.clone(),
                    weight,
                });
            }
            if table.len() != issue.values.len() {
                return Err(SpaceError::ShapeMismatch {
                    what: "value evaluations",
                    expected: issue.values.len(),
                    actual: table.len(),
                });
            }
            for (value, &evaluation) in issue.values.iter().zip(table) {
                if !(0.0..=1.0).contains(&evaluation) {
                    return Err(SpaceError::InvalidEvaluation {
                        issue: issue.name.clone(),
                        value: value.clone(),
                        evaluation,
                    });
                }
            }
        }

        let total: f64 = weights.iter().sum();
        if domain.issue_count() > 0 && total <= 0.0 {
            return Err(SpaceError::ZeroWeights);
        }
        let weights = weights.into_iter().map(|w| w / total).collect();

        Ok(Self {
            domain,
            weights,
            evaluations,
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Normalised issue weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl UtilitySpace for AdditiveUtilitySpace {
    /// Bids that do not fit the domain are worth 0.
    fn utility(&self, bid: &Bid) -> f64 {
        if let Err(e) = self.domain.validate(bid) {
            tracing::debug!(error = %e, "utility of malformed bid");
            return 0.0;
        }
        let utility: f64 = self
            .weights
            .iter()
            .zip(&self.evaluations)
            .zip(bid.values())
            .map(|((weight, table), &value)| weight * table[value])
            .sum();
        utility.clamp(0.0, 1.0)
    }

    fn max_utility_bid(&self) -> Result<Bid, EnvironmentError> {
        let values = self
            .evaluations
            .iter()
            .map(|table| {
                table
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.total_cmp(b))
                    .map(|(index, _)| index)
                    .ok_or(EnvironmentError::EmptyOutcomeSpace)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Bid::new(values))
    }
}
