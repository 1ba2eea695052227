//! Candidate bid search and joint-acceptability scoring.

use accord_types::Bid;
use rand::Rng;

use crate::env::{OutcomeSpace, UtilitySpace};
use crate::error::StrategyError;
use crate::opponent::OpponentModel;

/// A generated offer together with the scores it was selected by.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub bid: Bid,
    /// Our own utility for the bid.
    pub own_utility: f64,
    /// Mean estimated utility across known opponents; `None` when no
    /// opponent is known and the candidate was not scored.
    pub opponent_utility: Option<f64>,
}

/// Samples admissible bids and keeps the one opponents are likeliest to
/// accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidGenerator {
    candidate_count: usize,
    max_sampling_attempts: usize,
}

impl BidGenerator {
    pub fn new(candidate_count: usize, max_sampling_attempts: usize) -> Self {
        Self {
            candidate_count: candidate_count.max(1),
            max_sampling_attempts: max_sampling_attempts.max(1),
        }
    }

    /// Draws one bid with own utility `>= threshold`.
    ///
    /// Each attempt picks a target uniformly in `[threshold, 1]` and asks the
    /// outcome index for the nearest bid. A failed lookup is retried once
    /// before the error is returned.
    ///
    /// # Errors
    ///
    /// [`StrategyError::NoAdmissibleBid`] when no qualifying bid turns up
    /// within the attempt bound, or [`StrategyError::Environment`] when the
    /// outcome index fails twice in a row.
    pub fn sample_admissible<R: Rng + ?Sized>(
        &self,
        threshold: f64,
        own: &dyn UtilitySpace,
        outcomes: &dyn OutcomeSpace,
        rng: &mut R,
    ) -> Result<Bid, StrategyError> {
        let span = (1.0 - threshold).max(0.0);
        for _ in 0..self.max_sampling_attempts {
            let target = threshold + rng.gen::<f64>() * span;
            let bid = match outcomes.bid_near_utility(target) {
                Ok(bid) => bid,
                Err(e) => {
                    tracing::warn!(error = %e, target, "outcome lookup failed, retrying once");
                    outcomes.bid_near_utility(target)?
                }
            };
            if own.utility(&bid) >= threshold {
                return Ok(bid);
            }
        }
        Err(StrategyError::NoAdmissibleBid {
            threshold,
            attempts: self.max_sampling_attempts,
        })
    }

    /// Produces an admissible bid maximising mean estimated opponent
    /// utility.
    ///
    /// The first sampled candidate is the initial best. With no known
    /// opponents it is returned unscored; otherwise up to
    /// `candidate_count` candidates are compared and the first one with the
    /// highest mean wins.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        threshold: f64,
        own: &dyn UtilitySpace,
        outcomes: &dyn OutcomeSpace,
        opponents: &[&OpponentModel],
        rng: &mut R,
    ) -> Result<Candidate, StrategyError> {
        let first = self.sample_admissible(threshold, own, outcomes, rng)?;
        if opponents.is_empty() {
            return Ok(Candidate {
                own_utility: own.utility(&first),
                bid: first,
                opponent_utility: None,
            });
        }

        let mut best_score = mean_estimate(&first, opponents)?;
        let mut best = first;
        for _ in 1..self.candidate_count {
            let bid = self.sample_admissible(threshold, own, outcomes, rng)?;
            let score = mean_estimate(&bid, opponents)?;
            if score > best_score {
                best_score = score;
                best = bid;
            }
        }

        tracing::debug!(
            threshold,
            own_utility = own.utility(&best),
            opponent_utility = best_score,
            "selected candidate bid"
        );

        Ok(Candidate {
            own_utility: own.utility(&best),
            bid: best,
            opponent_utility: Some(best_score),
        })
    }
}

fn mean_estimate(bid: &Bid, opponents: &[&OpponentModel]) -> Result<f64, StrategyError> {
    let mut total = 0.0;
    for model in opponents {
        total += model.estimate_utility(bid)?;
    }
    Ok(total / opponents.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{MockOutcomeSpace, MockUtilitySpace};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sampled_bids_clear_the_threshold() {
        let own = MockUtilitySpace::linear(2, 5);
        let outcomes = MockOutcomeSpace::enumerate(&own, 2, 5);
        let generator = BidGenerator::new(100, 1000);
        let mut rng = StdRng::seed_from_u64(7);

        for threshold in [0.0, 0.4, 0.75, 0.9, 1.0] {
            for _ in 0..50 {
                let bid = generator
                    .sample_admissible(threshold, &own, &outcomes, &mut rng)
                    .unwrap();
                assert!(own.utility(&bid) >= threshold);
            }
        }
    }

    #[test]
    fn sampling_is_bounded_when_nothing_qualifies() {
        let own = MockUtilitySpace::linear(1, 3);
        // Only the worst outcome is reachable.
        let outcomes = MockOutcomeSpace::fixed(Bid::new(vec![0]));
        let generator = BidGenerator::new(10, 25);
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator
            .sample_admissible(0.5, &own, &outcomes, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            StrategyError::NoAdmissibleBid { attempts: 25, .. }
        ));
    }

    #[test]
    fn lookup_failure_is_retried_once() {
        let own = MockUtilitySpace::linear(1, 3);
        let outcomes = MockOutcomeSpace::fixed(Bid::new(vec![2])).failing(1);
        let generator = BidGenerator::new(1, 10);
        let mut rng = StdRng::seed_from_u64(1);

        let bid = generator
            .sample_admissible(0.5, &own, &outcomes, &mut rng)
            .unwrap();
        assert_eq!(bid, Bid::new(vec![2]));
    }

    #[test]
    fn repeated_lookup_failure_surfaces() {
        let own = MockUtilitySpace::linear(1, 3);
        let outcomes = MockOutcomeSpace::fixed(Bid::new(vec![2])).failing(2);
        let generator = BidGenerator::new(1, 10);
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator
            .sample_admissible(0.5, &own, &outcomes, &mut rng)
            .unwrap_err();
        assert!(matches!(err, StrategyError::Environment(_)));
    }

    #[test]
    fn zero_opponents_returns_unscored_candidate() {
        let own = MockUtilitySpace::linear(2, 5);
        let outcomes = MockOutcomeSpace::enumerate(&own, 2, 5);
        let generator = BidGenerator::new(100, 1000);
        let mut rng = StdRng::seed_from_u64(3);

        let candidate = generator
            .generate(0.6, &own, &outcomes, &[], &mut rng)
            .unwrap();
        assert!(candidate.own_utility >= 0.6);
        assert_eq!(candidate.opponent_utility, None);
    }

    #[test]
    fn prefers_bids_the_opponent_favours() {
        // Two issues; we only care about issue 0, the opponent only ever
        // offers value 4 on issue 1.
        let own = MockUtilitySpace::weighted(vec![1.0, 0.0], 5);
        let outcomes = MockOutcomeSpace::enumerate(&own, 2, 5);
        let mut opponent = OpponentModel::new(0.1);
        for _ in 0..5 {
            opponent.observe(Bid::new(vec![0, 4]));
        }
        let generator = BidGenerator::new(200, 1000);
        let mut rng = StdRng::seed_from_u64(11);

        let candidate = generator
            .generate(0.7, &own, &outcomes, &[&opponent], &mut rng)
            .unwrap();
        assert!(candidate.own_utility >= 0.7);
        assert_eq!(candidate.bid.value(1), Some(4));
    }

    #[test]
    fn same_seed_same_candidate() {
        let own = MockUtilitySpace::linear(3, 4);
        let mut opponent = OpponentModel::new(0.1);
        opponent.observe(Bid::new(vec![0, 1, 2]));
        opponent.observe(Bid::new(vec![1, 1, 2]));
        let generator = BidGenerator::new(50, 1000);

        let run = || {
            let outcomes = MockOutcomeSpace::enumerate(&own, 3, 4);
            generator
                .generate(0.5, &own, &outcomes, &[&opponent], &mut StdRng::seed_from_u64(99))
                .unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a, b);
    }
}
