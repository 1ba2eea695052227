//! Outcome index sorted by self-utility.

use accord_strategy::{EnvironmentError, OutcomeSpace, UtilitySpace};
use accord_types::{Bid, Domain};

use crate::error::SpaceError;

/// Largest outcome space [`SortedOutcomeSpace`] will enumerate.
pub const MAX_OUTCOMES: u64 = 1_000_000;

/// Every outcome of a domain, ascending by utility.
#[derive(Debug, Clone)]
pub struct SortedOutcomeSpace {
    outcomes: Vec<(f64, Bid)>,
}

impl SortedOutcomeSpace {
    /// Enumerates and scores every bid of `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::TooManyOutcomes`] when the domain holds more
    /// than [`MAX_OUTCOMES`] bids.
    pub fn new(domain: &Domain, utility: &dyn UtilitySpace) -> Result<Self, SpaceError> {
        let count = match domain.outcome_count() {
            Some(count) if count <= MAX_OUTCOMES => count,
            other => {
                return Err(SpaceError::TooManyOutcomes {
                    count: other.map_or_else(|| "more than u64::MAX".to_string(), |c| c.to_string()),
                    limit: MAX_OUTCOMES,
                })
            }
        };

        let mut outcomes = Vec::with_capacity(count as usize);
        if count > 0 {
            let sizes: Vec<usize> = domain.issues.iter().map(|i| i.values.len()).collect();
            let mut cursor = vec![0usize; sizes.len()];
            loop {
                let bid = Bid::new(cursor.clone());
                outcomes.push((utility.utility(&bid), bid));
                if !advance(&mut cursor, &sizes) {
                    break;
                }
            }
        }
        outcomes.sort_by(|(a, _), (b, _)| a.total_cmp(b));

        tracing::debug!(outcomes = outcomes.len(), "built sorted outcome space");
        Ok(Self { outcomes })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Highest-utility outcome.
    pub fn best(&self) -> Option<&Bid> {
        self.outcomes.last().map(|(_, bid)| bid)
    }

    /// Lowest-utility outcome.
    pub fn worst(&self) -> Option<&Bid> {
        self.outcomes.first().map(|(_, bid)| bid)
    }
}

/// Odometer increment over mixed radices; returns false after the last
/// combination.
fn advance(cursor: &mut [usize], sizes: &[usize]) -> bool {
    for (digit, &size) in cursor.iter_mut().zip(sizes).rev() {
        *digit += 1;
        if *digit < size {
            return true;
        }
        *digit = 0;
    }
    false
}

impl OutcomeSpace for SortedOutcomeSpace {
    /// Closest outcome to `target`; on a tie the higher-utility one wins.
    fn bid_near_utility(&self, target: f64) -> Result<Bid, EnvironmentError> {
        if self.outcomes.is_empty() {
            return Err(EnvironmentError::EmptyOutcomeSpace);
        }

        let above = self.outcomes.partition_point(|(u, _)| *u < target);
        let index = if above == 0 {
            0
        } else if above == self.outcomes.len() {
            above - 1
        } else {
            let below_gap = target - self.outcomes[above - 1].0;
            let above_gap = self.outcomes[above].0 - target;
            if above_gap <= below_gap {
                above
            } else {
                above - 1
            }
        };
        Ok(self.outcomes[index].1.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdditiveUtilitySpace;
    use accord_types::Issue;

    fn fixture() -> (Domain, AdditiveUtilitySpace) {
        let domain = Domain::new(vec![
            Issue::new("a", vec!["0".into(), "1".into(), "2".into()]),
            Issue::new("b", vec!["0".into(), "1".into()]),
        ]);
        let space = AdditiveUtilitySpace::new(
            domain.clone(),
            vec![0.5, 0.5],
            vec![vec![0.0, 0.5, 1.0], vec![0.0, 1.0]],
        )
        .unwrap();
        (domain, space)
    }

    #[test]
    fn enumerates_every_outcome_in_order() {
        let (domain, space) = fixture();
        let sorted = SortedOutcomeSpace::new(&domain, &space).unwrap();
        assert_eq!(sorted.len(), 6);
        assert_eq!(sorted.worst(), Some(&Bid::new(vec![0, 0])));
        assert_eq!(sorted.best(), Some(&Bid::new(vec![2, 1])));
        let utilities: Vec<f64> = sorted.outcomes.iter().map(|(u, _)| *u).collect();
        assert!(utilities.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn nearest_lookup() {
        let (domain, space) = fixture();
        let sorted = SortedOutcomeSpace::new(&domain, &space).unwrap();
        // Utilities: 0.0, 0.25, 0.5, 0.5, 0.75, 1.0
        assert!((space.utility(&sorted.bid_near_utility(0.8).unwrap()) - 0.75).abs() < 1e-12);
        assert!((space.utility(&sorted.bid_near_utility(2.0).unwrap()) - 1.0).abs() < 1e-12);
        assert!(space.utility(&sorted.bid_near_utility(-1.0).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn ties_resolve_upwards() {
        let (domain, space) = fixture();
        let sorted = SortedOutcomeSpace::new(&domain, &space).unwrap();
        let bid = sorted.bid_near_utility(0.875).unwrap();
        assert!((space.utility(&bid) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn refuses_oversized_domains() {
        let values: Vec<String> = (0..100).map(|v| v.to_string()).collect();
        let domain = Domain::new(
            (0..4)
                .map(|i| Issue::new(format!("i{i}"), values.clone()))
                .collect(),
        );
        let space = AdditiveUtilitySpace::new(
            domain.clone(),
            vec![1.0; 4],
            vec![vec![0.5; 100]; 4],
        )
        .unwrap();
        assert!(matches!(
            SortedOutcomeSpace::new(&domain, &space),
            Err(SpaceError::TooManyOutcomes { .. })
        ));
    }

    #[test]
    fn empty_issue_yields_empty_space() {
        let domain = Domain::new(vec![Issue::new("none", vec![])]);
        let space = AdditiveUtilitySpace::new(domain.clone(), vec![1.0], vec![vec![]]).unwrap();
        let sorted = SortedOutcomeSpace::new(&domain, &space).unwrap();
        assert!(sorted.is_empty());
        assert_eq!(
            sorted.bid_near_utility(0.5),
            Err(EnvironmentError::EmptyOutcomeSpace)
        );
    }
}
