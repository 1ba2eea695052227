//! Per-counterpart preference model built from observed offers.
//!
//! The model is a frequency analysis: values a counterpart keeps offering
//! are inferred to be the values it prefers, and issues it keeps fixed
//! between consecutive offers are inferred to be the issues it cares about.

use accord_types::Bid;
use std::collections::HashMap;

use crate::env::UtilitySpace;
use crate::error::StrategyError;

/// Online model of one counterpart.
#[derive(Debug, Clone)]
pub struct OpponentModel {
    /// Offers in the order they were received.
    bids: Vec<Bid>,
    /// Per issue, how often each value index has been offered.
    frequencies: Vec<HashMap<usize, u32>>,
    /// Learned issue weights, summing to 1 once the first bid is seen.
    weights: Vec<f64>,
    learning_rate: f64,
}

impl OpponentModel {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            bids: Vec::new(),
            frequencies: Vec::new(),
            weights: Vec::new(),
            learning_rate,
        }
    }

    /// Records an offer from this counterpart and updates the frequency
    /// table and issue weights.
    pub fn observe(&mut self, bid: Bid) {
        if self.bids.is_empty() {
            let issues = bid.issue_count();
            self.frequencies = vec![HashMap::new(); issues];
            self.weights = vec![1.0 / issues.max(1) as f64; issues];
        } else if let Some(previous) = self.bids.last() {
            for (issue, weight) in self.weights.iter_mut().enumerate() {
                if previous.value(issue).is_some() && previous.value(issue) == bid.value(issue) {
                    *weight += self.learning_rate;
                }
            }
            let total: f64 = self.weights.iter().sum();
            if total > 0.0 {
                for weight in &mut self.weights {
                    *weight /= total;
                }
            }
        }

        for (issue, counts) in self.frequencies.iter_mut().enumerate() {
            if let Some(value) = bid.value(issue) {
                *counts.entry(value).or_insert(0) += 1;
            }
        }
        self.bids.push(bid);
    }

    /// Estimates this counterpart's utility for `bid` in `[0, 1]`.
    ///
    /// Each issue contributes its weight times the offered value's frequency
    /// relative to the most frequent value of that issue.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::NoObservations`] before the first offer has
    /// been observed.
    pub fn estimate_utility(&self, bid: &Bid) -> Result<f64, StrategyError> {
        if self.bids.is_empty() {
            return Err(StrategyError::NoObservations);
        }

        let estimate: f64 = self
            .frequencies
            .iter()
            .zip(&self.weights)
            .enumerate()
            .map(|(issue, (counts, weight))| {
                let Some(value) = bid.value(issue) else {
                    return 0.0;
                };
                let most = counts.values().copied().max().unwrap_or(0);
                if most == 0 {
                    return 0.0;
                }
                let seen = counts.get(&value).copied().unwrap_or(0);
                weight * f64::from(seen) / f64::from(most)
            })
            .sum();

        Ok(estimate.clamp(0.0, 1.0))
    }

    /// Scores how little this counterpart's offers have improved for us over
    /// the last `window` offers.
    ///
    /// The net improvement in our own utility from the first to the last
    /// offer of the window is measured against `scale`, the improvement that
    /// counts as a full concession. Returns `None` until at least `window`
    /// offers have been observed. A flat, oscillating or regressing trail
    /// scores 1; a trail that improves by `scale` or more scores 0.
    pub fn stubbornness(
        &self,
        window: usize,
        scale: f64,
        own: &dyn UtilitySpace,
    ) -> Option<f64> {
        if window == 0 || self.bids.len() < window {
            return None;
        }

        let trail = &self.bids[self.bids.len() - window..];
        let first = own.utility(&trail[0]);
        let last = own.utility(&trail[trail.len() - 1]);
        let progress = (last - first).max(0.0);
        if scale <= 0.0 {
            return Some(if progress > 0.0 { 0.0 } else { 1.0 });
        }
        Some(1.0 - (progress / scale).clamp(0.0, 1.0))
    }

    pub fn observed(&self) -> usize {
        self.bids.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}
