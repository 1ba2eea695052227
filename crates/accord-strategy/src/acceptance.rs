//! Accept-or-offer decision.

use accord_types::Bid;

use crate::env::UtilitySpace;

/// Outcome of the acceptance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Offer,
}

/// Accepts the last received bid when it is at least as good as what we
/// would propose next, or when it strictly clears the current threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptancePolicy;

impl AcceptancePolicy {
    /// Pure function of its inputs: calling it twice with the same
    /// arguments yields the same verdict.
    pub fn evaluate(
        &self,
        own: &dyn UtilitySpace,
        last_received: Option<&Bid>,
        candidate: &Bid,
        threshold: f64,
    ) -> Verdict {
        let Some(received) = last_received else {
            return Verdict::Offer;
        };

        let received_utility = own.utility(received);
        let candidate_utility = own.utility(candidate);

        tracing::debug!(
            received_utility,
            candidate_utility,
            threshold,
            "evaluating last received bid"
        );

        if received_utility >= candidate_utility || received_utility > threshold {
            Verdict::Accept
        } else {
            Verdict::Offer
        }
    }
}
