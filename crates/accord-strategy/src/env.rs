//! Capabilities the strategy consumes from the negotiation environment.
//!
//! The protocol platform owns the utility function, the outcome-space index,
//! and the clock. The strategy only ever reads them through these traits, so
//! any platform (or a test double) can host it.

use accord_types::{Bid, Deadline, PartyId};
use std::sync::Arc;

/// Errors reported by environment capabilities.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvironmentError {
    /// The capability could not answer the query.
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// The outcome space contains no bids.
    #[error("outcome space is empty")]
    EmptyOutcomeSpace,

    /// A bid did not match the shape of the domain.
    #[error("bid does not match domain: {0}")]
    DomainMismatch(String),
}

/// The agent's own preferences over bids.
pub trait UtilitySpace {
    /// Self-utility of `bid`, in `[0, 1]`.
    fn utility(&self, bid: &Bid) -> f64;

    /// The bid of maximum self-utility.
    fn max_utility_bid(&self) -> Result<Bid, EnvironmentError>;
}

/// Nearest-match lookup over all outcomes, ordered by self-utility.
pub trait OutcomeSpace {
    /// Returns a bid whose self-utility is close to `target`. The match is
    /// approximate; callers must check the actual utility.
    fn bid_near_utility(&self, target: f64) -> Result<Bid, EnvironmentError>;
}

/// Session clock.
pub trait Timeline {
    /// Elapsed fraction of the session in `[0, 1]`, non-decreasing.
    fn elapsed(&self) -> f64;
}

/// Everything the environment hands a strategy when a session starts.
#[derive(Clone)]
pub struct SessionContext {
    pub utility_space: Arc<dyn UtilitySpace>,
    pub outcome_space: Arc<dyn OutcomeSpace>,
    pub timeline: Arc<dyn Timeline>,
    pub deadline: Deadline,
    /// Seed for the session's single random source.
    pub seed: u64,
    /// This agent's own identity.
    pub party_id: PartyId,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("deadline", &self.deadline)
            .field("seed", &self.seed)
            .field("party_id", &self.party_id)
            .finish_non_exhaustive()
    }
}
