//! Reference environment capabilities for accord negotiations.
//!
//! The bidding strategy never owns its preferences, its outcome index, or
//! its clock; a negotiation platform provides them. This crate implements
//! those capabilities for tests and for the replay harness:
//!
//! - [`AdditiveUtilitySpace`]: weighted sum of per-issue value evaluations.
//! - [`SortedOutcomeSpace`]: every outcome sorted by utility, answering
//!   nearest-utility lookups by binary search.
//! - [`RoundTimeline`]: elapsed time as completed rounds over total rounds.

mod additive;
mod error;
mod sorted;
mod timeline;

pub use additive::AdditiveUtilitySpace;
pub use error::SpaceError;
pub use sorted::{SortedOutcomeSpace, MAX_OUTCOMES};
pub use timeline::RoundTimeline;
