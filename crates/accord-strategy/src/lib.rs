//! Bidding strategy for an automated negotiation participant.
//!
//! Each round the strategy either accepts the latest offer on the table or
//! proposes a new bid. It combines four pieces:
//!
//! | Component | Module | Role |
//! |-----------|--------|------|
//! | Opponent model | [`opponent`] | Frequency analysis of each counterpart's offers; stubbornness score |
//! | Concession schedule | [`concession`] | Minimum self-utility as a function of elapsed time and stubbornness |
//! | Candidate generator | [`candidate`] | Samples admissible bids and keeps the one opponents favour most |
//! | Acceptance policy | [`acceptance`] | Accepts when the last offer beats our proposal or the threshold |
//!
//! [`Negotiator`] owns all per-session state and implements
//! [`NegotiationStrategy`], the capability a negotiation platform drives.
//! The platform supplies the utility space, outcome index, and clock through
//! the traits in [`env`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use accord_strategy::{NegotiationStrategy, Negotiator, SessionContext, StrategyConfig};
//!
//! let mut agent = Negotiator::init(context, StrategyConfig::default())?;
//! agent.receive_message(Some(&seller), &Message::from(Action::Offer(bid)));
//! match agent.choose_action()? {
//!     Action::Accept(bid) => { /* agreement */ }
//!     Action::Offer(bid) => { /* send counter-offer */ }
//! }
//! ```

pub mod acceptance;
pub mod candidate;
pub mod concession;
pub mod config;
pub mod env;
pub mod error;
pub mod opponent;
pub mod session;

pub use acceptance::{AcceptancePolicy, Verdict};
pub use candidate::{BidGenerator, Candidate};
pub use concession::{aggregate_stubbornness, ConcessionScheduler};
pub use config::StrategyConfig;
pub use env::{EnvironmentError, OutcomeSpace, SessionContext, Timeline, UtilitySpace};
pub use error::StrategyError;
pub use opponent::OpponentModel;
pub use session::{NegotiationStrategy, Negotiator, SessionPhase};
