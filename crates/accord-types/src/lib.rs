//! Shared types for the accord negotiation workspace.
//!
//! This crate provides the vocabulary every other accord crate speaks:
//! negotiation domains and their issues, bids (one value per issue), party
//! identities, the actions a party can take, and the messages a party can
//! observe. It deliberately contains no strategy logic.
//!
//! `accord-types` sits at the bottom of the dependency graph and depends on
//! no other accord crate. `accord-strategy` builds on it and defines the
//! environment traits (`UtilitySpace`, `OutcomeSpace`, `Timeline`);
//! `accord-space` implements those traits, and `accord-sim` wires all three
//! together.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

mod domain;
pub use domain::{Bid, Domain, DomainError, Issue};

/// Identity of a negotiation participant.
///
/// The protocol environment assigns identities; the core only uses them as
/// registry keys and in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// An action taken by a party on its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "bid", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Accept the given bid (the latest offer on the table).
    Accept(Bid),
    /// Propose the given bid.
    Offer(Bid),
}

impl Action {
    /// Returns the bid carried by this action.
    pub fn bid(&self) -> &Bid {
        match self {
            Self::Accept(bid) | Self::Offer(bid) => bid,
        }
    }

    /// Returns the canonical label for this action kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accept(_) => "ACCEPT",
            Self::Offer(_) => "OFFER",
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.bid())
    }
}

/// A message delivered to a party by the protocol environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Another party (or the protocol, when the sender is absent) acted.
    Action { action: Action },
    /// The protocol ended the session.
    EndNegotiation,
}

impl From<Action> for Message {
    fn from(action: Action) -> Self {
        Self::Action { action }
    }
}

/// Session deadline as announced by the protocol environment.
///
/// The core never enforces it; it only reads elapsed time through its
/// timeline. The deadline is kept for diagnostics and session descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deadline {
    /// The session ends after this many rounds.
    Rounds(u32),
    /// The session ends after this much wall-clock time.
    Time(Duration),
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rounds(n) => write!(f, "{n} rounds"),
            Self::Time(d) => write!(f, "{}ms", d.as_millis()),
        }
    }
}
