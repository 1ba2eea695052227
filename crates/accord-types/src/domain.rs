//! Negotiation domains, issues, and bids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single negotiable issue and its discrete value set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Human-readable issue name (e.g. "price").
    pub name: String,
    /// The values this issue can take, in declaration order.
    pub values: Vec<String>,
}

impl Issue {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Returns the index of the value with the given name.
    pub fn value_index(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

/// A complete assignment of one value per issue.
///
/// Values are stored as indices into the owning domain's issue value lists.
/// Bids are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bid(Vec<usize>);

impl Bid {
    pub fn new(values: Vec<usize>) -> Self {
        Self(values)
    }

    /// Returns the value index chosen for `issue`, if the bid covers it.
    pub fn value(&self, issue: usize) -> Option<usize> {
        self.0.get(issue).copied()
    }

    pub fn values(&self) -> &[usize] {
        &self.0
    }

    pub fn issue_count(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

/// Errors raised while validating bids against a domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("bid covers {actual} issues, domain has {expected}")]
    IssueCount { expected: usize, actual: usize },

    #[error("value index {index} out of range for issue '{issue}'")]
    ValueOutOfRange { issue: String, index: usize },

    #[error("unknown value '{value}' for issue '{issue}'")]
    UnknownValue { issue: String, value: String },
}

/// The set of issues under negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Domain {
    pub issues: Vec<Issue>,
}

impl Domain {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Total number of distinct bids, or `None` if it overflows `u64`.
    ///
    /// A domain with no issues has exactly one (empty) outcome.
    pub fn outcome_count(&self) -> Option<u64> {
        self.issues
            .iter()
            .try_fold(1u64, |acc, issue| acc.checked_mul(issue.values.len() as u64))
    }

    /// Checks that `bid` assigns an in-range value to every issue.
    pub fn validate(&self, bid: &Bid) -> Result<(), DomainError> {
        if bid.issue_count() != self.issue_count() {
            return Err(DomainError::IssueCount {
                expected: self.issue_count(),
                actual: bid.issue_count(),
            });
        }
        for (issue, &index) in self.issues.iter().zip(bid.values()) {
            if index >= issue.values.len() {
                return Err(DomainError::ValueOutOfRange {
                    issue: issue.name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    /// Builds a bid from value names, one per issue in domain order.
    pub fn bid_from_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Bid, DomainError> {
        if names.len() != self.issue_count() {
            return Err(DomainError::IssueCount {
                expected: self.issue_count(),
                actual: names.len(),
            });
        }
        let values = self
            .issues
            .iter()
            .zip(names)
            .map(|(issue, name)| {
                issue
                    .value_index(name.as_ref())
                    .ok_or_else(|| DomainError::UnknownValue {
                        issue: issue.name.clone(),
                        value: name.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Bid::new(values))
    }

    /// Renders a bid as `issue=value` pairs for logs.
    pub fn describe(&self, bid: &Bid) -> String {
        self.issues
            .iter()
            .zip(bid.values())
            .map(|(issue, &index)| {
                let value = issue.values.get(index).map(String::as_str).unwrap_or("?");
                format!("{}={}", issue.name, value)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
