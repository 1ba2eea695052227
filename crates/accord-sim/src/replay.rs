//! Replays scripted counterpart offers against one agent.

use accord_space::{AdditiveUtilitySpace, RoundTimeline, SortedOutcomeSpace};
use accord_strategy::{
    NegotiationStrategy, Negotiator, SessionContext, StrategyConfig, UtilitySpace,
};
use accord_types::{Action, Bid, Domain, Issue, Message, PartyId};
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::error::SimError;

/// A scripted counterpart with its resolved offer trace.
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    pub id: PartyId,
    offers: Vec<Bid>,
}

impl ScriptedOpponent {
    /// Offer made in `round`; the last offer repeats once the trace ends.
    pub fn offer_at(&self, round: u32) -> &Bid {
        let index = (round as usize).min(self.offers.len() - 1);
        &self.offers[index]
    }
}

/// A fully resolved, validated replay scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub domain: Domain,
    pub utility: AdditiveUtilitySpace,
    pub opponents: Vec<ScriptedOpponent>,
    pub strategy: StrategyConfig,
    pub rounds: u32,
    pub seed: u64,
    pub party_id: PartyId,
}

impl Scenario {
    /// Resolves value names in `config` against its issue list.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] when the preference profile is invalid, an
    /// opponent has no offers, or an offer names an unknown value.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        if config.issues.is_empty() {
            return Err(SimError::Scenario("at least one issue is required".into()));
        }

        let domain = Domain::new(
            config
                .issues
                .iter()
                .map(|issue| {
                    Issue::new(
                        issue.name.clone(),
                        issue.values.iter().map(|v| v.name.clone()).collect(),
                    )
                })
                .collect(),
        );
        let utility = AdditiveUtilitySpace::new(
            domain.clone(),
            config.issues.iter().map(|issue| issue.weight).collect(),
            config
                .issues
                .iter()
                .map(|issue| issue.values.iter().map(|v| v.evaluation).collect())
                .collect(),
        )?;

        let opponents = config
            .opponents
            .iter()
            .map(|opponent| {
                if opponent.offers.is_empty() {
                    return Err(SimError::Scenario(format!(
                        "opponent '{}' has no offers",
                        opponent.id
                    )));
                }
                let offers = opponent
                    .offers
                    .iter()
                    .map(|names| domain.bid_from_names(names.as_slice()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ScriptedOpponent {
                    id: PartyId::new(opponent.id.clone()),
                    offers,
                })
            })
            .collect::<Result<Vec<_>, SimError>>()?;

        config.strategy.validate()?;

        Ok(Self {
            domain,
            utility,
            opponents,
            strategy: config.strategy.clone(),
            rounds: config.session.rounds,
            seed: config.session.seed,
            party_id: PartyId::new(config.session.party_id.clone()),
        })
    }
}

/// How a replayed session ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The agent accepted an offer in `round` (0-based).
    Agreement {
        round: u32,
        bid: Bid,
        description: String,
        utility: f64,
    },
    /// The deadline passed without the agent accepting.
    NoAgreement {
        rounds: u32,
        last_offer: Option<Bid>,
    },
}

/// Runs `scenario` to agreement or deadline.
///
/// Each round every scripted opponent delivers its next offer, in
/// declaration order, and the agent then decides. Round `r` is decided at
/// elapsed time `r / rounds`.
///
/// # Errors
///
/// Returns [`SimError`] if the outcome space cannot be built or a decision
/// fails without a fallback.
pub fn run_scenario(scenario: &Scenario) -> Result<Outcome, SimError> {
    let utility = Arc::new(scenario.utility.clone());
    let outcomes = SortedOutcomeSpace::new(&scenario.domain, utility.as_ref())?;
    let timeline = Arc::new(RoundTimeline::new(scenario.rounds));

    let context = SessionContext {
        utility_space: utility.clone(),
        outcome_space: Arc::new(outcomes),
        timeline: timeline.clone(),
        deadline: timeline.deadline(),
        seed: scenario.seed,
        party_id: scenario.party_id.clone(),
    };
    let mut agent = Negotiator::init(context, scenario.strategy.clone())?;
    tracing::info!(
        strategy = agent.description(),
        opponents = scenario.opponents.len(),
        rounds = scenario.rounds,
        "replaying scenario"
    );

    let mut last_offer = None;
    while !timeline.is_finished() {
        let round = timeline.round();
        for opponent in &scenario.opponents {
            let bid = opponent.offer_at(round).clone();
            agent.receive_message(Some(&opponent.id), &Message::from(Action::Offer(bid)));
        }

        match agent.choose_action()? {
            Action::Accept(bid) => {
                let utility = utility.utility(&bid);
                let description = scenario.domain.describe(&bid);
                tracing::info!(round, utility, bid = %description, "agreement reached");
                return Ok(Outcome::Agreement {
                    round,
                    bid,
                    description,
                    utility,
                });
            }
            Action::Offer(bid) => {
                tracing::debug!(round, bid = %scenario.domain.describe(&bid), "agent offered");
                last_offer = Some(bid);
            }
        }
        timeline.advance();
    }

    agent.receive_message(None, &Message::EndNegotiation);
    tracing::info!(rounds = scenario.rounds, "deadline reached without agreement");
    Ok(Outcome::NoAgreement {
        rounds: scenario.rounds,
        last_offer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpponentConfig;

    #[test]
    fn offer_trace_repeats_last_offer() {
        let opponent = ScriptedOpponent {
            id: PartyId::from("x"),
            offers: vec![Bid::new(vec![0]), Bid::new(vec![1])],
        };
        assert_eq!(opponent.offer_at(0), &Bid::new(vec![0]));
        assert_eq!(opponent.offer_at(1), &Bid::new(vec![1]));
        assert_eq!(opponent.offer_at(50), &Bid::new(vec![1]));
    }

    #[test]
    fn default_scenario_resolves() {
        let scenario = Scenario::from_config(&Config::default()).unwrap();
        assert_eq!(scenario.domain.issue_count(), 3);
        assert_eq!(scenario.opponents.len(), 1);
        assert_eq!(scenario.rounds, 180);
    }

    #[test]
    fn unknown_value_in_trace_is_rejected() {
        let mut config = Config::default();
        config.opponents = vec![OpponentConfig {
            id: "bad".into(),
            offers: vec![vec!["800".into(), "64gb".into(), "1y".into()]],
        }];
        assert!(matches!(
            Scenario::from_config(&config),
            Err(SimError::Domain(_))
        ));
    }

    #[test]
    fn empty_trace_is_rejected() {
        let mut config = Config::default();
        config.opponents = vec![OpponentConfig {
            id: "silent".into(),
            offers: vec![],
        }];
        assert!(matches!(
            Scenario::from_config(&config),
            Err(SimError::Scenario(_))
        ));
    }
}
