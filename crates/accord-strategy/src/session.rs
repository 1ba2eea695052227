//! Per-session controller tying the strategy components together.

use accord_types::{Action, Bid, Message, PartyId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::acceptance::{AcceptancePolicy, Verdict};
use crate::candidate::BidGenerator;
use crate::concession::{aggregate_stubbornness, ConcessionScheduler};
use crate::config::StrategyConfig;
use crate::env::SessionContext;
use crate::error::StrategyError;
use crate::opponent::OpponentModel;

/// The capability a negotiation platform drives once per session.
pub trait NegotiationStrategy: Sized {
    /// Starts a session. Fails only on invalid configuration.
    fn init(context: SessionContext, config: StrategyConfig) -> Result<Self, StrategyError>;

    /// Delivers another party's action, or the end of the session.
    fn receive_message(&mut self, sender: Option<&PartyId>, message: &Message);

    /// Decides this agent's action for the current turn.
    fn choose_action(&mut self) -> Result<Action, StrategyError>;

    /// Short human-readable description of the strategy.
    fn description(&self) -> &str;
}

/// Where the controller is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingTurn,
    Deciding,
    Offered,
    Accepted,
    Terminated,
}

/// Time-conceding negotiator with frequency-based opponent modelling.
pub struct Negotiator {
    context: SessionContext,
    config: StrategyConfig,
    scheduler: ConcessionScheduler,
    generator: BidGenerator,
    acceptance: AcceptancePolicy,
    rng: StdRng,
    last_received: Option<Bid>,
    opponents: BTreeMap<PartyId, OpponentModel>,
    round: u64,
    phase: SessionPhase,
    /// Highest self-utility bid computed so far; the fallback offer when the
    /// environment fails.
    best_known: Option<(f64, Bid)>,
}

impl NegotiationStrategy for Negotiator {
    fn init(context: SessionContext, config: StrategyConfig) -> Result<Self, StrategyError> {
        config.validate()?;
        tracing::info!(
            party = %context.party_id,
            deadline = %context.deadline,
            seed = context.seed,
            "negotiation session started"
        );
        Ok(Self {
            scheduler: ConcessionScheduler::new(&config),
            generator: BidGenerator::new(config.candidate_count, config.max_sampling_attempts),
            acceptance: AcceptancePolicy,
            rng: StdRng::seed_from_u64(context.seed),
            last_received: None,
            opponents: BTreeMap::new(),
            round: 0,
            phase: SessionPhase::AwaitingTurn,
            best_known: None,
            context,
            config,
        })
    }

    fn receive_message(&mut self, sender: Option<&PartyId>, message: &Message) {
        if self.phase == SessionPhase::Terminated {
            return;
        }

        match message {
            Message::EndNegotiation => {
                tracing::info!(round = self.round, "negotiation ended by protocol");
                self.phase = SessionPhase::Terminated;
            }
            Message::Action {
                action: Action::Offer(bid),
            } => {
                let Some(sender) = sender else {
                    tracing::debug!("ignoring offer without a sender");
                    return;
                };
                if *sender == self.context.party_id {
                    return;
                }
                self.last_received = Some(bid.clone());
                let learning_rate = self.config.weight_learning_rate;
                self.opponents
                    .entry(sender.clone())
                    .or_insert_with(|| {
                        tracing::info!(opponent = %sender, "tracking new opponent");
                        OpponentModel::new(learning_rate)
                    })
                    .observe(bid.clone());
                self.phase = SessionPhase::AwaitingTurn;
            }
            Message::Action {
                action: Action::Accept(_),
            } => {
                tracing::debug!(sender = ?sender.map(PartyId::as_str), "opponent accepted");
                self.phase = SessionPhase::AwaitingTurn;
            }
        }
    }

    fn choose_action(&mut self) -> Result<Action, StrategyError> {
        if self.phase == SessionPhase::Terminated {
            return Err(StrategyError::SessionEnded);
        }

        self.round += 1;
        self.phase = SessionPhase::Deciding;
        let t = self.context.timeline.elapsed();

        let decision = self.decide(t);
        self.phase = match &decision {
            Ok(Action::Accept(_)) => SessionPhase::Accepted,
            Ok(Action::Offer(_)) => SessionPhase::Offered,
            Err(_) => SessionPhase::AwaitingTurn,
        };
        decision
    }

    fn description(&self) -> &str {
        "accord time-conceding negotiator"
    }
}

impl Negotiator {
    fn decide(&mut self, t: f64) -> Result<Action, StrategyError> {
        if self.scheduler.in_opening_phase(t) {
            let bid = self.max_utility_bid()?;
            tracing::info!(round = self.round, t, "opening phase, offering maximum-utility bid");
            return Ok(Action::Offer(bid));
        }

        let threshold = self.min_acceptable_utility_at(t);
        if let Some(received) = &self.last_received {
            tracing::debug!(
                utility = self.context.utility_space.utility(received),
                "last received bid"
            );
        }

        let opponents: Vec<&OpponentModel> = self.opponents.values().collect();
        let generated = self.generator.generate(
            threshold,
            self.context.utility_space.as_ref(),
            self.context.outcome_space.as_ref(),
            &opponents,
            &mut self.rng,
        );
        let proposal = match generated {
            Ok(candidate) => {
                self.remember(candidate.own_utility, &candidate.bid);
                candidate.bid
            }
            Err(e) if self.best_known.is_none() => {
                tracing::warn!(
                    error = %e,
                    threshold,
                    "no bid known yet, offering maximum-utility bid instead"
                );
                self.max_utility_bid()?
            }
            Err(e) => self.fallback(e)?,
        };

        let verdict = self.acceptance.evaluate(
            self.context.utility_space.as_ref(),
            self.last_received.as_ref(),
            &proposal,
            threshold,
        );

        match (verdict, &self.last_received) {
            (Verdict::Accept, Some(received)) => {
                tracing::info!(round = self.round, t, threshold, "accepting last offer");
                Ok(Action::Accept(received.clone()))
            }
            _ => {
                tracing::info!(
                    round = self.round,
                    t,
                    threshold,
                    utility = self.context.utility_space.utility(&proposal),
                    "offering generated bid"
                );
                Ok(Action::Offer(proposal))
            }
        }
    }

    /// Queries the maximum-utility bid, retrying once before falling back.
    fn max_utility_bid(&mut self) -> Result<Bid, StrategyError> {
        let space = &self.context.utility_space;
        let queried = space.max_utility_bid().or_else(|e| {
            tracing::warn!(error = %e, "maximum-utility query failed, retrying once");
            space.max_utility_bid()
        });
        match queried {
            Ok(bid) => {
                let utility = space.utility(&bid);
                self.remember(utility, &bid);
                Ok(bid)
            }
            Err(e) => self.fallback(e.into()),
        }
    }

    fn remember(&mut self, utility: f64, bid: &Bid) {
        let better = self
            .best_known
            .as_ref()
            .map_or(true, |(known, _)| utility > *known);
        if better {
            self.best_known = Some((utility, bid.clone()));
        }
    }

    fn fallback(&self, error: StrategyError) -> Result<Bid, StrategyError> {
        match &self.best_known {
            Some((utility, bid)) => {
                tracing::warn!(error = %error, utility, "falling back to best known bid");
                Ok(bid.clone())
            }
            None => {
                tracing::error!(error = %error, "decision failed with no fallback bid");
                Err(error)
            }
        }
    }

    fn stubbornness_signal(&self) -> f64 {
        let window = self.config.stubbornness_window;
        let scale = self.config.concession_scale;
        let own = self.context.utility_space.as_ref();
        aggregate_stubbornness(
            self.opponents
                .values()
                .map(|model| model.stubbornness(window, scale, own)),
        )
    }

    fn min_acceptable_utility_at(&self, t: f64) -> f64 {
        let stubbornness = self.stubbornness_signal();
        let threshold = self.scheduler.min_acceptable_utility(t, stubbornness);
        tracing::debug!(t, stubbornness, threshold, "concession threshold");
        threshold
    }

    /// Current concession threshold, read from the session timeline.
    pub fn min_acceptable_utility(&self) -> f64 {
        self.min_acceptable_utility_at(self.context.timeline.elapsed())
    }

    /// Decision cycles run so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn last_received(&self) -> Option<&Bid> {
        self.last_received.as_ref()
    }

    pub fn opponent(&self, id: &PartyId) -> Option<&OpponentModel> {
        self.opponents.get(id)
    }

    pub fn opponent_count(&self) -> usize {
        self.opponents.len()
    }
}
