use accord_space::{AdditiveUtilitySpace, RoundTimeline, SortedOutcomeSpace};
use accord_strategy::{
    NegotiationStrategy, Negotiator, SessionContext, StrategyConfig, UtilitySpace,
};
use accord_types::{Action, Bid, Domain, Issue, Message, PartyId};
use std::sync::Arc;

const ROUNDS: u32 = 100;

fn domain() -> Domain {
    let values = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Domain::new(vec![
        Issue::new("price", values(&["100", "200", "300", "400", "500"])),
        Issue::new("warranty", values(&["none", "1y", "2y", "3y"])),
        Issue::new("delivery", values(&["week", "month", "quarter"])),
    ])
}

fn buyer() -> AdditiveUtilitySpace {
    AdditiveUtilitySpace::new(
        domain(),
        vec![0.6, 0.3, 0.1],
        vec![
            vec![1.0, 0.75, 0.5, 0.25, 0.0],
            vec![0.0, 0.4, 0.8, 1.0],
            vec![1.0, 0.5, 0.0],
        ],
    )
    .expect("buyer profile should be valid")
}

struct Session {
    own: Arc<AdditiveUtilitySpace>,
    timeline: Arc<RoundTimeline>,
    agent: Negotiator,
}

fn session(seed: u64) -> Session {
    let own = Arc::new(buyer());
    let outcomes = SortedOutcomeSpace::new(&domain(), own.as_ref()).expect("small domain");
    let timeline = Arc::new(RoundTimeline::new(ROUNDS));
    let context = SessionContext {
        utility_space: own.clone(),
        outcome_space: Arc::new(outcomes),
        timeline: timeline.clone(),
        deadline: timeline.deadline(),
        seed,
        party_id: PartyId::from("buyer"),
    };
    let agent = Negotiator::init(context, StrategyConfig::default()).expect("default config");
    Session {
        own,
        timeline,
        agent,
    }
}

fn offer(bid: &Bid) -> Message {
    Message::from(Action::Offer(bid.clone()))
}

#[test]
fn opening_phase_always_offers_max_bid() {
    let mut s = session(1);
    let seller = PartyId::from("seller");
    let max = s.own.max_utility_bid().unwrap();

    for round in 0..20 {
        s.agent
            .receive_message(Some(&seller), &offer(&Bid::new(vec![round % 5, 0, 2])));
        let action = s.agent.choose_action().unwrap();
        assert_eq!(action, Action::Offer(max.clone()), "round {round}");
        s.timeline.advance();
    }
}

#[test]
fn offers_never_drop_below_threshold() {
    let mut s = session(2);
    let seller = PartyId::from("seller");
    let hard_line = Bid::new(vec![4, 0, 2]);

    for _ in 0..ROUNDS - 1 {
        s.agent.receive_message(Some(&seller), &offer(&hard_line));
        let threshold = s.agent.min_acceptable_utility();
        match s.agent.choose_action().unwrap() {
            Action::Offer(bid) => assert!(s.own.utility(&bid) >= threshold),
            Action::Accept(_) => panic!("a zero-utility offer must never be accepted"),
        }
        s.timeline.advance();
    }
}

#[test]
fn conceding_seller_reaches_agreement() {
    let mut s = session(3);
    let seller = PartyId::from("seller");
    let trace = [
        Bid::new(vec![4, 0, 2]),
        Bid::new(vec![3, 0, 2]),
        Bid::new(vec![3, 1, 1]),
        Bid::new(vec![2, 1, 1]),
        Bid::new(vec![1, 2, 1]),
        Bid::new(vec![0, 2, 0]),
        Bid::new(vec![0, 3, 0]),
    ];

    let mut agreement = None;
    for round in 0..ROUNDS - 1 {
        let bid = &trace[(round as usize / 10).min(trace.len() - 1)];
        s.agent.receive_message(Some(&seller), &offer(bid));
        if let Action::Accept(accepted) = s.agent.choose_action().unwrap() {
            agreement = Some(accepted);
            break;
        }
        s.timeline.advance();
    }

    let accepted = agreement.expect("the seller's final offers clear the threshold");
    assert!(s.own.utility(&accepted) > 0.75);
}

#[test]
fn stubborn_seller_lowers_threshold() {
    let mut patient = session(4);
    let mut stubborn = session(4);
    let seller = PartyId::from("seller");

    // Fewer offers than the stubbornness window: no signal.
    for _ in 0..10 {
        patient
            .agent
            .receive_message(Some(&seller), &offer(&Bid::new(vec![4, 0, 2])));
    }
    for _ in 0..40 {
        stubborn
            .agent
            .receive_message(Some(&seller), &offer(&Bid::new(vec![4, 0, 2])));
    }
    for _ in 0..50 {
        patient.timeline.advance();
        stubborn.timeline.advance();
    }

    let expected_patient = 0.5f64.log10() / 10.0 + 0.9;
    let expected_stubborn = 0.5f64.log10() / 7.0 + 0.9;
    assert!((patient.agent.min_acceptable_utility() - expected_patient).abs() < 1e-12);
    assert!((stubborn.agent.min_acceptable_utility() - expected_stubborn).abs() < 1e-12);
}

#[test]
fn multiple_opponents_are_tracked_separately() {
    let mut s = session(5);
    let a = PartyId::from("seller-a");
    let b = PartyId::from("seller-b");
    s.agent.receive_message(Some(&a), &offer(&Bid::new(vec![4, 0, 2])));
    s.agent.receive_message(Some(&b), &offer(&Bid::new(vec![3, 1, 2])));
    s.agent.receive_message(Some(&a), &offer(&Bid::new(vec![4, 1, 2])));

    assert_eq!(s.agent.opponent_count(), 2);
    assert_eq!(s.agent.opponent(&a).unwrap().observed(), 2);
    assert_eq!(s.agent.opponent(&b).unwrap().observed(), 1);
    assert_eq!(s.agent.last_received(), Some(&Bid::new(vec![4, 1, 2])));
}

#[test]
fn identical_seeds_replay_identically() {
    let play = |seed: u64| {
        let mut s = session(seed);
        let seller = PartyId::from("seller");
        let mut actions = Vec::new();
        for round in 0..60u32 {
            let bid = Bid::new(vec![4 - (round as usize / 15), 0, 2]);
            s.agent.receive_message(Some(&seller), &offer(&bid));
            actions.push(s.agent.choose_action().unwrap());
            s.timeline.advance();
        }
        actions
    };
    assert_eq!(play(9), play(9));
}
