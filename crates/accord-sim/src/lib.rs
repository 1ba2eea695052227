//! Replay harness for the accord bidding strategy.
//!
//! Loads a scenario (issues, our preferences, scripted counterpart offer
//! traces, strategy tuning) from TOML and drives one [`Negotiator`] through
//! it round by round until it accepts or the round deadline passes. The
//! harness only feeds offers and asks for decisions; it is not a protocol
//! engine.
//!
//! [`Negotiator`]: accord_strategy::Negotiator

pub mod config;
mod error;
mod replay;

pub use config::{load_config, Config, ConfigError};
pub use error::SimError;
pub use replay::{run_scenario, Outcome, Scenario, ScriptedOpponent};
