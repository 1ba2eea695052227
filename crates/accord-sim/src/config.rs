//! Scenario configuration loading from file and environment variables.

use accord_strategy::StrategyConfig;
use serde::Deserialize;
use thiserror::Error;

/// Top-level replay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Bidding strategy tuning.
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Negotiable issues with our own preferences over them.
    #[serde(default = "default_issues")]
    pub issues: Vec<IssueConfig>,

    /// Scripted counterparts.
    #[serde(default = "default_opponents")]
    pub opponents: Vec<OpponentConfig>,
}

/// Session parameters handed to the agent at start-up.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seed for the agent's random source.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Round deadline.
    #[serde(default = "default_rounds")]
    pub rounds: u32,

    /// Identity the agent negotiates under.
    #[serde(default = "default_party_id")]
    pub party_id: String,
}

/// One issue and our evaluation of each of its values.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueConfig {
    pub name: String,

    /// Relative importance; weights are normalised across issues.
    #[serde(default = "default_weight")]
    pub weight: f64,

    pub values: Vec<ValueConfig>,
}

/// A value of an issue with our evaluation of it in `[0, 1]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueConfig {
    pub name: String,
    pub evaluation: f64,
}

/// A scripted counterpart: it offers `offers` in order, repeating the last
/// one once the list runs out.
#[derive(Debug, Clone, Deserialize)]
pub struct OpponentConfig {
    pub id: String,

    /// Each offer lists one value name per issue, in issue order.
    pub offers: Vec<Vec<String>>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "accord_strategy=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_seed() -> u64 {
    42
}

fn default_rounds() -> u32 {
    180
}

fn default_party_id() -> String {
    "accord".to_string()
}

fn default_weight() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn value(name: &str, evaluation: f64) -> ValueConfig {
    ValueConfig {
        name: name.to_string(),
        evaluation,
    }
}

fn default_issues() -> Vec<IssueConfig> {
    vec![
        IssueConfig {
            name: "price".to_string(),
            weight: 0.5,
            values: vec![
                value("800", 1.0),
                value("1000", 0.8),
                value("1200", 0.55),
                value("1400", 0.25),
                value("1600", 0.0),
            ],
        },
        IssueConfig {
            name: "memory".to_string(),
            weight: 0.3,
            values: vec![value("8gb", 0.1), value("16gb", 0.6), value("32gb", 1.0)],
        },
        IssueConfig {
            name: "warranty".to_string(),
            weight: 0.2,
            values: vec![value("none", 0.0), value("1y", 0.5), value("3y", 1.0)],
        },
    ]
}

fn default_opponents() -> Vec<OpponentConfig> {
    let offer = |values: [&str; 3]| -> Vec<String> { values.iter().map(|v| v.to_string()).collect() };
    vec![OpponentConfig {
        id: "laptop-seller".to_string(),
        offers: vec![
            offer(["1600", "8gb", "none"]),
            offer(["1400", "8gb", "none"]),
            offer(["1400", "16gb", "none"]),
            offer(["1200", "16gb", "1y"]),
            offer(["1000", "16gb", "1y"]),
            offer(["1000", "32gb", "1y"]),
            offer(["800", "32gb", "1y"]),
        ],
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            strategy: StrategyConfig::default(),
            logging: LoggingConfig::default(),
            issues: default_issues(),
            opponents: default_opponents(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            rounds: default_rounds(),
            party_id: default_party_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `ACCORD_SEED` overrides `session.seed`
/// - `ACCORD_ROUNDS` overrides `session.rounds`
/// - `ACCORD_RESERVATION_VALUE` overrides `strategy.reservation_value`
/// - `ACCORD_LOG_LEVEL` overrides `logging.level`
/// - `ACCORD_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using built-in scenario");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(seed) = std::env::var("ACCORD_SEED") {
        if let Ok(parsed) = seed.parse() {
            config.session.seed = parsed;
        }
    }
    if let Ok(rounds) = std::env::var("ACCORD_ROUNDS") {
        if let Ok(parsed) = rounds.parse() {
            config.session.rounds = parsed;
        }
    }
    if let Ok(reservation) = std::env::var("ACCORD_RESERVATION_VALUE") {
        if let Ok(parsed) = reservation.parse() {
            config.strategy.reservation_value = parsed;
        }
    }
    if let Ok(level) = std::env::var("ACCORD_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("ACCORD_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}
