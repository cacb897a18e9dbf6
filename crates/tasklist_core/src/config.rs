//! Store configuration.
//!
//! # Responsibility
//! - Describe construction-time knobs for `CollectionStore`.
//! - Load overrides from `TASKLIST_*` environment variables.
//!
//! # Invariants
//! - Missing or blank values fall back to defaults.
//! - Unknown values are rejected instead of silently ignored.

use crate::model::filter::FilterKind;
use crate::store::id_gen::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Env var selecting the id strategy (`random|sequential`).
pub const ENV_ID_STRATEGY: &str = "TASKLIST_ID_STRATEGY";
/// Env var selecting the filter a fresh store starts with.
pub const ENV_INITIAL_FILTER: &str = "TASKLIST_INITIAL_FILTER";

/// How the store mints record ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// uuid v4.
    #[default]
    Random,
    /// Monotonic counter, handy for deterministic tests and demos.
    Sequential,
}

impl IdStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sequential => "sequential",
        }
    }

    /// Builds the generator backing this strategy.
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            Self::Random => Box::new(RandomIdGenerator),
            Self::Sequential => Box::new(SequentialIdGenerator::new()),
        }
    }
}

/// Construction-time options for a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub id_strategy: IdStrategy,
    pub initial_filter: FilterKind,
}

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for {key}; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

impl StoreConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, keyed by the `TASKLIST_*` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(ENV_ID_STRATEGY)) {
            config.id_strategy = match raw.to_ascii_lowercase().as_str() {
                "random" => IdStrategy::Random,
                "sequential" => IdStrategy::Sequential,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_ID_STRATEGY,
                        value: raw,
                        expected: "random|sequential",
                    })
                }
            };
        }

        if let Some(raw) = non_blank(lookup(ENV_INITIAL_FILTER)) {
            config.initial_filter = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_INITIAL_FILTER,
                value: raw.clone(),
                expected: "all|active|completed",
            })?;
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
