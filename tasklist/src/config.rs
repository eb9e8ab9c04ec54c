//! Configuration management for the task list shell.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unlike a missing variable, a present but unusable one is an error.

use crate::error::ConfigError;
use std::env;
use std::sync::Arc;
use tasklist_core::environment::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
use tasklist_runtime::StoreConfig;

const LOG_KEY: &str = "TASKLIST_LOG";
const ID_STRATEGY_KEY: &str = "TASKLIST_ID_STRATEGY";
const MAX_FEEDBACK_KEY: &str = "TASKLIST_MAX_FEEDBACK";

const DEFAULT_LOG_FILTER: &str = "tasklist=info,tasklist_runtime=info";

/// How new task ids are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Random v4 UUIDs
    #[default]
    Uuid,
    /// 1, 2, 3, ... encoded as UUIDs
    Sequential,
}

impl std::str::FromStr for IdStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "sequential" => Ok(Self::Sequential),
            _ => Err(ConfigError::InvalidValue {
                key: ID_STRATEGY_KEY,
                value: s.to_string(),
                expected: "`uuid` or `sequential`",
            }),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tracing filter directives
    pub log_filter: String,
    /// Id generation for new tasks
    pub id_strategy: IdStrategy,
    /// Nested feedback actions allowed per `send` (at least 1)
    pub max_feedback_actions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            id_strategy: IdStrategy::default(),
            max_feedback_actions: StoreConfig::default().max_feedback_actions(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// `TASKLIST_LOG` falls back to `RUST_LOG`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let log_filter = lookup(LOG_KEY)
            .or_else(|| lookup("RUST_LOG"))
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let id_strategy = match lookup(ID_STRATEGY_KEY) {
            Some(value) => value.parse()?,
            None => defaults.id_strategy,
        };

        let max_feedback_actions = match lookup(MAX_FEEDBACK_KEY) {
            Some(value) => {
                let parsed = value.trim().parse::<usize>();
                match parsed {
                    Ok(limit) if limit > 0 => limit,
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            key: MAX_FEEDBACK_KEY,
                            value,
                            expected: "a positive integer",
                        });
                    },
                }
            },
            None => defaults.max_feedback_actions,
        };

        Ok(Self {
            log_filter,
            id_strategy,
            max_feedback_actions,
        })
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_feedback_actions)
    }

    /// The id generator selected by `id_strategy`
    #[must_use]
    pub fn id_generator(&self) -> Arc<dyn IdGenerator> {
        match self.id_strategy {
            IdStrategy::Uuid => Arc::new(UuidIdGenerator),
            IdStrategy::Sequential => Arc::new(SequentialIdGenerator::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
        assert_eq!(config.store_config(), StoreConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("TASKLIST_LOG", "tasklist=debug"),
            ("TASKLIST_ID_STRATEGY", "Sequential"),
            ("TASKLIST_MAX_FEEDBACK", " 4 "),
        ]))
        .unwrap();

        assert_eq!(config.log_filter, "tasklist=debug");
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
        assert_eq!(config.store_config().max_feedback_actions(), 4);
    }

    #[test]
    fn log_filter_falls_back_to_rust_log() {
        let config = Config::from_lookup(lookup_from(&[("RUST_LOG", "warn")])).unwrap();
        assert_eq!(config.log_filter, "warn");

        let config = Config::from_lookup(lookup_from(&[("TASKLIST_LOG", "debug"), ("RUST_LOG", "warn")])).unwrap();
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_unknown_id_strategy() {
        let error = Config::from_lookup(lookup_from(&[("TASKLIST_ID_STRATEGY", "random")])).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidValue {
                key: "TASKLIST_ID_STRATEGY",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_feedback_limit() {
        for bad in ["-1", "0", "lots"] {
            let error = Config::from_lookup(lookup_from(&[("TASKLIST_MAX_FEEDBACK", bad)])).unwrap_err();
            assert_eq!(
                error,
                ConfigError::InvalidValue {
                    key: "TASKLIST_MAX_FEEDBACK",
                    value: bad.to_string(),
                    expected: "a positive integer",
                }
            );
        }
    }

    #[test]
    fn sequential_strategy_counts_from_one() {
        let config = Config {
            id_strategy: IdStrategy::Sequential,
            ..Config::default()
        };
        let ids = config.id_generator();
        assert_eq!(ids.next_id(), Uuid::from_u128(1));
        assert_eq!(ids.next_id(), Uuid::from_u128(2));
    }
}
