//! Replay configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use crate::{ReplayError, Result};

/// Replay configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `REPLAY_BATCH_LIMIT`: page size of every feed fetch (default: `10`)
/// - `REPLAY_POLL_INTERVAL_MS`: delay between projection steps (default: `50`)
/// - `REPLAY_FEED_SIZE`: number of ticks the producer appends (default: `100`)
/// - `REPLAY_SENSORS`: number of distinct sensors in the feed (default: `4`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub batch_limit: usize,
    pub poll_interval_ms: u64,
    pub feed_size: u64,
    pub sensors: u64,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            batch_limit: parse_var(&lookup, "REPLAY_BATCH_LIMIT", defaults.batch_limit)?,
            poll_interval_ms: parse_var(
                &lookup,
                "REPLAY_POLL_INTERVAL_MS",
                defaults.poll_interval_ms,
            )?,
            feed_size: parse_var(&lookup, "REPLAY_FEED_SIZE", defaults.feed_size)?,
            sensors: parse_var(&lookup, "REPLAY_SENSORS", defaults.sensors)?,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects values a replay cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_limit == 0 {
            return Err(ReplayError::Config(
                "REPLAY_BATCH_LIMIT must be at least 1".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ReplayError::Config(
                "REPLAY_POLL_INTERVAL_MS must be at least 1".to_string(),
            ));
        }
        if self.sensors == 0 {
            return Err(ReplayError::Config(
                "REPLAY_SENSORS must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_limit: 10,
            poll_interval_ms: 50,
            feed_size: 100,
            sensors: 4,
            log_level: "info".to_string(),
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ReplayError::Config(format!("{name}={raw:?}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.batch_limit, 10);
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.feed_size, 100);
        assert_eq!(config.sensors, 4);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_vars_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("REPLAY_BATCH_LIMIT", "25"),
            ("REPLAY_POLL_INTERVAL_MS", " 5 "),
            ("REPLAY_SENSORS", "2"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.batch_limit, 25);
        assert_eq!(config.poll_interval(), Duration::from_millis(5));
        assert_eq!(config.sensors, 2);
        assert_eq!(config.feed_size, 100);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        let err = Config::from_lookup(lookup(&[("REPLAY_FEED_SIZE", "lots")])).unwrap_err();
        assert!(matches!(err, ReplayError::Config(_)));
        assert!(err.to_string().contains("REPLAY_FEED_SIZE"));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let err = Config::from_lookup(lookup(&[("REPLAY_POLL_INTERVAL_MS", "0")])).unwrap_err();
        assert!(err.to_string().contains("REPLAY_POLL_INTERVAL_MS"));
    }

    #[test]
    fn test_zero_batch_limit_is_rejected() {
        let err = Config::from_lookup(lookup(&[("REPLAY_BATCH_LIMIT", "0")])).unwrap_err();
        assert!(matches!(err, ReplayError::Config(_)));
    }
}
