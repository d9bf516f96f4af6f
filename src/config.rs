//! Run configuration read from the environment.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::TICK_MS;

/// Settings for one terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for the piece picker. Same seed, same sequence of pieces.
    pub seed: u32,
    /// Milliseconds between gravity steps (never 0).
    pub tick_ms: u32,
    /// Where to append JSON-lines game events; `None` disables the log.
    pub log_path: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl RunConfig {
    /// Read `BLOCKFALL_SEED`, `BLOCKFALL_TICK_MS` and `BLOCKFALL_LOG_PATH`.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RunConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(time_seed);

        let tick_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(TICK_MS)
            .max(1);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            seed,
            tick_ms,
            log_path,
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_reads_all_variables() {
        let cfg = RunConfig::from_lookup(vars(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_TICK_MS", "250"),
            ("BLOCKFALL_LOG_PATH", " /tmp/blockfall.jsonl "),
        ]));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.tick_ms, 250);
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/blockfall.jsonl"));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = RunConfig::from_lookup(vars(&[
            ("BLOCKFALL_SEED", "7"),
            ("BLOCKFALL_TICK_MS", "fast"),
            ("BLOCKFALL_LOG_PATH", "   "),
        ]));
        assert_eq!(cfg.tick_ms, TICK_MS);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let cfg = RunConfig::from_lookup(vars(&[("BLOCKFALL_TICK_MS", "0")]));
        assert_eq!(cfg.tick_ms, 1);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let cfg = RunConfig::from_env();
        assert!(cfg.tick_ms >= 1);
    }
}
