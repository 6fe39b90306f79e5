//! Scheduler configuration.

use serde::Deserialize;
use std::env;

/// Limits and starting time for a [`VirtualScheduler`](crate::VirtualScheduler).
///
/// Missing fields fall back to [`SchedulerConfig::default`] when deserialising.
///
/// # Examples
///
/// ```
/// use async_runtime::SchedulerConfig;
///
/// let config: SchedulerConfig = serde_json::from_str(r#"{"max_turns": 50}"#).unwrap();
/// assert_eq!(config.max_turns, 50);
/// assert_eq!(config.max_microtasks, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Virtual time the clock starts at
    pub start_ms: u64,
    /// Timer executions `run_all` allows before reporting a deadlock
    pub max_turns: usize,
    /// Microtask executions a single drain allows before reporting a deadlock
    pub max_microtasks: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            start_ms: 0,
            max_turns: 20,
            max_microtasks: 10_000,
        }
    }
}

impl SchedulerConfig {
    /// Loads the configuration from `SCHEDULER_START_MS`,
    /// `SCHEDULER_MAX_TURNS` and `SCHEDULER_MAX_MICROTASKS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`. Missing or unparsable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            start_ms: lookup("SCHEDULER_START_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.start_ms),
            max_turns: lookup("SCHEDULER_MAX_TURNS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_turns),
            max_microtasks: lookup("SCHEDULER_MAX_MICROTASKS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_microtasks),
        }
    }

    /// Sets the timer turn limit.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Sets the per-drain microtask limit.
    pub fn with_max_microtasks(mut self, max_microtasks: usize) -> Self {
        self.max_microtasks = max_microtasks;
        self
    }
}
