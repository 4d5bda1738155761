use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_max_in_flight() -> usize {
    8
}

fn default_step_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Maximum number of engine calls running at the same time
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    /// Deadline for a single engine call
    #[serde(default = "default_step_timeout_ms")]
    pub step_timeout_ms: u64,
    /// Deadline for a whole query plan, unbounded when absent
    #[serde(default)]
    pub plan_timeout_ms: Option<u64>,
    /// Run steps one after another in plan order
    #[serde(default)]
    pub sequential: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
            step_timeout_ms: default_step_timeout_ms(),
            plan_timeout_ms: None,
            sequential: false,
        }
    }
}

impl ExecutionConfig {
    pub fn from_env() -> Self {
        let max_in_flight = env::var("METADICT_MAX_IN_FLIGHT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or_else(default_max_in_flight);

        let step_timeout_ms = env::var("METADICT_STEP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_step_timeout_ms);

        let plan_timeout_ms = env::var("METADICT_PLAN_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok());

        let sequential = env::var("METADICT_SEQUENTIAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            max_in_flight,
            step_timeout_ms,
            plan_timeout_ms,
            sequential,
        }
    }

    pub fn step_timeout(&self) -> Duration {
        Duration::from_millis(self.step_timeout_ms)
    }

    pub fn plan_timeout(&self) -> Option<Duration> {
        self.plan_timeout_ms.map(Duration::from_millis)
    }
}
