use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::execution::ExecutionConfig;

pub mod dictionary;
pub mod execution;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub execution: ExecutionConfig,
    pub dictionary: DictionaryConfig,

    /// Run every engine self-test once before serving queries
    pub self_test_on_startup: bool,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    /// Configuration from `METADICT_*` environment variables
    pub fn new() -> Self {
        let self_test_on_startup = env::var("METADICT_SELF_TEST_ON_STARTUP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        let log_json = env::var("METADICT_LOG_JSON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Config {
            execution: ExecutionConfig::from_env(),
            dictionary: DictionaryConfig::from_env(),

            self_test_on_startup,
            log_json,
        }
    }

    /// Load a JSON config file; missing fields fall back to defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.execution.max_in_flight == 0 {
            return Err(ConfigError::Invalid {
                field: "execution.max_in_flight",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.execution.step_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "execution.step_timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.execution.plan_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                field: "execution.plan_timeout_ms",
                reason: "must be greater than 0 when set".to_string(),
            });
        }
        Ok(())
    }
}
