use std::path::Path;

use anyhow::Context;
use metadict_config::Config;

use crate::cli::Cli;

const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Resolve the configuration: the file given on the command line, else
/// `config.json` in the working directory, else the environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return Config::from_json_file(default_path)
            .with_context(|| format!("Failed to load repo default config {DEFAULT_CONFIG_FILE}"));
    }

    let config = Config::new();
    config.validate().context("Invalid METADICT_* environment settings")?;
    Ok(config)
}

/// Command line flags win over file and environment
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if cli.sequential {
        config.execution.sequential = true;
    }
    if cli.log_json {
        config.log_json = true;
    }
}
