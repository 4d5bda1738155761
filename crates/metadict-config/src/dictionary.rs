use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

/// Settings of the bundled static dictionary engine
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Register the static engine with the embedded word list
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Extra word lists merged over the embedded one
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            additional_paths: vec![],
        }
    }
}

impl DictionaryConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("METADICT_STATIC_DICTIONARY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_enabled);

        // Paths separated like $PATH entries
        let additional_paths = env::var("METADICT_DICTIONARY_PATHS")
            .map(|v| {
                v.split(if cfg!(windows) { ';' } else { ':' })
                    .filter(|p| !p.trim().is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            enabled,
            additional_paths,
        }
    }
}
