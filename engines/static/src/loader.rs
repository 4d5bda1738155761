use std::path::Path;

use crate::dictionary::StaticDictionary;
use crate::error::StaticDictionaryError;

pub struct StaticDictionaryLoader;

impl StaticDictionaryLoader {
    /// Load the word list compiled into the binary
    pub fn load_embedded() -> Result<StaticDictionary, StaticDictionaryError> {
        let json = include_str!("../data/sample.json");
        tracing::info!("Loading embedded static dictionary...");
        let dict = StaticDictionary::from_json(json)?;
        tracing::info!(
            "Loaded {} dictionary entries, {} self-test(s)",
            dict.entry_count(),
            dict.self_tests().len()
        );
        Ok(dict)
    }

    pub fn load_from_file(path: &Path) -> Result<StaticDictionary, StaticDictionaryError> {
        tracing::info!("Loading static dictionary from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let dict = StaticDictionary::from_json(&json)?;
        tracing::info!("Loaded {} dictionary entries from file", dict.entry_count());
        Ok(dict)
    }

    /// Embedded list extended by every readable file in `additional_paths`.
    /// Unreadable files are logged and skipped.
    pub fn load_with_additional(additional_paths: &[String]) -> StaticDictionary {
        let mut dict = Self::load_embedded().unwrap_or_else(|e| {
            tracing::error!("Failed to load embedded dictionary: {}", e);
            tracing::warn!("Starting with empty dictionary");
            StaticDictionary::new()
        });

        for path in additional_paths {
            match Self::load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional dictionary from: {}", path);
                    dict = dict.merge(additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load dictionary from {}: {}", path, e);
                }
            }
        }

        dict
    }
}
