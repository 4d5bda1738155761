use std::sync::Arc;

use metadict_config::Config;
use metadict_config::dictionary::DictionaryConfig;
use metadict_core::{EngineRegistry, MetadictCore, RegistryError};
use metadict_engine_static::StaticEngineProvider;

/// Owns the configured core for the lifetime of the process
pub struct AppController {
    core: MetadictCore,
    config: Config,
}

impl AppController {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let registry = build_registry(&config.dictionary)?;
        Ok(Self::with_registry(config, registry))
    }

    pub fn with_registry(config: Config, registry: EngineRegistry) -> Self {
        tracing::info!(
            "Starting with {} engine(s), {} strategy",
            registry.len(),
            if config.execution.sequential {
                "sequential"
            } else {
                "concurrent"
            }
        );
        let core = MetadictCore::from_config(registry, &config.execution);
        Self { core, config }
    }

    pub fn core(&self) -> &MetadictCore {
        &self.core
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every self-test once when configured to. Failures are logged,
    /// startup continues.
    pub async fn startup_self_test(&self) {
        if !self.config.self_test_on_startup {
            return;
        }

        for report in self.core.run_self_tests().await {
            if report.skipped {
                continue;
            }
            if report.is_success() {
                tracing::info!("Startup self-test of '{}' passed", report.engine_name);
            } else {
                tracing::warn!(
                    "Startup self-test of '{}': {} failed, {} errored{}",
                    report.engine_name,
                    report.failed(),
                    report.errored(),
                    report
                        .error
                        .as_deref()
                        .map(|e| format!(", suite error: {e}"))
                        .unwrap_or_default()
                );
            }
        }
    }
}

/// Registry holding the engines enabled by `dictionary`
pub fn build_registry(dictionary: &DictionaryConfig) -> Result<EngineRegistry, RegistryError> {
    let mut registry = EngineRegistry::new();

    if dictionary.enabled {
        let provider = StaticEngineProvider::with_additional_dicts(&dictionary.additional_paths);
        registry.register(Arc::new(provider))?;
    } else {
        tracing::warn!("Static dictionary disabled, no engine registered");
    }

    Ok(registry)
}
