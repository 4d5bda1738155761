use std::fmt;
use std::sync::Arc;

use metadict_engine::{
    AutoTestSuite, EngineDescription, EngineError, FeatureSet, SearchEngine, SearchEngineProvider,
};

use crate::error::RegistryError;

/// A provider after registration: its descriptors, captured once, and the
/// engine instance shared by all steps planned against it
pub struct RegisteredEngine {
    description: EngineDescription,
    features: FeatureSet,
    provider: Arc<dyn SearchEngineProvider>,
    instance: Arc<dyn SearchEngine>,
}

impl RegisteredEngine {
    pub fn name(&self) -> &str {
        &self.description.engine_name
    }

    pub fn description(&self) -> &EngineDescription {
        &self.description
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn instance(&self) -> &Arc<dyn SearchEngine> {
        &self.instance
    }

    pub fn auto_test_suite(&self) -> Result<Option<AutoTestSuite>, EngineError> {
        self.provider.auto_test_suite()
    }
}

impl fmt::Debug for RegisteredEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredEngine")
            .field("name", &self.name())
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

/// Engines known to the core, in registration order.
///
/// Filled at startup and then shared read-only behind an `Arc`.
#[derive(Default)]
pub struct EngineRegistry {
    engines: Vec<Arc<RegisteredEngine>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn SearchEngineProvider>) -> Result<(), RegistryError> {
        let mut description = provider.description();
        description.engine_name = description.engine_name.trim().to_string();
        let name = description.engine_name.as_str();

        if name.is_empty() {
            return Err(RegistryError::EmptyEngineName);
        }
        if self.get(name).is_some() {
            return Err(RegistryError::DuplicateEngine(name.to_string()));
        }

        let features = provider.feature_set();
        let instance = provider.new_engine_instance();

        tracing::info!(
            "Registered engine '{}' ({} bilingual dictionaries, {} monolingual languages, self-test: {})",
            name,
            features.supported_bilingual_dictionaries().len(),
            features.supported_monolingual_languages().len(),
            features.supports_self_test()
        );

        self.engines.push(Arc::new(RegisteredEngine {
            description,
            features,
            provider,
            instance,
        }));

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RegisteredEngine>> {
        self.engines.iter().find(|engine| engine.name() == name)
    }

    pub fn engines(&self) -> &[Arc<RegisteredEngine>] {
        &self.engines
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
