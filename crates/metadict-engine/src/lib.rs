//! Boundary between the metadict core and the pluggable search engines.

pub mod autotest;
pub mod error;
pub mod feature;

pub use autotest::{AutoTestCase, AutoTestSuite};
pub use error::EngineError;
pub use feature::{FeatureSet, FeatureSetBuilder};

use std::sync::Arc;

use metadict_types::{BilingualQueryResult, Language, MonolingualQueryResult};
use serde::{Deserialize, Serialize};

/// Search engine wrapping one external dictionary source.
///
/// Instances must not keep per-query state: the core may call the same
/// instance from several steps at once.
#[async_trait::async_trait]
pub trait SearchEngine: Send + Sync {
    /// Translate `query` from `input` to `output`
    async fn execute_bilingual_query(
        &self,
        query: &str,
        input: &Language,
        output: &Language,
    ) -> Result<BilingualQueryResult, EngineError>;

    /// Describe `query` within a single language
    async fn execute_monolingual_query(
        &self,
        _query: &str,
        _language: &Language,
    ) -> Result<MonolingualQueryResult, EngineError> {
        Err(EngineError::Unsupported)
    }
}

/// Registration unit of an engine: what it can do and how to create it
pub trait SearchEngineProvider: Send + Sync {
    fn description(&self) -> EngineDescription;

    fn feature_set(&self) -> FeatureSet;

    /// Fresh, stateless engine instance
    fn new_engine_instance(&self) -> Arc<dyn SearchEngine>;

    /// Example queries with expected output. Only consulted when the
    /// feature set declares self-test support.
    fn auto_test_suite(&self) -> Result<Option<AutoTestSuite>, EngineError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDescription {
    /// Unique name, used as the engine's identity in the registry
    pub engine_name: String,
    pub author_name: Option<String>,
    pub backend_name: Option<String>,
    pub backend_link: Option<String>,
}

impl EngineDescription {
    pub fn new(engine_name: impl Into<String>) -> Self {
        Self {
            engine_name: engine_name.into(),
            author_name: None,
            backend_name: None,
            backend_link: None,
        }
    }
}
