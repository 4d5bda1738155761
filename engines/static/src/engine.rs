use std::sync::Arc;

use async_trait::async_trait;
use metadict_engine::{EngineError, SearchEngine};
use metadict_types::{BilingualQueryResult, Language, MonolingualQueryResult};

use crate::dictionary::StaticDictionary;

/// Answers queries from a shared [`StaticDictionary`]. Holds no per-query
/// state, so one instance serves any number of concurrent steps.
#[derive(Debug, Clone)]
pub struct StaticEngine {
    dictionary: Arc<StaticDictionary>,
}

impl StaticEngine {
    pub fn new(dictionary: Arc<StaticDictionary>) -> Self {
        Self { dictionary }
    }
}

#[async_trait]
impl SearchEngine for StaticEngine {
    async fn execute_bilingual_query(
        &self,
        query: &str,
        input: &Language,
        output: &Language,
    ) -> Result<BilingualQueryResult, EngineError> {
        let result = self.dictionary.lookup_bilingual(query, input, output);
        tracing::debug!(
            "Static lookup '{}' {}>{}: {} entries, {} synonym entries",
            query,
            input,
            output,
            result.bilingual_entries.len(),
            result.synonym_entries.len()
        );
        Ok(result)
    }

    async fn execute_monolingual_query(
        &self,
        query: &str,
        language: &Language,
    ) -> Result<MonolingualQueryResult, EngineError> {
        let result = self.dictionary.lookup_monolingual(query, language);
        tracing::debug!(
            "Static lookup '{}' {}: {} entries",
            query,
            language,
            result.monolingual_entries.len()
        );
        Ok(result)
    }
}
