use std::sync::Arc;

use metadict_engine::{
    AutoTestSuite, EngineDescription, EngineError, FeatureSet, SearchEngine, SearchEngineProvider,
};

use crate::dictionary::StaticDictionary;
use crate::engine::StaticEngine;
use crate::loader::StaticDictionaryLoader;

pub const ENGINE_NAME: &str = "static";

/// Provider of the offline reference engine. Capabilities and self-tests
/// are derived from the loaded word list.
pub struct StaticEngineProvider {
    dictionary: Arc<StaticDictionary>,
    features: FeatureSet,
}

impl StaticEngineProvider {
    /// Provider backed by the embedded word list only
    pub fn new() -> Self {
        Self::with_additional_dicts(&[])
    }

    pub fn with_additional_dicts(additional_paths: &[String]) -> Self {
        Self::from_dictionary(StaticDictionaryLoader::load_with_additional(additional_paths))
    }

    pub fn from_dictionary(dictionary: StaticDictionary) -> Self {
        let bilingual = dictionary.bilingual_dictionaries();
        let monolingual = dictionary.monolingual_languages();
        let provides_bilingual = !bilingual.is_empty();
        let provides_monolingual = !monolingual.is_empty();

        let features = bilingual
            .into_iter()
            .fold(FeatureSet::builder(), |builder, dictionary| {
                builder.add_bilingual_dictionary(dictionary)
            });
        let features = monolingual
            .into_iter()
            .fold(features, |builder, language| {
                builder.add_monolingual_language(language)
            })
            .provides_bilingual_entries(provides_bilingual)
            .provides_monolingual_entries(provides_monolingual)
            .provides_alternatives(true)
            .provides_synonyms_on_bilingual_query(dictionary.has_synonyms())
            .supports_self_test(!dictionary.self_tests().is_empty())
            .build();

        Self {
            dictionary: Arc::new(dictionary),
            features,
        }
    }
}

impl Default for StaticEngineProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngineProvider for StaticEngineProvider {
    fn description(&self) -> EngineDescription {
        EngineDescription {
            author_name: Some("metadict".to_string()),
            backend_name: Some("Embedded word list".to_string()),
            ..EngineDescription::new(ENGINE_NAME)
        }
    }

    fn feature_set(&self) -> FeatureSet {
        self.features.clone()
    }

    fn new_engine_instance(&self) -> Arc<dyn SearchEngine> {
        Arc::new(StaticEngine::new(self.dictionary.clone()))
    }

    fn auto_test_suite(&self) -> Result<Option<AutoTestSuite>, EngineError> {
        if self.dictionary.self_tests().is_empty() {
            return Ok(None);
        }
        Ok(Some(AutoTestSuite::new(self.dictionary.self_tests().to_vec())))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use metadict_core::{AutoTestState, EngineRegistry, MetadictCore, SequentialExecutionStrategy};
    use metadict_engine::AutoTestCase;
    use metadict_types::{BilingualQueryResult, EngineQueryResult, Language, StepStatus};

    use super::*;

    fn lang(code: &str) -> Language {
        Language::parse(code).unwrap()
    }

    fn core(provider: StaticEngineProvider) -> MetadictCore {
        let mut registry = EngineRegistry::new();
        registry.register(Arc::new(provider)).unwrap();
        MetadictCore::new(
            registry,
            Arc::new(SequentialExecutionStrategy::new(Duration::from_secs(5))),
        )
    }

    #[test]
    fn test_features_follow_embedded_data() {
        let provider = StaticEngineProvider::new();
        let features = provider.feature_set();

        assert!(features.supports_bilingual(&lang("de"), &lang("en")));
        assert!(features.supports_bilingual(&lang("en"), &lang("de")));
        assert!(features.supports_bilingual(&lang("fr"), &lang("de")));
        assert!(!features.supports_bilingual(&lang("de"), &lang("it")));
        assert!(features.supports_monolingual(&lang("de")));
        assert!(features.supports_self_test());
        assert_eq!(provider.description().engine_name, ENGINE_NAME);
    }

    #[tokio::test]
    async fn test_embedded_suite_passes() {
        let reports = core(StaticEngineProvider::new()).run_self_tests().await;

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert!(!report.cases.is_empty());
        for case in &report.cases {
            assert_eq!(
                case.state,
                AutoTestState::Passed,
                "case {} '{}' in {}: {:?}",
                case.index,
                case.query,
                case.target,
                case.message
            );
        }
        assert!(report.is_success());
    }

    /// A suite whose expectation no longer matches the data fails
    #[tokio::test]
    async fn test_changed_expectation_fails() {
        let mut dictionary = StaticDictionaryLoader::load_embedded().unwrap();
        let changed = AutoTestCase::bilingual(
            "Haus",
            metadict_types::QueryTarget::parse("de>en").unwrap(),
            BilingualQueryResult::default(),
        );
        dictionary = dictionary.merge(StaticDictionary::from_parts(
            vec![],
            vec![],
            vec![],
            vec![changed],
        ));
        let reports = core(StaticEngineProvider::from_dictionary(dictionary))
            .run_self_tests()
            .await;

        let last = reports[0].cases.last().unwrap();
        assert_eq!(last.state, AutoTestState::Failed);
        assert_eq!(reports[0].failed(), 1);
    }

    #[tokio::test]
    async fn test_query_through_core() {
        let response = core(StaticEngineProvider::new())
            .query("haus", "de-en")
            .await
            .unwrap();

        assert!(response.diagnostics.iter().all(|d| d.status == StepStatus::Success));
        let outputs: Vec<&str> = response
            .bilingual_entries
            .iter()
            .map(|entry| entry.output.general_form())
            .collect();
        assert_eq!(outputs, vec!["house", "home"]);
        assert_eq!(response.grouped_bilingual_entries.len(), 1);
        assert!(!response.synonym_entries.is_empty());
    }

    #[tokio::test]
    async fn test_engine_answers_concurrent_steps() {
        let provider = StaticEngineProvider::new();
        let engine = provider.new_engine_instance();

        let lookups = ["Haus", "Baum", "essen", "Hausaufgabe"].map(|word| {
            let engine = engine.clone();
            tokio::spawn(async move {
                let result = engine
                    .execute_bilingual_query(word, &lang("de"), &lang("en"))
                    .await
                    .unwrap();
                (word, result)
            })
        });

        for lookup in lookups {
            let (word, result) = lookup.await.unwrap();
            assert!(!result.bilingual_entries.is_empty(), "{word}");
            assert!(
                result
                    .bilingual_entries
                    .iter()
                    .all(|entry| entry.input.general_form() == word)
            );
        }

        let empty = EngineQueryResult::Bilingual(
            engine
                .execute_bilingual_query("Quatsch", &lang("de"), &lang("en"))
                .await
                .unwrap(),
        );
        assert!(empty.is_empty());
    }
}
