//! Mock engines, providers and strategies shared by the core tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use metadict_engine::{
    AutoTestSuite, EngineDescription, EngineError, FeatureSet, SearchEngine, SearchEngineProvider,
};
use metadict_types::{
    BilingualDictionary, BilingualEntry, BilingualQueryResult, DictionaryObject, EntryType,
    Language, MonolingualEntry, MonolingualQueryResult,
};

use crate::execution::{ExecutionStrategy, QueryStepResult};
use crate::plan::QueryPlan;
use crate::registry::EngineRegistry;

pub fn lang(code: &str) -> Language {
    Language::parse(code).unwrap()
}

pub fn obj(code: &str, form: &str) -> DictionaryObject {
    DictionaryObject::simple(lang(code), form).unwrap()
}

pub fn dict(query: &str) -> BilingualDictionary {
    BilingualDictionary::from_query_string(query, true).unwrap()
}

pub fn entry(from: (&str, &str), to: (&str, &str)) -> BilingualEntry {
    BilingualEntry::new(obj(from.0, from.1), obj(to.0, to.1), EntryType::Noun)
}

/// Bilingual features for the given bidirectional dictionaries
pub fn bilingual_features(dictionaries: &[&str]) -> FeatureSet {
    dictionaries
        .iter()
        .fold(
            FeatureSet::builder().provides_bilingual_entries(true),
            |builder, query| builder.add_bilingual_dictionary(dict(query)),
        )
        .build()
}

#[derive(Clone)]
pub enum Behavior {
    /// Fixed bilingual answer
    Answer(BilingualQueryResult),
    /// Entry derived from the query and direction
    Echo,
    Fail,
    Panic,
    Sleep(Duration),
}

/// Engine with scripted behavior that counts its calls and the highest
/// number of calls it saw running at once
pub struct MockEngine {
    behavior: Behavior,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockEngine {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond(
        &self,
        query: &str,
        input: &Language,
        output: &Language,
    ) -> Result<BilingualQueryResult, EngineError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.behavior {
            Behavior::Answer(result) => Ok(result.clone()),
            Behavior::Echo => Ok(echo(query, input, output)),
            Behavior::Fail => Err(EngineError::Backend("scripted failure".to_string())),
            Behavior::Panic => panic!("scripted panic"),
            Behavior::Sleep(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(echo(query, input, output))
            }
        }
    }
}

pub fn echo(query: &str, input: &Language, output: &Language) -> BilingualQueryResult {
    BilingualQueryResult {
        bilingual_entries: vec![BilingualEntry::new(
            DictionaryObject::simple(input.clone(), query).unwrap(),
            DictionaryObject::simple(output.clone(), format!("{query}@{output}")).unwrap(),
            EntryType::Unknown,
        )],
        ..Default::default()
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl SearchEngine for MockEngine {
    async fn execute_bilingual_query(
        &self,
        query: &str,
        input: &Language,
        output: &Language,
    ) -> Result<BilingualQueryResult, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        self.respond(query, input, output).await
    }

    async fn execute_monolingual_query(
        &self,
        query: &str,
        language: &Language,
    ) -> Result<MonolingualQueryResult, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if matches!(self.behavior, Behavior::Fail) {
            return Err(EngineError::Unavailable);
        }
        Ok(MonolingualQueryResult {
            monolingual_entries: vec![MonolingualEntry::new(
                DictionaryObject::simple(language.clone(), query).unwrap(),
                EntryType::Unknown,
            )],
            ..Default::default()
        })
    }
}

pub struct MockProvider {
    pub name: String,
    pub features: FeatureSet,
    pub engine: Arc<MockEngine>,
    pub suite: Result<Option<AutoTestSuite>, String>,
}

impl MockProvider {
    pub fn new(name: &str, features: FeatureSet, engine: MockEngine) -> Self {
        Self {
            name: name.to_string(),
            features,
            engine: Arc::new(engine),
            suite: Ok(None),
        }
    }

    pub fn with_suite(mut self, suite: AutoTestSuite) -> Self {
        self.suite = Ok(Some(suite));
        self
    }
}

impl SearchEngineProvider for MockProvider {
    fn description(&self) -> EngineDescription {
        EngineDescription::new(self.name.clone())
    }

    fn feature_set(&self) -> FeatureSet {
        self.features.clone()
    }

    fn new_engine_instance(&self) -> Arc<dyn SearchEngine> {
        self.engine.clone()
    }

    fn auto_test_suite(&self) -> Result<Option<AutoTestSuite>, EngineError> {
        self.suite.clone().map_err(EngineError::Backend)
    }
}

pub fn registry(providers: Vec<MockProvider>) -> EngineRegistry {
    let mut registry = EngineRegistry::new();
    for provider in providers {
        registry.register(Arc::new(provider)).unwrap();
    }
    registry
}

/// Strategy returning prepared results regardless of the plan
pub struct FixedResultStrategy {
    results: Vec<QueryStepResult>,
}

impl FixedResultStrategy {
    pub fn new(results: Vec<QueryStepResult>) -> Self {
        Self { results }
    }
}

#[async_trait::async_trait]
impl ExecutionStrategy for FixedResultStrategy {
    async fn execute(&self, _plan: QueryPlan) -> Vec<QueryStepResult> {
        self.results.clone()
    }
}
