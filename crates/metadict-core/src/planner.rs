use std::sync::Arc;

use metadict_types::{DictionarySpec, QueryTarget};

use crate::error::PlanningError;
use crate::plan::{QueryPlan, QueryStep, StepKind};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::registry::{EngineRegistry, RegisteredEngine};

/// Turns a query and a dictionary specification into a [`QueryPlan`].
///
/// Planning only reads the registry, so the same input always yields the
/// same plan. Steps are ordered by engine registration order, then by
/// target order within the specification, then forward before reverse.
pub struct QueryPlanner {
    registry: Arc<EngineRegistry>,
    preprocessor: Box<dyn Preprocessor>,
}

impl QueryPlanner {
    pub fn new(registry: Arc<EngineRegistry>) -> Self {
        Self {
            registry,
            preprocessor: Box::new(DefaultPreprocessor),
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: Box<dyn Preprocessor>) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn registry(&self) -> &Arc<EngineRegistry> {
        &self.registry
    }

    /// Plan `query` against every registered engine. `dictionaries` uses
    /// the `"de-en"`, `"de>en"`, `"de"` syntax, comma separated.
    pub fn plan(&self, query: &str, dictionaries: &str) -> Result<QueryPlan, PlanningError> {
        let spec = DictionarySpec::parse(dictionaries)?;
        self.plan_spec(query, &spec)
    }

    pub fn plan_spec(&self, query: &str, spec: &DictionarySpec) -> Result<QueryPlan, PlanningError> {
        let query = self.normalize_query(query)?;

        let steps: Vec<QueryStep> = self
            .registry
            .engines()
            .iter()
            .flat_map(|engine| steps_for_engine(engine, &query, spec))
            .collect();

        let plan = QueryPlan::new(query.as_str(), steps);
        tracing::debug!(
            "Planned '{}' for {} target(s): {} step(s) across {} engine(s)",
            query,
            spec.targets().len(),
            plan.len(),
            self.registry.len()
        );
        Ok(plan)
    }

    /// Plan restricted to a single registered engine
    pub fn plan_for_engine(
        &self,
        query: &str,
        target: &QueryTarget,
        engine_name: &str,
    ) -> Result<QueryPlan, PlanningError> {
        let engine = self
            .registry
            .get(engine_name)
            .ok_or_else(|| PlanningError::UnknownEngine(engine_name.to_string()))?;
        let query = self.normalize_query(query)?;
        let spec = DictionarySpec::single(target.clone());

        let steps = steps_for_engine(engine, &query, &spec);
        Ok(QueryPlan::new(query, steps))
    }

    fn normalize_query(&self, query: &str) -> Result<String, PlanningError> {
        let query = self.preprocessor.process(query);
        if query.is_empty() {
            return Err(PlanningError::EmptyQuery);
        }
        Ok(query)
    }
}

fn steps_for_engine(
    engine: &Arc<RegisteredEngine>,
    query: &str,
    spec: &DictionarySpec,
) -> Vec<QueryStep> {
    let features = engine.features();
    let mut steps = Vec::new();

    for target in spec.targets() {
        match target {
            QueryTarget::Bilingual(dictionary) => {
                for (input, output) in dictionary.directions() {
                    if !features.supports_bilingual(&input, &output) {
                        continue;
                    }
                    steps.push(QueryStep::new(
                        engine.clone(),
                        query,
                        StepKind::Bilingual {
                            input,
                            output,
                            dictionary: dictionary.clone(),
                        },
                    ));
                }
            }
            QueryTarget::Monolingual(language) => {
                if features.supports_monolingual(language) {
                    steps.push(QueryStep::new(
                        engine.clone(),
                        query,
                        StepKind::Monolingual {
                            language: language.clone(),
                        },
                    ));
                }
            }
        }
    }

    steps
}
