use std::sync::Arc;
use std::time::Instant;

use metadict_config::execution::ExecutionConfig;
use metadict_types::{DictionarySpec, QueryResponse};

use crate::aggregator::ResultAggregator;
use crate::autotest::{AutoTestReport, AutoTestRunner};
use crate::error::PlanningError;
use crate::execution::{ConcurrentExecutionStrategy, ExecutionStrategy, SequentialExecutionStrategy};
use crate::planner::QueryPlanner;
use crate::registry::EngineRegistry;

/// Entry point for queries and self-tests: plans a request, executes it
/// with the configured strategy and aggregates the step results
pub struct MetadictCore {
    planner: Arc<QueryPlanner>,
    strategy: Arc<dyn ExecutionStrategy>,
    aggregator: ResultAggregator,
    auto_tests: AutoTestRunner,
}

impl MetadictCore {
    pub fn new(registry: EngineRegistry, strategy: Arc<dyn ExecutionStrategy>) -> Self {
        let planner = Arc::new(QueryPlanner::new(Arc::new(registry)));
        let auto_tests = AutoTestRunner::new(planner.clone(), strategy.clone());

        Self {
            planner,
            strategy,
            aggregator: ResultAggregator,
            auto_tests,
        }
    }

    /// Core with the strategy selected by `config`
    pub fn from_config(registry: EngineRegistry, config: &ExecutionConfig) -> Self {
        let strategy: Arc<dyn ExecutionStrategy> = if config.sequential {
            Arc::new(SequentialExecutionStrategy::from_config(config))
        } else {
            Arc::new(ConcurrentExecutionStrategy::from_config(config))
        };
        Self::new(registry, strategy)
    }

    pub fn registry(&self) -> &EngineRegistry {
        self.planner.registry()
    }

    /// Run `query` in every dictionary of `dictionaries`.
    ///
    /// Only malformed input is an error. Engines that fail or time out show
    /// up in the response diagnostics; a request no engine can serve
    /// yields an empty response.
    pub async fn query(&self, query: &str, dictionaries: &str) -> Result<QueryResponse, PlanningError> {
        let spec = DictionarySpec::parse(dictionaries)?;
        self.query_spec(query, &spec).await
    }

    pub async fn query_spec(
        &self,
        query: &str,
        spec: &DictionarySpec,
    ) -> Result<QueryResponse, PlanningError> {
        let started = Instant::now();
        let plan = self.planner.plan_spec(query, spec)?;

        let query = plan.query().to_string();

        if plan.is_empty() {
            tracing::info!("No engine supports the requested dictionaries for '{}'", query);
        }

        let results = self.strategy.execute(plan).await;
        let response = self.aggregator.aggregate(&query, results);

        tracing::info!(
            "Query '{}' answered in {:?}: {} step(s), {} failed",
            response.query,
            started.elapsed(),
            response.diagnostics.len(),
            response.failed_steps().count()
        );

        Ok(response)
    }

    /// Self-tests of every registered engine, in registration order
    pub async fn run_self_tests(&self) -> Vec<AutoTestReport> {
        let mut reports = Vec::with_capacity(self.registry().len());
        for engine in self.registry().engines() {
            reports.push(self.auto_tests.run_self_tests(engine).await);
        }
        reports
    }

    pub async fn run_self_tests_for(&self, engine_name: &str) -> Result<AutoTestReport, PlanningError> {
        let engine = self
            .registry()
            .get(engine_name)
            .ok_or_else(|| PlanningError::UnknownEngine(engine_name.to_string()))?;
        Ok(self.auto_tests.run_self_tests(engine).await)
    }
}
