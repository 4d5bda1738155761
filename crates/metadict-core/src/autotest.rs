use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use metadict_engine::AutoTestCase;
use metadict_types::{DictionaryObject, EngineQueryResult, QueryResponse};
use serde::Serialize;

use crate::aggregator::{RecommendationCollector, ResultAggregator, SynonymMerger};
use crate::execution::ExecutionStrategy;
use crate::planner::QueryPlanner;
use crate::registry::RegisteredEngine;

/// Lifecycle of a single self-test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoTestState {
    Pending,
    Running,
    /// Ran and produced the expected result
    Passed,
    /// Ran but the result differs from the expectation
    Failed,
    /// Could not run: planning, engine error or timeout
    Errored,
}

impl AutoTestState {
    pub fn can_transition_to(self, next: AutoTestState) -> bool {
        matches!(
            (self, next),
            (AutoTestState::Pending, AutoTestState::Running)
                | (AutoTestState::Pending, AutoTestState::Errored)
                | (AutoTestState::Running, AutoTestState::Passed)
                | (AutoTestState::Running, AutoTestState::Failed)
                | (AutoTestState::Running, AutoTestState::Errored)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AutoTestState::Passed | AutoTestState::Failed | AutoTestState::Errored
        )
    }
}

impl fmt::Display for AutoTestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AutoTestState::Pending => "PENDING",
            AutoTestState::Running => "RUNNING",
            AutoTestState::Passed => "PASSED",
            AutoTestState::Failed => "FAILED",
            AutoTestState::Errored => "ERRORED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Illegal self-test transition {from} -> {to}")]
pub struct IllegalTransition {
    pub from: AutoTestState,
    pub to: AutoTestState,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutoTestCaseReport {
    pub index: usize,
    pub query: String,
    pub target: String,
    pub state: AutoTestState,
    /// Mismatch description or execution error
    pub message: Option<String>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_ms")]
    pub duration: Duration,
}

impl AutoTestCaseReport {
    fn new(index: usize, case: &AutoTestCase) -> Self {
        Self {
            index,
            query: case.query.clone(),
            target: case.target.to_string(),
            state: AutoTestState::Pending,
            message: None,
            duration: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, next: AutoTestState) -> Result<(), IllegalTransition> {
        if !self.state.can_transition_to(next) {
            return Err(IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

fn serialize_ms<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[derive(Debug, Clone, Serialize)]
pub struct AutoTestReport {
    pub engine_name: String,
    /// Engine does not declare self-test support
    pub skipped: bool,
    /// Suite could not be obtained from the provider
    pub error: Option<String>,
    pub cases: Vec<AutoTestCaseReport>,
}

impl AutoTestReport {
    fn new(engine_name: &str) -> Self {
        Self {
            engine_name: engine_name.to_string(),
            skipped: false,
            error: None,
            cases: Vec::new(),
        }
    }

    pub fn count(&self, state: AutoTestState) -> usize {
        self.cases.iter().filter(|case| case.state == state).count()
    }

    pub fn passed(&self) -> usize {
        self.count(AutoTestState::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(AutoTestState::Failed)
    }

    pub fn errored(&self) -> usize {
        self.count(AutoTestState::Errored)
    }

    /// No failed or errored case and the suite itself was readable
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.failed() == 0 && self.errored() == 0
    }
}

/// Replays engine-declared example queries through the regular planning,
/// execution and aggregation path
pub struct AutoTestRunner {
    planner: Arc<QueryPlanner>,
    strategy: Arc<dyn ExecutionStrategy>,
    aggregator: ResultAggregator,
}

impl AutoTestRunner {
    pub fn new(planner: Arc<QueryPlanner>, strategy: Arc<dyn ExecutionStrategy>) -> Self {
        Self {
            planner,
            strategy,
            aggregator: ResultAggregator,
        }
    }

    pub async fn run_self_tests(&self, engine: &RegisteredEngine) -> AutoTestReport {
        let mut report = AutoTestReport::new(engine.name());

        if !engine.features().supports_self_test() {
            tracing::debug!("Engine '{}' has no self-test support, skipping", engine.name());
            report.skipped = true;
            return report;
        }

        let suite = match engine.auto_test_suite() {
            Ok(Some(suite)) => suite,
            Ok(None) => {
                tracing::warn!("Engine '{}' declares self-tests but provides none", engine.name());
                return report;
            }
            Err(e) => {
                tracing::error!("Engine '{}' failed to provide its self-tests: {}", engine.name(), e);
                report.error = Some(e.to_string());
                return report;
            }
        };

        tracing::info!("Running {} self-test(s) for '{}'", suite.len(), engine.name());

        for (index, case) in suite.cases.iter().enumerate() {
            let case_report = self.run_case(engine, index, case).await;
            report.cases.push(case_report);
        }

        tracing::info!(
            "Self-tests for '{}': {} passed, {} failed, {} errored",
            engine.name(),
            report.passed(),
            report.failed(),
            report.errored()
        );

        report
    }

    async fn run_case(
        &self,
        engine: &RegisteredEngine,
        index: usize,
        case: &AutoTestCase,
    ) -> AutoTestCaseReport {
        let started = Instant::now();
        let mut report = AutoTestCaseReport::new(index, case);

        let plan = match self.planner.plan_for_engine(&case.query, &case.target, engine.name()) {
            Ok(plan) if !plan.is_empty() => plan,
            Ok(_) => {
                finish(
                    &mut report,
                    AutoTestState::Errored,
                    Some(format!("engine does not support its own test target {}", case.target)),
                    started,
                );
                return report;
            }
            Err(e) => {
                finish(&mut report, AutoTestState::Errored, Some(e.to_string()), started);
                return report;
            }
        };

        transition(&mut report, AutoTestState::Running);

        let query = plan.query().to_string();
        let results = self.strategy.execute(plan).await;
        let response = self.aggregator.aggregate(&query, results);

        if let Some(failure) = response.failed_steps().next() {
            let message = format!(
                "step {} ended with {}: {}",
                failure.step_index,
                failure.status,
                failure.error.as_deref().unwrap_or("no detail")
            );
            finish(&mut report, AutoTestState::Errored, Some(message), started);
            return report;
        }

        match compare(&case.expected, &response) {
            None => finish(&mut report, AutoTestState::Passed, None, started),
            Some(mismatch) => {
                tracing::warn!(
                    "Self-test {} of '{}' ('{}' in {}) failed: {}",
                    index,
                    engine.name(),
                    case.query,
                    case.target,
                    mismatch
                );
                finish(&mut report, AutoTestState::Failed, Some(mismatch), started);
            }
        }

        report
    }
}

fn transition(report: &mut AutoTestCaseReport, next: AutoTestState) {
    if let Err(e) = report.advance(next) {
        tracing::error!("Self-test {}: {}", report.index, e);
    }
}

fn finish(
    report: &mut AutoTestCaseReport,
    state: AutoTestState,
    message: Option<String>,
    started: Instant,
) {
    transition(report, state);
    report.message = message;
    report.duration = started.elapsed();
}

/// Describe every collection where the response differs from the
/// expectation, `None` when they match
fn compare(expected: &EngineQueryResult, response: &QueryResponse) -> Option<String> {
    let mut mismatches = Vec::new();

    let expected_recommendations = |objects: &[DictionaryObject]| {
        let mut recommendations = RecommendationCollector::default();
        recommendations.add_all(objects.to_vec());
        recommendations.finish()
    };

    match expected {
        EngineQueryResult::Bilingual(expected) => {
            // Expectations are stated per engine, merge them the same way the
            // response was merged
            let mut merger = SynonymMerger::default();
            merger.add_all(expected.synonym_entries.iter().cloned());
            let expected_synonyms = merger.finish();

            mismatches.extend(diff(
                "bilingual_entries",
                &expected.bilingual_entries,
                &response.bilingual_entries,
            ));
            mismatches.extend(diff(
                "synonym_entries",
                &expected_synonyms,
                &response.synonym_entries,
            ));
            mismatches.extend(diff(
                "external_contents",
                &expected.external_contents,
                &response.external_contents,
            ));
            mismatches.extend(diff(
                "similar_recommendations",
                &expected_recommendations(&expected.similar_recommendations),
                &response.similar_recommendations,
            ));
            if !response.monolingual_entries.is_empty() {
                mismatches.push(format!(
                    "monolingual_entries: expected none, got {}",
                    response.monolingual_entries.len()
                ));
            }
        }
        EngineQueryResult::Monolingual(expected) => {
            mismatches.extend(diff(
                "monolingual_entries",
                &expected.monolingual_entries,
                &response.monolingual_entries,
            ));
            mismatches.extend(diff(
                "external_contents",
                &expected.external_contents,
                &response.external_contents,
            ));
            mismatches.extend(diff(
                "similar_recommendations",
                &expected_recommendations(&expected.similar_recommendations),
                &response.similar_recommendations,
            ));
            if !response.bilingual_entries.is_empty() {
                mismatches.push(format!(
                    "bilingual_entries: expected none, got {}",
                    response.bilingual_entries.len()
                ));
            }
        }
        EngineQueryResult::Empty => {
            if !response.is_empty() {
                mismatches.push("expected an empty result".to_string());
            }
        }
    }

    if mismatches.is_empty() {
        None
    } else {
        Some(mismatches.join("; "))
    }
}

fn diff<T: PartialEq + fmt::Debug>(name: &str, expected: &[T], actual: &[T]) -> Option<String> {
    if expected == actual {
        return None;
    }
    if expected.len() != actual.len() {
        return Some(format!(
            "{name}: expected {} item(s), got {}",
            expected.len(),
            actual.len()
        ));
    }

    let position = expected
        .iter()
        .zip(actual)
        .position(|(expected, actual)| expected != actual)
        .unwrap_or_default();
    Some(format!(
        "{name}: item {position} differs, expected {:?}, got {:?}",
        expected[position], actual[position]
    ))
}
