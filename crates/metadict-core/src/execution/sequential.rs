use std::time::{Duration, Instant};

use metadict_config::execution::ExecutionConfig;

use crate::execution::{ExecutionStrategy, PLAN_DEADLINE_EXCEEDED, QueryStepResult, execute_step};
use crate::plan::QueryPlan;

/// Runs steps one at a time in plan order.
///
/// Deterministic for deterministic engines, which makes it the strategy of
/// choice for tests and self-test comparisons. With a plan timeout, a step
/// only gets the budget left over by the steps before it; once the budget
/// is spent the remaining steps are reported as timed out.
#[derive(Debug, Clone)]
pub struct SequentialExecutionStrategy {
    step_timeout: Duration,
    plan_timeout: Option<Duration>,
}

impl SequentialExecutionStrategy {
    pub fn new(step_timeout: Duration) -> Self {
        Self {
            step_timeout,
            plan_timeout: None,
        }
    }

    pub fn from_config(config: &ExecutionConfig) -> Self {
        Self::new(config.step_timeout()).with_plan_timeout(config.plan_timeout())
    }

    pub fn with_plan_timeout(mut self, plan_timeout: Option<Duration>) -> Self {
        self.plan_timeout = plan_timeout;
        self
    }
}

impl Default for SequentialExecutionStrategy {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait::async_trait]
impl ExecutionStrategy for SequentialExecutionStrategy {
    async fn execute(&self, plan: QueryPlan) -> Vec<QueryStepResult> {
        let deadline = self.plan_timeout.map(|plan_timeout| Instant::now() + plan_timeout);
        let mut results = Vec::with_capacity(plan.len());

        for step in plan.into_steps() {
            let started = Instant::now();
            let remaining = deadline.map(|deadline| deadline.saturating_duration_since(started));

            if remaining == Some(Duration::ZERO) {
                tracing::debug!(
                    "Step {} on '{}' skipped: {}",
                    step.index(),
                    step.engine_name(),
                    PLAN_DEADLINE_EXCEEDED
                );
                results.push(QueryStepResult::timeout(step, PLAN_DEADLINE_EXCEEDED, Duration::ZERO));
                continue;
            }

            let fallback = step.clone();

            // Own task per step so a panicking engine only fails its step
            let handle = tokio::spawn(execute_step(step, self.step_timeout));
            let joined = match remaining {
                Some(remaining) if remaining < self.step_timeout => {
                    let abort = handle.abort_handle();
                    match tokio::time::timeout(remaining, handle).await {
                        Ok(joined) => joined,
                        Err(_) => {
                            abort.abort();
                            tracing::warn!(
                                "Plan deadline of {:?} exceeded on step {} ('{}')",
                                self.plan_timeout.unwrap_or_default(),
                                fallback.index(),
                                fallback.engine_name()
                            );
                            results.push(QueryStepResult::timeout(
                                fallback,
                                PLAN_DEADLINE_EXCEEDED,
                                started.elapsed(),
                            ));
                            continue;
                        }
                    }
                }
                _ => handle.await,
            };

            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Engine '{}' panicked: {}", fallback.engine_name(), e);
                    QueryStepResult::engine_error(
                        fallback,
                        format!("engine panicked: {e}"),
                        started.elapsed(),
                    )
                }
            };
            results.push(result);
        }

        results
    }
}
