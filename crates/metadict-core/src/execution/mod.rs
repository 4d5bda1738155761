use std::time::{Duration, Instant};

use metadict_engine::EngineError;
use metadict_types::{EngineQueryResult, StepDiagnostic, StepStatus};

use crate::plan::{QueryPlan, QueryStep, StepKind};

pub mod concurrent;
pub mod sequential;

pub use concurrent::ConcurrentExecutionStrategy;
pub use sequential::SequentialExecutionStrategy;

pub(crate) const PLAN_DEADLINE_EXCEEDED: &str = "plan deadline exceeded";
pub(crate) const EXECUTION_CANCELLED: &str = "execution cancelled";

/// Runs every step of a plan against its engine.
///
/// Implementations return exactly one result per step, sorted by step
/// index, and never fail as a whole: engine errors and timeouts become
/// results with the matching [`StepStatus`].
#[async_trait::async_trait]
pub trait ExecutionStrategy: Send + Sync {
    async fn execute(&self, plan: QueryPlan) -> Vec<QueryStepResult>;
}

/// Outcome of one step. Owns the step it answers.
#[derive(Debug, Clone)]
pub struct QueryStepResult {
    step: QueryStep,
    status: StepStatus,
    result: EngineQueryResult,
    duration: Duration,
    error: Option<String>,
}

impl QueryStepResult {
    pub fn success(step: QueryStep, result: EngineQueryResult, duration: Duration) -> Self {
        Self {
            step,
            status: StepStatus::Success,
            result,
            duration,
            error: None,
        }
    }

    pub fn engine_error(step: QueryStep, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            step,
            status: StepStatus::EngineError,
            result: EngineQueryResult::Empty,
            duration,
            error: Some(error.into()),
        }
    }

    pub fn timeout(step: QueryStep, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            step,
            status: StepStatus::Timeout,
            result: EngineQueryResult::Empty,
            duration,
            error: Some(error.into()),
        }
    }

    pub fn step(&self) -> &QueryStep {
        &self.step
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    pub fn result(&self) -> &EngineQueryResult {
        &self.result
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Success
    }

    pub fn diagnostic(&self) -> StepDiagnostic {
        StepDiagnostic {
            step_index: self.step.index(),
            engine_name: self.step.engine_name().to_string(),
            target: self.step.target_label(),
            status: self.status,
            duration: self.duration,
            error: self.error.clone(),
        }
    }

    pub fn into_parts(self) -> (QueryStep, EngineQueryResult) {
        (self.step, self.result)
    }
}

/// Call the step's engine, bounded by `step_timeout`
pub(crate) async fn execute_step(step: QueryStep, step_timeout: Duration) -> QueryStepResult {
    let started = Instant::now();
    tracing::debug!(
        "Step {} -> '{}' ({})",
        step.index(),
        step.engine_name(),
        step.target_label()
    );

    match tokio::time::timeout(step_timeout, call_engine(&step)).await {
        Ok(Ok(result)) => {
            let duration = started.elapsed();
            tracing::debug!(
                "Step {} answered by '{}' in {:?}",
                step.index(),
                step.engine_name(),
                duration
            );
            QueryStepResult::success(step, result, duration)
        }
        Ok(Err(e)) => {
            tracing::warn!("Engine '{}' failed on step {}: {}", step.engine_name(), step.index(), e);
            QueryStepResult::engine_error(step, e.to_string(), started.elapsed())
        }
        Err(_) => {
            tracing::warn!(
                "Engine '{}' timed out on step {} after {:?}",
                step.engine_name(),
                step.index(),
                step_timeout
            );
            QueryStepResult::timeout(
                step,
                format!("no answer within {} ms", step_timeout.as_millis()),
                started.elapsed(),
            )
        }
    }
}

async fn call_engine(step: &QueryStep) -> Result<EngineQueryResult, EngineError> {
    let engine = step.engine().instance();

    match step.kind() {
        StepKind::Bilingual { input, output, .. } => engine
            .execute_bilingual_query(step.query(), input, output)
            .await
            .map(EngineQueryResult::Bilingual),
        StepKind::Monolingual { language } => engine
            .execute_monolingual_query(step.query(), language)
            .await
            .map(EngineQueryResult::Monolingual),
    }
}
