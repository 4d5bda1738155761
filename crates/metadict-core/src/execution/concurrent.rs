use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use metadict_config::execution::ExecutionConfig;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::execution::{
    EXECUTION_CANCELLED, ExecutionStrategy, PLAN_DEADLINE_EXCEEDED, QueryStepResult, execute_step,
};
use crate::plan::{QueryPlan, QueryStep};

/// Runs all steps of a plan in parallel on the tokio runtime.
///
/// At most `max_in_flight` engine calls run at once. Each call has its own
/// timeout; the optional plan timeout bounds the whole execution, after
/// which unfinished steps are aborted and reported as timed out.
///
/// Clones share one shutdown state.
#[derive(Debug, Clone)]
pub struct ConcurrentExecutionStrategy {
    max_in_flight: usize,
    step_timeout: Duration,
    plan_timeout: Option<Duration>,
    cancel_token: CancellationToken,
}

impl ConcurrentExecutionStrategy {
    pub fn new(max_in_flight: usize, step_timeout: Duration) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
            step_timeout,
            plan_timeout: None,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn from_config(config: &ExecutionConfig) -> Self {
        Self::new(config.max_in_flight, config.step_timeout()).with_plan_timeout(config.plan_timeout())
    }

    pub fn with_plan_timeout(mut self, plan_timeout: Option<Duration>) -> Self {
        self.plan_timeout = plan_timeout;
        self
    }

    /// Abort every running plan. Unfinished steps are reported as timed out.
    ///
    /// Shutdown is final: plans executed afterwards report every step as
    /// cancelled without calling any engine.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

enum Interrupt {
    Deadline,
    Shutdown,
}

impl Interrupt {
    fn reason(&self) -> &'static str {
        match self {
            Interrupt::Deadline => PLAN_DEADLINE_EXCEEDED,
            Interrupt::Shutdown => EXECUTION_CANCELLED,
        }
    }
}

#[async_trait::async_trait]
impl ExecutionStrategy for ConcurrentExecutionStrategy {
    async fn execute(&self, plan: QueryPlan) -> Vec<QueryStepResult> {
        let started = Instant::now();
        let total = plan.len();
        if total == 0 {
            return Vec::new();
        }

        if self.is_shut_down() {
            tracing::warn!("Strategy is shut down, skipping {} step(s)", total);
            return plan
                .into_steps()
                .into_iter()
                .map(|step| QueryStepResult::timeout(step, EXECUTION_CANCELLED, Duration::ZERO))
                .collect();
        }

        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();
        let mut pending: HashMap<Id, (usize, QueryStep)> = HashMap::with_capacity(total);

        for (position, step) in plan.into_steps().into_iter().enumerate() {
            let semaphore = semaphore.clone();
            let step_timeout = self.step_timeout;
            let task_step = step.clone();

            let handle = tasks.spawn(async move {
                // Held until the engine call returns
                let _permit = semaphore.acquire_owned().await.ok();
                execute_step(task_step, step_timeout).await
            });
            pending.insert(handle.id(), (position, step));
        }

        tracing::debug!(
            "Executing {} step(s), at most {} in flight",
            total,
            self.max_in_flight
        );

        let mut results: Vec<Option<QueryStepResult>> = (0..total).map(|_| None).collect();
        let mut interrupt: Option<Interrupt> = None;

        let deadline = async {
            match self.plan_timeout {
                Some(plan_timeout) => tokio::time::sleep(plan_timeout).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                joined = tasks.join_next_with_id() => {
                    let Some(joined) = joined else { break };
                    match joined {
                        Ok((id, result)) => {
                            if let Some((position, _)) = pending.remove(&id) {
                                results[position] = Some(result);
                            }
                        }
                        Err(e) => {
                            if let Some((position, step)) = pending.remove(&e.id()) {
                                results[position] =
                                    Some(failed_task(step, &e, interrupt.as_ref(), started.elapsed()));
                            }
                        }
                    }
                }
                _ = &mut deadline, if interrupt.is_none() => {
                    tracing::warn!(
                        "Plan deadline of {:?} exceeded with {} step(s) unfinished",
                        self.plan_timeout.unwrap_or_default(),
                        tasks.len()
                    );
                    interrupt = Some(Interrupt::Deadline);
                    tasks.abort_all();
                }
                _ = self.cancel_token.cancelled(), if interrupt.is_none() => {
                    tracing::warn!("Execution cancelled with {} step(s) unfinished", tasks.len());
                    interrupt = Some(Interrupt::Shutdown);
                    tasks.abort_all();
                }
            }
        }

        // Every task was joined above, anything left here was never reported
        for (_, (position, step)) in pending.drain() {
            let reason = interrupt.as_ref().map_or("step result lost", Interrupt::reason);
            results[position] = Some(QueryStepResult::timeout(step, reason, started.elapsed()));
        }

        results.into_iter().flatten().collect()
    }
}

fn failed_task(
    step: QueryStep,
    error: &JoinError,
    interrupt: Option<&Interrupt>,
    elapsed: Duration,
) -> QueryStepResult {
    if error.is_cancelled() {
        let reason = interrupt.map_or("step aborted", Interrupt::reason);
        tracing::debug!("Step {} on '{}' aborted: {}", step.index(), step.engine_name(), reason);
        return QueryStepResult::timeout(step, reason, elapsed);
    }

    tracing::error!("Engine '{}' panicked on step {}: {}", step.engine_name(), step.index(), error);
    QueryStepResult::engine_error(step, format!("engine panicked: {error}"), elapsed)
}
