//! Query federation core: plans a request across the registered engines,
//! executes the plan with failure isolation and merges the results.

pub mod aggregator;
pub mod autotest;
pub mod error;
pub mod execution;
pub mod manager;
pub mod plan;
pub mod planner;
pub mod preprocess;
pub mod registry;

pub use aggregator::ResultAggregator;
pub use autotest::{AutoTestCaseReport, AutoTestReport, AutoTestRunner, AutoTestState};
pub use error::{PlanningError, RegistryError};
pub use execution::{
    ConcurrentExecutionStrategy, ExecutionStrategy, QueryStepResult, SequentialExecutionStrategy,
};
pub use manager::MetadictCore;
pub use plan::{QueryPlan, QueryStep, StepKind};
pub use planner::QueryPlanner;
pub use registry::{EngineRegistry, RegisteredEngine};

#[cfg(test)]
mod tests;
