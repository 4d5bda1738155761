use std::sync::Arc;

use metadict_types::{BilingualDictionary, Language};

use crate::registry::RegisteredEngine;

/// What a single step asks its engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    Bilingual {
        input: Language,
        output: Language,
        /// Requested dictionary this direction belongs to
        dictionary: BilingualDictionary,
    },
    Monolingual {
        language: Language,
    },
}

/// One unit of planned work: one engine, one query, one direction
#[derive(Debug, Clone)]
pub struct QueryStep {
    index: usize,
    engine: Arc<RegisteredEngine>,
    query: String,
    kind: StepKind,
}

impl QueryStep {
    pub fn new(engine: Arc<RegisteredEngine>, query: impl Into<String>, kind: StepKind) -> Self {
        Self {
            index: 0,
            engine,
            query: query.into(),
            kind,
        }
    }

    /// Position in the owning plan
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn engine(&self) -> &Arc<RegisteredEngine> {
        &self.engine
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    /// Short label such as `de>en` or `de`
    pub fn target_label(&self) -> String {
        match &self.kind {
            StepKind::Bilingual { input, output, .. } => format!("{input}>{output}"),
            StepKind::Monolingual { language } => language.to_string(),
        }
    }
}

/// Ordered steps for one request. Steps are independent of each other.
#[derive(Debug, Clone, Default)]
pub struct QueryPlan {
    query: String,
    steps: Vec<QueryStep>,
}

impl QueryPlan {
    /// Build a plan; each step gets its position as index
    pub fn new(query: impl Into<String>, steps: Vec<QueryStep>) -> Self {
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| QueryStep { index, ..step })
            .collect();
        Self {
            query: query.into(),
            steps,
        }
    }

    /// Normalized query string the plan was built for
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn steps(&self) -> &[QueryStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<QueryStep> {
        self.steps
    }
}
