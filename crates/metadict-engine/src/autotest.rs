use metadict_types::{BilingualQueryResult, EngineQueryResult, MonolingualQueryResult, QueryTarget};
use serde::{Deserialize, Serialize};

/// Example query declared by an engine together with the exact result it
/// is expected to produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoTestCase {
    pub query: String,
    pub target: QueryTarget,
    pub expected: EngineQueryResult,
}

impl AutoTestCase {
    pub fn bilingual(
        query: impl Into<String>,
        target: QueryTarget,
        expected: BilingualQueryResult,
    ) -> Self {
        Self {
            query: query.into(),
            target,
            expected: EngineQueryResult::Bilingual(expected),
        }
    }

    pub fn monolingual(
        query: impl Into<String>,
        target: QueryTarget,
        expected: MonolingualQueryResult,
    ) -> Self {
        Self {
            query: query.into(),
            target,
            expected: EngineQueryResult::Monolingual(expected),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoTestSuite {
    pub cases: Vec<AutoTestCase>,
}

impl AutoTestSuite {
    pub fn new(cases: Vec<AutoTestCase>) -> Self {
        Self { cases }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
