use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entry::{BilingualEntry, ExternalContent, MonolingualEntry, SynonymEntry};
use crate::language::BilingualDictionary;
use crate::object::DictionaryObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    Success,
    EngineError,
    Timeout,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepStatus::Success => "SUCCESS",
            StepStatus::EngineError => "ENGINE_ERROR",
            StepStatus::Timeout => "TIMEOUT",
        };
        f.write_str(label)
    }
}

/// Per-step record kept in every response, failed or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDiagnostic {
    pub step_index: usize,
    pub engine_name: String,
    /// Direction or language the step queried, e.g. `de>en`
    pub target: String,
    pub status: StepStatus,
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Bilingual entries belonging to one requested dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub dictionary: BilingualDictionary,
    pub entries: Vec<BilingualEntry>,
}

/// Merged answer to one request. Built once by the aggregator and handed
/// to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub bilingual_entries: Vec<BilingualEntry>,
    pub grouped_bilingual_entries: Vec<ResultGroup>,
    pub monolingual_entries: Vec<MonolingualEntry>,
    pub synonym_entries: Vec<SynonymEntry>,
    pub external_contents: Vec<ExternalContent>,
    pub similar_recommendations: Vec<DictionaryObject>,
    pub diagnostics: Vec<StepDiagnostic>,
}

impl QueryResponse {
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// True when no engine contributed any content
    pub fn is_empty(&self) -> bool {
        self.bilingual_entries.is_empty()
            && self.monolingual_entries.is_empty()
            && self.synonym_entries.is_empty()
            && self.external_contents.is_empty()
            && self.similar_recommendations.is_empty()
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.status != StepStatus::Success)
    }

    /// Everything except timing data
    pub fn content(&self) -> ResponseContent<'_> {
        ResponseContent {
            bilingual_entries: &self.bilingual_entries,
            grouped_bilingual_entries: &self.grouped_bilingual_entries,
            monolingual_entries: &self.monolingual_entries,
            synonym_entries: &self.synonym_entries,
            external_contents: &self.external_contents,
            similar_recommendations: &self.similar_recommendations,
        }
    }
}

/// Deterministic part of a [`QueryResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseContent<'a> {
    pub bilingual_entries: &'a [BilingualEntry],
    pub grouped_bilingual_entries: &'a [ResultGroup],
    pub monolingual_entries: &'a [MonolingualEntry],
    pub synonym_entries: &'a [SynonymEntry],
    pub external_contents: &'a [ExternalContent],
    pub similar_recommendations: &'a [DictionaryObject],
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
