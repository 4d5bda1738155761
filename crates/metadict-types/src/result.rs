use serde::{Deserialize, Serialize};

use crate::entry::{BilingualEntry, ExternalContent, MonolingualEntry, SynonymEntry};
use crate::object::DictionaryObject;

/// Raw answer of an engine to a bilingual query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilingualQueryResult {
    pub bilingual_entries: Vec<BilingualEntry>,
    pub synonym_entries: Vec<SynonymEntry>,
    pub external_contents: Vec<ExternalContent>,
    pub similar_recommendations: Vec<DictionaryObject>,
}

impl BilingualQueryResult {
    pub fn is_empty(&self) -> bool {
        self.bilingual_entries.is_empty()
            && self.synonym_entries.is_empty()
            && self.external_contents.is_empty()
            && self.similar_recommendations.is_empty()
    }
}

/// Raw answer of an engine to a monolingual query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonolingualQueryResult {
    pub monolingual_entries: Vec<MonolingualEntry>,
    pub external_contents: Vec<ExternalContent>,
    pub similar_recommendations: Vec<DictionaryObject>,
}

impl MonolingualQueryResult {
    pub fn is_empty(&self) -> bool {
        self.monolingual_entries.is_empty()
            && self.external_contents.is_empty()
            && self.similar_recommendations.is_empty()
    }
}

/// Payload carried by a single step result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineQueryResult {
    Bilingual(BilingualQueryResult),
    Monolingual(MonolingualQueryResult),
    #[default]
    Empty,
}

impl EngineQueryResult {
    pub fn is_empty(&self) -> bool {
        match self {
            EngineQueryResult::Bilingual(result) => result.is_empty(),
            EngineQueryResult::Monolingual(result) => result.is_empty(),
            EngineQueryResult::Empty => true,
        }
    }
}
