use std::collections::{HashMap, HashSet};

use metadict_types::{
    BilingualDictionary, BilingualEntry, DictionaryObject, EngineQueryResult, Language,
    QueryResponse, ResultGroup, SynonymEntry,
};

use crate::execution::QueryStepResult;
use crate::plan::StepKind;

/// Merges step results into one [`QueryResponse`].
///
/// Aggregation never fails. Results are processed in plan order; failed
/// steps contribute only their diagnostic record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAggregator;

impl ResultAggregator {
    pub fn aggregate(&self, query: &str, mut results: Vec<QueryStepResult>) -> QueryResponse {
        results.sort_by_key(|result| result.step().index());

        let mut response = QueryResponse::empty(query);
        let mut groups = GroupCollector::default();
        let mut synonyms = SynonymMerger::default();
        let mut recommendations = RecommendationCollector::default();

        for result in results {
            response.diagnostics.push(result.diagnostic());
            if !result.is_success() {
                continue;
            }

            let (step, payload) = result.into_parts();
            match payload {
                EngineQueryResult::Bilingual(bilingual) => {
                    if let StepKind::Bilingual { dictionary, .. } = step.kind() {
                        groups.add(dictionary, &bilingual.bilingual_entries);
                    }
                    response.bilingual_entries.extend(bilingual.bilingual_entries);
                    synonyms.add_all(bilingual.synonym_entries);
                    response.external_contents.extend(bilingual.external_contents);
                    recommendations.add_all(bilingual.similar_recommendations);
                }
                EngineQueryResult::Monolingual(monolingual) => {
                    response.monolingual_entries.extend(monolingual.monolingual_entries);
                    response.external_contents.extend(monolingual.external_contents);
                    recommendations.add_all(monolingual.similar_recommendations);
                }
                EngineQueryResult::Empty => {}
            }
        }

        response.grouped_bilingual_entries = groups.finish();
        response.synonym_entries = synonyms.finish();
        response.similar_recommendations = recommendations.finish();

        tracing::debug!(
            "Aggregated {} step(s) for '{}': {} bilingual, {} monolingual, {} synonym entries, {} failed",
            response.diagnostics.len(),
            query,
            response.bilingual_entries.len(),
            response.monolingual_entries.len(),
            response.synonym_entries.len(),
            response.failed_steps().count()
        );

        response
    }
}

/// Bilingual entries per requested dictionary, groups in first-seen order
#[derive(Default)]
struct GroupCollector {
    groups: Vec<ResultGroup>,
}

impl GroupCollector {
    fn add(&mut self, dictionary: &BilingualDictionary, entries: &[BilingualEntry]) {
        if entries.is_empty() {
            return;
        }

        match self.groups.iter_mut().find(|group| &group.dictionary == dictionary) {
            Some(group) => group.entries.extend_from_slice(entries),
            None => self.groups.push(ResultGroup {
                dictionary: dictionary.clone(),
                entries: entries.to_vec(),
            }),
        }
    }

    fn finish(self) -> Vec<ResultGroup> {
        self.groups
    }
}

/// Unions synonym entries whose base objects share language and general form
#[derive(Default)]
pub(crate) struct SynonymMerger {
    entries: Vec<SynonymEntry>,
    index: HashMap<(Language, String), usize>,
}

impl SynonymMerger {
    pub(crate) fn add_all(&mut self, entries: impl IntoIterator<Item = SynonymEntry>) {
        for entry in entries {
            self.add(entry);
        }
    }

    pub(crate) fn add(&mut self, entry: SynonymEntry) {
        let (language, form) = entry.base_object.merge_key();
        let key = (language.clone(), form.to_string());

        match self.index.get(&key) {
            Some(&position) => {
                let existing = &mut self.entries[position];
                existing.base_object = existing.base_object.merged_with(&entry.base_object);
                existing.base_entry_type = existing.base_entry_type.or(entry.base_entry_type);
                existing.synonym_groups.extend(entry.synonym_groups);
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<SynonymEntry> {
        self.entries
    }
}

/// Recommendations without duplicates, first occurrence kept
#[derive(Default)]
pub(crate) struct RecommendationCollector {
    seen: HashSet<DictionaryObject>,
    recommendations: Vec<DictionaryObject>,
}

impl RecommendationCollector {
    pub(crate) fn add_all(&mut self, objects: Vec<DictionaryObject>) {
        for object in objects {
            if self.seen.insert(object.clone()) {
                self.recommendations.push(object);
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<DictionaryObject> {
        self.recommendations
    }
}
