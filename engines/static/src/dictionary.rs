use std::collections::{HashMap, HashSet};

use metadict_engine::AutoTestCase;
use metadict_types::{
    BilingualDictionary, BilingualEntry, BilingualQueryResult, DictionaryObject, EngineQueryResult,
    Language, MonolingualEntry, MonolingualQueryResult, QueryTarget, SynonymEntry,
};
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::StaticDictionaryError;

/// Upper bound of similar words suggested per lookup
const MAX_RECOMMENDATIONS: usize = 5;

// On-disk format
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DictionaryJson {
    bilingual: Vec<BilingualEntry>,
    monolingual: Vec<MonolingualEntry>,
    synonyms: Vec<SynonymEntry>,
    self_tests: Vec<TestCaseJson>,
}

#[derive(Debug, Deserialize)]
struct TestCaseJson {
    query: String,
    target: String,
    expected: EngineQueryResult,
}

/// Lookup key: language plus case-folded, composed general form
type FormKey = (Language, String);

fn form_key(object: &DictionaryObject) -> FormKey {
    (object.language().clone(), fold(object.general_form()))
}

fn fold(form: &str) -> String {
    form.nfc().collect::<String>().to_lowercase()
}

#[derive(Debug, Default)]
struct Indexes {
    bilingual: HashMap<FormKey, Vec<usize>>,
    monolingual: HashMap<FormKey, Vec<usize>>,
    synonyms: HashMap<FormKey, Vec<usize>>,
    /// Distinct objects per language in first-seen order
    vocabulary: HashMap<Language, Vec<DictionaryObject>>,
}

impl Indexes {
    fn build(
        bilingual: &[BilingualEntry],
        monolingual: &[MonolingualEntry],
        synonyms: &[SynonymEntry],
    ) -> Self {
        let mut indexes = Indexes::default();
        let mut seen: HashSet<FormKey> = HashSet::new();
        let mut remember = |vocabulary: &mut HashMap<Language, Vec<DictionaryObject>>,
                            object: &DictionaryObject| {
            if seen.insert(form_key(object)) {
                vocabulary
                    .entry(object.language().clone())
                    .or_default()
                    .push(object.clone());
            }
        };

        for (idx, entry) in bilingual.iter().enumerate() {
            let input = form_key(&entry.input);
            let output = form_key(&entry.output);
            if input != output {
                indexes.bilingual.entry(output).or_default().push(idx);
            }
            indexes.bilingual.entry(input).or_default().push(idx);

            remember(&mut indexes.vocabulary, &entry.input);
            remember(&mut indexes.vocabulary, &entry.output);
        }

        for (idx, entry) in monolingual.iter().enumerate() {
            indexes
                .monolingual
                .entry(form_key(&entry.content))
                .or_default()
                .push(idx);
            remember(&mut indexes.vocabulary, &entry.content);
        }

        for (idx, entry) in synonyms.iter().enumerate() {
            indexes
                .synonyms
                .entry(form_key(&entry.base_object))
                .or_default()
                .push(idx);
        }

        indexes
    }
}

/// Word list with exact-match indexes over every object it contains
#[derive(Debug, Default)]
pub struct StaticDictionary {
    bilingual: Vec<BilingualEntry>,
    monolingual: Vec<MonolingualEntry>,
    synonyms: Vec<SynonymEntry>,
    self_tests: Vec<AutoTestCase>,
    indexes: Indexes,
}

impl StaticDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json_str: &str) -> Result<Self, StaticDictionaryError> {
        let data: DictionaryJson = serde_json::from_str(json_str)?;

        let self_tests = data
            .self_tests
            .into_iter()
            .map(|case| {
                let target = QueryTarget::parse(&case.target).map_err(|e| {
                    StaticDictionaryError::InvalidTestCase {
                        query: case.query.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(AutoTestCase {
                    query: case.query,
                    target,
                    expected: case.expected,
                })
            })
            .collect::<Result<Vec<_>, StaticDictionaryError>>()?;

        Ok(Self::from_parts(
            data.bilingual,
            data.monolingual,
            data.synonyms,
            self_tests,
        ))
    }

    pub fn from_parts(
        bilingual: Vec<BilingualEntry>,
        monolingual: Vec<MonolingualEntry>,
        synonyms: Vec<SynonymEntry>,
        self_tests: Vec<AutoTestCase>,
    ) -> Self {
        let indexes = Indexes::build(&bilingual, &monolingual, &synonyms);
        Self {
            bilingual,
            monolingual,
            synonyms,
            self_tests,
            indexes,
        }
    }

    /// Number of bilingual and monolingual entries
    pub fn entry_count(&self) -> usize {
        self.bilingual.len() + self.monolingual.len()
    }

    pub fn self_tests(&self) -> &[AutoTestCase] {
        &self.self_tests
    }

    pub fn has_synonyms(&self) -> bool {
        !self.synonyms.is_empty()
    }

    /// Language pairs present in the data. Every pair is served both ways.
    pub fn bilingual_dictionaries(&self) -> Vec<BilingualDictionary> {
        let mut dictionaries: Vec<BilingualDictionary> = Vec::new();
        for entry in &self.bilingual {
            let Ok(dictionary) = BilingualDictionary::new(
                entry.input.language().clone(),
                entry.output.language().clone(),
                true,
            ) else {
                continue;
            };
            if !dictionaries.contains(&dictionary) {
                dictionaries.push(dictionary);
            }
        }
        dictionaries
    }

    pub fn monolingual_languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = Vec::new();
        for entry in &self.monolingual {
            let language = entry.content.language();
            if !languages.contains(language) {
                languages.push(language.clone());
            }
        }
        languages
    }

    /// Entries translating `query` from `input` to `output`. Entries stored
    /// the other way round are returned reversed.
    pub fn lookup_bilingual(
        &self,
        query: &str,
        input: &Language,
        output: &Language,
    ) -> BilingualQueryResult {
        let key = (input.clone(), fold(query));

        let bilingual_entries = self
            .indexes
            .bilingual
            .get(&key)
            .into_iter()
            .flatten()
            .filter_map(|&idx| {
                let entry = &self.bilingual[idx];
                if entry.input.language() == input
                    && entry.output.language() == output
                    && form_key(&entry.input) == key
                {
                    Some(entry.clone())
                } else if entry.output.language() == input
                    && entry.input.language() == output
                    && form_key(&entry.output) == key
                {
                    Some(entry.reversed())
                } else {
                    None
                }
            })
            .collect();

        BilingualQueryResult {
            bilingual_entries,
            synonym_entries: self.synonyms_for(&key),
            external_contents: Vec::new(),
            similar_recommendations: self.similar(&key),
        }
    }

    pub fn lookup_monolingual(&self, query: &str, language: &Language) -> MonolingualQueryResult {
        let key = (language.clone(), fold(query));

        let monolingual_entries = self
            .indexes
            .monolingual
            .get(&key)
            .into_iter()
            .flatten()
            .map(|&idx| self.monolingual[idx].clone())
            .collect();

        MonolingualQueryResult {
            monolingual_entries,
            external_contents: Vec::new(),
            similar_recommendations: self.similar(&key),
        }
    }

    fn synonyms_for(&self, key: &FormKey) -> Vec<SynonymEntry> {
        self.indexes
            .synonyms
            .get(key)
            .into_iter()
            .flatten()
            .map(|&idx| self.synonyms[idx].clone())
            .collect()
    }

    /// Known words in the same language that extend the query
    fn similar(&self, (language, form): &FormKey) -> Vec<DictionaryObject> {
        if form.is_empty() {
            return Vec::new();
        }

        self.indexes
            .vocabulary
            .get(language)
            .into_iter()
            .flatten()
            .filter(|object| {
                let candidate = fold(object.general_form());
                candidate != *form && candidate.starts_with(form.as_str())
            })
            .take(MAX_RECOMMENDATIONS)
            .cloned()
            .collect()
    }

    /// Merge another dictionary into this one. Entries already present are
    /// skipped, new ones are appended in order.
    pub fn merge(self, other: StaticDictionary) -> Self {
        let StaticDictionary {
            mut bilingual,
            mut monolingual,
            mut synonyms,
            mut self_tests,
            ..
        } = self;

        append_new(&mut bilingual, other.bilingual);
        append_new(&mut monolingual, other.monolingual);
        append_new(&mut synonyms, other.synonyms);
        append_new(&mut self_tests, other.self_tests);

        Self::from_parts(bilingual, monolingual, synonyms, self_tests)
    }
}

fn append_new<T: PartialEq>(base: &mut Vec<T>, additional: Vec<T>) {
    for item in additional {
        if !base.contains(&item) {
            base.push(item);
        }
    }
}
