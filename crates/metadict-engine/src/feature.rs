use metadict_types::{BilingualDictionary, Language};
use serde::{Deserialize, Serialize};

/// Capabilities declared by an engine provider. Built once per provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    provides_bilingual_entries: bool,
    provides_monolingual_entries: bool,
    provides_alternatives: bool,
    provides_external_content: bool,
    supports_fuzzy_search: bool,
    supports_self_test: bool,
    provides_synonyms_on_bilingual_query: bool,
    supported_bilingual_dictionaries: Vec<BilingualDictionary>,
    supported_monolingual_languages: Vec<Language>,
}

impl FeatureSet {
    pub fn builder() -> FeatureSetBuilder {
        FeatureSetBuilder::default()
    }

    pub fn provides_bilingual_entries(&self) -> bool {
        self.provides_bilingual_entries
    }

    pub fn provides_monolingual_entries(&self) -> bool {
        self.provides_monolingual_entries
    }

    pub fn provides_alternatives(&self) -> bool {
        self.provides_alternatives
    }

    pub fn provides_external_content(&self) -> bool {
        self.provides_external_content
    }

    pub fn supports_fuzzy_search(&self) -> bool {
        self.supports_fuzzy_search
    }

    pub fn supports_self_test(&self) -> bool {
        self.supports_self_test
    }

    pub fn provides_synonyms_on_bilingual_query(&self) -> bool {
        self.provides_synonyms_on_bilingual_query
    }

    pub fn supported_bilingual_dictionaries(&self) -> &[BilingualDictionary] {
        &self.supported_bilingual_dictionaries
    }

    pub fn supported_monolingual_languages(&self) -> &[Language] {
        &self.supported_monolingual_languages
    }

    /// Whether a bilingual lookup from `input` to `output` can be served
    pub fn supports_bilingual(&self, input: &Language, output: &Language) -> bool {
        self.provides_bilingual_entries
            && self
                .supported_bilingual_dictionaries
                .iter()
                .any(|dictionary| dictionary.supports(input, output))
    }

    pub fn supports_monolingual(&self, language: &Language) -> bool {
        self.provides_monolingual_entries && self.supported_monolingual_languages.contains(language)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureSetBuilder {
    features: FeatureSet,
}

impl FeatureSetBuilder {
    pub fn provides_bilingual_entries(mut self, value: bool) -> Self {
        self.features.provides_bilingual_entries = value;
        self
    }

    pub fn provides_monolingual_entries(mut self, value: bool) -> Self {
        self.features.provides_monolingual_entries = value;
        self
    }

    pub fn provides_alternatives(mut self, value: bool) -> Self {
        self.features.provides_alternatives = value;
        self
    }

    pub fn provides_external_content(mut self, value: bool) -> Self {
        self.features.provides_external_content = value;
        self
    }

    pub fn supports_fuzzy_search(mut self, value: bool) -> Self {
        self.features.supports_fuzzy_search = value;
        self
    }

    pub fn supports_self_test(mut self, value: bool) -> Self {
        self.features.supports_self_test = value;
        self
    }

    pub fn provides_synonyms_on_bilingual_query(mut self, value: bool) -> Self {
        self.features.provides_synonyms_on_bilingual_query = value;
        self
    }

    pub fn add_bilingual_dictionary(mut self, dictionary: BilingualDictionary) -> Self {
        if !self.features.supported_bilingual_dictionaries.contains(&dictionary) {
            self.features.supported_bilingual_dictionaries.push(dictionary);
        }
        self
    }

    pub fn add_monolingual_language(mut self, language: Language) -> Self {
        if !self.features.supported_monolingual_languages.contains(&language) {
            self.features.supported_monolingual_languages.push(language);
        }
        self
    }

    pub fn build(self) -> FeatureSet {
        self.features
    }
}
