use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::language::{GrammaticalForm, GrammaticalGender, Language};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Phrase,
    Preposition,
    Pronoun,
    Conjunction,
    Interjection,
    Abbreviation,
    #[default]
    Unknown,
}

/// One lexical entry as returned by an engine: a word or phrase in a
/// concrete language plus whatever grammar data the source provided.
///
/// Values are immutable once built. Construction goes through
/// [`DictionaryObject::simple`] or [`DictionaryObjectBuilder::build`], both
/// of which reject an empty general form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DictionaryObjectBuilder")]
pub struct DictionaryObject {
    language: Language,
    general_form: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    abbreviation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grammatical_gender: Option<GrammaticalGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pronunciation: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    additional_forms: BTreeMap<GrammaticalForm, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meanings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    synonyms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternate_forms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    syllabification: Option<Vec<String>>,
}

impl DictionaryObject {
    /// Object with only language and general form set
    pub fn simple(language: Language, general_form: impl Into<String>) -> Result<Self, TypeError> {
        Self::builder()
            .language(language)
            .general_form(general_form)
            .build()
    }

    pub fn builder() -> DictionaryObjectBuilder {
        DictionaryObjectBuilder::default()
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn general_form(&self) -> &str {
        &self.general_form
    }

    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn grammatical_gender(&self) -> Option<GrammaticalGender> {
        self.grammatical_gender
    }

    pub fn pronunciation(&self) -> Option<&str> {
        self.pronunciation.as_deref()
    }

    pub fn additional_forms(&self) -> &BTreeMap<GrammaticalForm, String> {
        &self.additional_forms
    }

    pub fn meanings(&self) -> Option<&[String]> {
        self.meanings.as_deref()
    }

    pub fn synonyms(&self) -> Option<&[String]> {
        self.synonyms.as_deref()
    }

    pub fn alternate_forms(&self) -> Option<&[String]> {
        self.alternate_forms.as_deref()
    }

    pub fn syllabification(&self) -> Option<&[String]> {
        self.syllabification.as_deref()
    }

    /// Identity used when merging results from several engines
    pub fn merge_key(&self) -> (&Language, &str) {
        (&self.language, &self.general_form)
    }

    /// Combine two objects with the same merge key. Scalar fields keep the
    /// value of `self` when present; list fields and additional forms are
    /// unioned in first-seen order.
    pub fn merged_with(&self, other: &DictionaryObject) -> DictionaryObject {
        let mut additional_forms = self.additional_forms.clone();
        for (form, value) in &other.additional_forms {
            additional_forms
                .entry(*form)
                .or_insert_with(|| value.clone());
        }

        DictionaryObject {
            language: self.language.clone(),
            general_form: self.general_form.clone(),
            abbreviation: self.abbreviation.clone().or_else(|| other.abbreviation.clone()),
            description: self.description.clone().or_else(|| other.description.clone()),
            domain: self.domain.clone().or_else(|| other.domain.clone()),
            grammatical_gender: self.grammatical_gender.or(other.grammatical_gender),
            pronunciation: self.pronunciation.clone().or_else(|| other.pronunciation.clone()),
            additional_forms,
            meanings: union_lists(&self.meanings, &other.meanings),
            synonyms: union_lists(&self.synonyms, &other.synonyms),
            alternate_forms: union_lists(&self.alternate_forms, &other.alternate_forms),
            syllabification: union_lists(&self.syllabification, &other.syllabification),
        }
    }
}

fn union_lists(first: &Option<Vec<String>>, second: &Option<Vec<String>>) -> Option<Vec<String>> {
    match (first, second) {
        (None, None) => None,
        (Some(list), None) | (None, Some(list)) => Some(list.clone()),
        (Some(first), Some(second)) => {
            let mut merged = first.clone();
            for item in second {
                if !merged.contains(item) {
                    merged.push(item.clone());
                }
            }
            Some(merged)
        }
    }
}

/// Builder for [`DictionaryObject`]. Also the serde input format, so that
/// deserialized objects are validated the same way.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DictionaryObjectBuilder {
    language: Option<Language>,
    general_form: Option<String>,
    abbreviation: Option<String>,
    description: Option<String>,
    domain: Option<String>,
    grammatical_gender: Option<GrammaticalGender>,
    pronunciation: Option<String>,
    additional_forms: BTreeMap<GrammaticalForm, String>,
    meanings: Option<Vec<String>>,
    synonyms: Option<Vec<String>>,
    alternate_forms: Option<Vec<String>>,
    syllabification: Option<Vec<String>>,
}

impl DictionaryObjectBuilder {
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn general_form(mut self, general_form: impl Into<String>) -> Self {
        self.general_form = Some(general_form.into());
        self
    }

    pub fn abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn grammatical_gender(mut self, gender: GrammaticalGender) -> Self {
        self.grammatical_gender = Some(gender);
        self
    }

    pub fn pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    pub fn additional_form(mut self, form: GrammaticalForm, value: impl Into<String>) -> Self {
        self.additional_forms.insert(form, value.into());
        self
    }

    pub fn meanings(mut self, meanings: Vec<String>) -> Self {
        self.meanings = Some(meanings);
        self
    }

    pub fn synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.synonyms = Some(synonyms);
        self
    }

    pub fn alternate_forms(mut self, alternate_forms: Vec<String>) -> Self {
        self.alternate_forms = Some(alternate_forms);
        self
    }

    pub fn syllabification(mut self, syllables: Vec<String>) -> Self {
        self.syllabification = Some(syllables);
        self
    }

    pub fn build(self) -> Result<DictionaryObject, TypeError> {
        let language = self.language.ok_or(TypeError::MissingLanguage)?;
        let general_form = self
            .general_form
            .map(|form| form.trim().to_string())
            .filter(|form| !form.is_empty())
            .ok_or(TypeError::EmptyGeneralForm)?;

        Ok(DictionaryObject {
            language,
            general_form,
            abbreviation: self.abbreviation,
            description: self.description,
            domain: self.domain,
            grammatical_gender: self.grammatical_gender,
            pronunciation: self.pronunciation,
            additional_forms: self.additional_forms,
            meanings: self.meanings,
            synonyms: self.synonyms,
            alternate_forms: self.alternate_forms,
            syllabification: self.syllabification,
        })
    }
}

impl TryFrom<DictionaryObjectBuilder> for DictionaryObject {
    type Error = TypeError;

    fn try_from(builder: DictionaryObjectBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
