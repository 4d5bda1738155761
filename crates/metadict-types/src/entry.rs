use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TypeError;
use crate::object::{DictionaryObject, EntryType};

/// Translation of one object into another language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BilingualEntry {
    pub input: DictionaryObject,
    pub output: DictionaryObject,
    #[serde(default)]
    pub entry_type: EntryType,
}

impl BilingualEntry {
    pub fn new(input: DictionaryObject, output: DictionaryObject, entry_type: EntryType) -> Self {
        Self {
            input,
            output,
            entry_type,
        }
    }

    /// Same entry seen from the other language
    pub fn reversed(&self) -> Self {
        Self {
            input: self.output.clone(),
            output: self.input.clone(),
            entry_type: self.entry_type,
        }
    }
}

/// Entry describing a word within a single language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonolingualEntry {
    pub content: DictionaryObject,
    #[serde(default)]
    pub entry_type: EntryType,
}

impl MonolingualEntry {
    pub fn new(content: DictionaryObject, entry_type: EntryType) -> Self {
        Self {
            content,
            entry_type,
        }
    }
}

/// Synonyms sharing one meaning
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub base_meaning: DictionaryObject,
    #[serde(default)]
    pub synonyms: Vec<DictionaryObject>,
}

impl SynonymGroup {
    pub fn new(base_meaning: DictionaryObject, synonyms: Vec<DictionaryObject>) -> Self {
        Self {
            base_meaning,
            synonyms,
        }
    }
}

/// All synonym groups known for a base word
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub base_object: DictionaryObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_entry_type: Option<EntryType>,
    #[serde(default)]
    pub synonym_groups: Vec<SynonymGroup>,
}

impl SynonymEntry {
    pub fn new(base_object: DictionaryObject, synonym_groups: Vec<SynonymGroup>) -> Self {
        Self {
            base_object,
            base_entry_type: None,
            synonym_groups,
        }
    }

    pub fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.base_entry_type = Some(entry_type);
        self
    }
}

/// Supplementary material attached by an engine, e.g. a "see also" link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalContent {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    link: Url,
}

impl ExternalContent {
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        link: &str,
    ) -> Result<Self, TypeError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TypeError::EmptyTitle);
        }

        let link = Url::parse(link).map_err(|e| TypeError::InvalidLink {
            link: link.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(link.scheme(), "http" | "https") {
            return Err(TypeError::InvalidLink {
                link: link.to_string(),
                reason: "only http and https links are allowed".to_string(),
            });
        }

        Ok(Self {
            title,
            description,
            link,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn link(&self) -> &Url {
        &self.link
    }
}
