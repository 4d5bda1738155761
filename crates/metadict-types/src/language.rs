use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Language identifier (ISO 639-1/-2 code: "de", "en", "sv", ...) with an
/// optional dialect, written as `no_ny`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language {
    identifier: String,
    dialect: Option<String>,
}

impl Language {
    /// Parse a language code such as `"de"` or `"no_ny"`. Codes are
    /// case-insensitive and stored lowercase.
    pub fn parse(code: &str) -> Result<Self, TypeError> {
        let code = code.trim().to_ascii_lowercase();
        let (identifier, dialect) = match code.split_once('_') {
            Some((identifier, dialect)) => (identifier, Some(dialect)),
            None => (code.as_str(), None),
        };

        let identifier_ok =
            (2..=3).contains(&identifier.len()) && identifier.chars().all(|c| c.is_ascii_lowercase());
        let dialect_ok = dialect.is_none_or(|d| {
            (1..=8).contains(&d.len()) && d.chars().all(|c| c.is_ascii_alphanumeric())
        });

        if !identifier_ok || !dialect_ok {
            return Err(TypeError::InvalidLanguage(code));
        }

        Ok(Self {
            identifier: identifier.to_string(),
            dialect: dialect.map(str::to_string),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn dialect(&self) -> Option<&str> {
        self.dialect.as_deref()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dialect {
            Some(dialect) => write!(f, "{}_{}", self.identifier, dialect),
            None => f.write_str(&self.identifier),
        }
    }
}

impl FromStr for Language {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammaticalGender {
    Masculine,
    Feminine,
    Neuter,
    None,
    Unknown,
}

/// Keys of the additional-forms map on a dictionary object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammaticalForm {
    Singular,
    Plural,
    Infinitive,
    PresentTense,
    PastTense,
    PerfectTense,
    PresentParticiple,
    PastParticiple,
    Comparative,
    Superlative,
    Genitive,
    Dative,
    Accusative,
}

/// A pair of two distinct languages. When `bidirectional` is set the pair
/// is unordered: `de-en` and `en-de` compare and hash the same.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBilingualDictionary")]
pub struct BilingualDictionary {
    input: Language,
    output: Language,
    bidirectional: bool,
}

#[derive(Deserialize)]
struct RawBilingualDictionary {
    input: Language,
    output: Language,
    #[serde(default)]
    bidirectional: bool,
}

impl TryFrom<RawBilingualDictionary> for BilingualDictionary {
    type Error = TypeError;

    fn try_from(raw: RawBilingualDictionary) -> Result<Self, Self::Error> {
        Self::new(raw.input, raw.output, raw.bidirectional)
    }
}

impl BilingualDictionary {
    pub fn new(input: Language, output: Language, bidirectional: bool) -> Result<Self, TypeError> {
        if input == output {
            return Err(TypeError::IdenticalLanguages(input));
        }
        Ok(Self {
            input,
            output,
            bidirectional,
        })
    }

    /// Build from a query string of the form `"de-en"`
    pub fn from_query_string(query: &str, bidirectional: bool) -> Result<Self, TypeError> {
        let (input, output) = query
            .split_once('-')
            .ok_or_else(|| TypeError::InvalidDictionary(query.to_string()))?;

        Self::new(Language::parse(input)?, Language::parse(output)?, bidirectional)
    }

    pub fn input(&self) -> &Language {
        &self.input
    }

    pub fn output(&self) -> &Language {
        &self.output
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Whether this dictionary can translate from `input` to `output`
    pub fn supports(&self, input: &Language, output: &Language) -> bool {
        (&self.input == input && &self.output == output)
            || (self.bidirectional && &self.input == output && &self.output == input)
    }

    /// Directions served by this dictionary, forward first
    pub fn directions(&self) -> Vec<(Language, Language)> {
        let mut directions = vec![(self.input.clone(), self.output.clone())];
        if self.bidirectional {
            directions.push((self.output.clone(), self.input.clone()));
        }
        directions
    }

    pub fn query_string(&self) -> String {
        format!("{}-{}", self.input, self.output)
    }

    fn canonical(&self) -> (&Language, &Language) {
        if self.bidirectional && self.output < self.input {
            (&self.output, &self.input)
        } else {
            (&self.input, &self.output)
        }
    }
}

impl PartialEq for BilingualDictionary {
    fn eq(&self, other: &Self) -> bool {
        self.bidirectional == other.bidirectional && self.canonical() == other.canonical()
    }
}

impl Hash for BilingualDictionary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bidirectional.hash(state);
        self.canonical().hash(state);
    }
}

impl fmt::Display for BilingualDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.bidirectional { '-' } else { '>' };
        write!(f, "{}{}{}", self.input, separator, self.output)
    }
}
