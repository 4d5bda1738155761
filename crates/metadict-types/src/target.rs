use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::language::{BilingualDictionary, Language};

/// One dictionary a query should be answered in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryTarget {
    /// Translation between two languages. A bidirectional dictionary asks
    /// for reverse lookups as well.
    Bilingual(BilingualDictionary),
    Monolingual(Language),
}

impl QueryTarget {
    /// Parse a single target: `"de-en"` (both directions), `"de>en"`
    /// (forward only) or `"de"` (monolingual)
    pub fn parse(target: &str) -> Result<Self, TypeError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(TypeError::InvalidDictionary(target.to_string()));
        }

        if let Some((input, output)) = target.split_once('>') {
            let dictionary = BilingualDictionary::new(
                parse_language(input, target)?,
                parse_language(output, target)?,
                false,
            )?;
            return Ok(QueryTarget::Bilingual(dictionary));
        }

        if let Some((input, output)) = target.split_once('-') {
            let dictionary = BilingualDictionary::new(
                parse_language(input, target)?,
                parse_language(output, target)?,
                true,
            )?;
            return Ok(QueryTarget::Bilingual(dictionary));
        }

        Ok(QueryTarget::Monolingual(Language::parse(target)?))
    }
}

fn parse_language(code: &str, target: &str) -> Result<Language, TypeError> {
    if code.contains(['-', '>']) {
        return Err(TypeError::InvalidDictionary(target.to_string()));
    }
    Language::parse(code)
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryTarget::Bilingual(dictionary) => dictionary.fmt(f),
            QueryTarget::Monolingual(language) => language.fmt(f),
        }
    }
}

impl FromStr for QueryTarget {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parsed dictionary specification of a request, e.g. `"de-en, de>sv, de"`.
/// Duplicate targets are dropped, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySpec {
    targets: Vec<QueryTarget>,
}

impl DictionarySpec {
    pub fn parse(spec: &str) -> Result<Self, TypeError> {
        if spec.trim().is_empty() {
            return Err(TypeError::InvalidDictionary(spec.to_string()));
        }

        let mut targets: Vec<QueryTarget> = Vec::new();
        for part in spec.split(',') {
            let target = QueryTarget::parse(part)?;
            if !targets.contains(&target) {
                targets.push(target);
            }
        }

        Ok(Self { targets })
    }

    pub fn single(target: QueryTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    pub fn targets(&self) -> &[QueryTarget] {
        &self.targets
    }
}

impl FromStr for DictionarySpec {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
