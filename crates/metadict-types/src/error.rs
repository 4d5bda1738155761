use crate::language::Language;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("Invalid language code: '{0}'")]
    InvalidLanguage(String),

    #[error("Dictionary needs two distinct languages, got {0} twice")]
    IdenticalLanguages(Language),

    #[error("Invalid dictionary query string: '{0}'")]
    InvalidDictionary(String),

    #[error("Dictionary object is missing its language")]
    MissingLanguage,

    #[error("Dictionary object needs a non-empty general form")]
    EmptyGeneralForm,

    #[error("External content needs a non-empty title")]
    EmptyTitle,

    #[error("Invalid external content link '{link}': {reason}")]
    InvalidLink { link: String, reason: String },
}
