use metadict_types::TypeError;

/// Input errors detected before any engine is called
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanningError {
    #[error("Query string is empty")]
    EmptyQuery,

    #[error("Invalid dictionary specification: {0}")]
    InvalidDictionary(#[from] TypeError),

    #[error("No engine registered under the name '{0}'")]
    UnknownEngine(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("An engine named '{0}' is already registered")]
    DuplicateEngine(String),

    #[error("Engine name must not be empty")]
    EmptyEngineName,
}
