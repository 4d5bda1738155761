#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Query type not supported by this engine")]
    Unsupported,

    #[error("Backend error: {0}")]
    Backend(String),

    /// Transport failure of an HTTP-backed engine. `reqwest` errors convert
    /// with `?`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse backend response: {0}")]
    Parse(String),

    #[error("Backend unavailable")]
    Unavailable,
}
