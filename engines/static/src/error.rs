#[derive(Debug, thiserror::Error)]
pub enum StaticDictionaryError {
    #[error("Failed to read dictionary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dictionary data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid self-test for '{query}': {reason}")]
    InvalidTestCase { query: String, reason: String },
}
