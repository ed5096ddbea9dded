use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsplitError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for DocsplitError {
    fn from(e: serde_json::Error) -> Self {
        DocsplitError::Serialize(e.to_string())
    }
}
