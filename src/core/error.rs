use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ContextError>;

impl From<serde_json::Error> for ContextError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
