use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("field '{0}' not found")]
    MissingField(String),

    #[error("field '{key}' is not a {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
    },

    #[error("field '{key}' is invalid: {reason}")]
    InvalidValue {
        key: String,
        reason: String,
    },

    #[error("unknown graph type {0}")]
    UnknownGraphType(Uuid),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

impl ChunkError {
    pub fn invalid_value(key: &str, reason: impl Into<String>) -> ChunkError {
        ChunkError::InvalidValue {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}
