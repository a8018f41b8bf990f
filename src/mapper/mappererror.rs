use thiserror::Error;

use crate::configuration::ConfigurationError;
use crate::serialization::chunkerror::ChunkError;

#[derive(Debug, Error)]
pub enum MapperError {
    /// Empty sample list or a missing source/target interval.
    #[error("insufficient input: {0}")]
    InsufficientInput(&'static str),

    #[error(transparent)]
    ChunkError(#[from] ChunkError),

    #[error(transparent)]
    ConfigurationError(#[from] ConfigurationError),
}
