//! Error types for Wird

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WirdError {
    #[error("Corpus integrity error: {0}")]
    CorpusIntegrity(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl serde::Serialize for WirdError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
