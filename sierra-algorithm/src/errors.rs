use thiserror::Error;

/// Failure reported by an [`AsiTransformer`](crate::AsiTransformer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct AsiParsingError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("Malformed algorithm document: {0}")]
    MalformedDocument(String),
}

impl From<AsiParsingError> for AlgorithmError {
    fn from(err: AsiParsingError) -> Self {
        AlgorithmError::MalformedDocument(err.0)
    }
}
