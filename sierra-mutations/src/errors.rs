use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Position {position} is out of bounds for gene {gene} (length {length})")]
    InvalidPosition {
        gene: String,
        position: u32,
        length: u32,
    },

    #[error("The other mutation must be at this position: {position} ({gene})")]
    MismatchedPosition { gene: String, position: u32 },

    #[error("No amino acids given for {gene} position {position}")]
    EmptyAminoAcids { gene: String, position: u32 },

    #[error("Unknown gene: {0}")]
    UnknownGene(String),

    #[error("Error parsing mutation: {0}")]
    MutationParseError(String),
}

#[derive(Error, Debug)]
pub enum KnowledgeBaseError {
    #[error("Can't parse knowledge base JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog entry: {0}")]
    Mutation(#[from] MutationError),

    #[error("Invalid gene position: {0}")]
    InvalidGenePosition(String),
}
