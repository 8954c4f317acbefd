use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid SIR level: {0}. Expected one of S, I or R")]
pub struct SirParseError(pub String);
