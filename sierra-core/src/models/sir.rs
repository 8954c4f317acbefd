use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SirParseError;

/// The standard three-level resistance scale algorithms map their own
/// reporting levels onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sir {
    /// Susceptible
    S,
    /// Intermediate
    I,
    /// Resistant
    R,
}

impl Display for Sir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sir::S => write!(f, "S"),
            Sir::I => write!(f, "I"),
            Sir::R => write!(f, "R"),
        }
    }
}

impl FromStr for Sir {
    type Err = SirParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S" => Ok(Sir::S),
            "I" => Ok(Sir::I),
            "R" => Ok(Sir::R),
            other => Err(SirParseError(other.to_string())),
        }
    }
}
