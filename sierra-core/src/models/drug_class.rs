use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A drug class such as `NRTI`, `NNRTI`, `PI` or `INSTI`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrugClass(String);

impl DrugClass {
    pub fn new(name: impl Into<String>) -> Self {
        DrugClass(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for DrugClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DrugClass {
    fn from(name: &str) -> Self {
        DrugClass::new(name)
    }
}

/// A knowledge-base defined mutation classification tag, e.g. `Major`,
/// `Accessory` or `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutationType(String);

impl MutationType {
    pub fn new(name: impl Into<String>) -> Self {
        MutationType(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for MutationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MutationType {
    fn from(name: &str) -> Self {
        MutationType::new(name)
    }
}
