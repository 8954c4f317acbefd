use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

///
/// Gene struct, one gene of one viral strain together with its
/// reference amino-acid sequence.
///
/// Genes are compared by `(strain, ordinal, name)`. The reference sequence
/// is reference data and does not take part in identity.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gene {
    pub strain: String,
    pub name: String,
    pub abstract_gene: String,
    #[serde(default)]
    pub ordinal: u32,
    pub ref_sequence: String,
}

impl Gene {
    pub fn new(
        strain: impl Into<String>,
        name: impl Into<String>,
        abstract_gene: impl Into<String>,
        ordinal: u32,
        ref_sequence: impl Into<String>,
    ) -> Self {
        Gene {
            strain: strain.into(),
            name: name.into(),
            abstract_gene: abstract_gene.into(),
            ordinal,
            ref_sequence: ref_sequence.into(),
        }
    }

    ///
    /// Number of amino acids in the reference sequence
    ///
    pub fn aa_length(&self) -> u32 {
        self.ref_sequence.len() as u32
    }

    ///
    /// Reference amino acid at a 1-based position, `None` when the
    /// position lies outside the gene
    ///
    pub fn ref_char(&self, position: u32) -> Option<char> {
        if position == 0 {
            return None;
        }
        self.ref_sequence
            .as_bytes()
            .get(position as usize - 1)
            .map(|&b| b as char)
    }

    fn identity(&self) -> (&str, u32, &str) {
        (&self.strain, self.ordinal, &self.name)
    }
}

impl PartialEq for Gene {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Gene {}

impl Hash for Gene {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for Gene {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Gene {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

///
/// A single amino-acid position within a gene.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenePosition {
    pub gene: Arc<Gene>,
    pub position: u32,
}

impl GenePosition {
    pub fn new(gene: Arc<Gene>, position: u32) -> Self {
        GenePosition { gene, position }
    }

    pub fn abstract_gene(&self) -> &str {
        &self.gene.abstract_gene
    }
}

impl Display for GenePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.gene.abstract_gene, self.position)
    }
}
