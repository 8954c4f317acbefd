use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use sierra_core::models::{DrugClass, MutationType};

use crate::amino_acids::normalize_aa_chars;
use crate::mutation::AAMutation;

///
/// Assigns a mutation type to the listed amino acids at one gene position,
/// e.g. PR 30N is a `Major` PI mutation.
///
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutationTypePair {
    /// Abstract gene name, e.g. "PR"
    pub gene: String,
    pub drug_class: DrugClass,
    pub position: u32,
    pub aas: String,
    pub mutation_type: MutationType,
}

impl MutationTypePair {
    pub fn aa_chars(&self) -> BTreeSet<char> {
        normalize_aa_chars(self.aas.chars())
    }

    ///
    /// Whether `mutation` carries one of the listed amino acids at this
    /// gene position. The reference amino acid and stop codons never match.
    ///
    pub fn is_mutation_matched(&self, mutation: &AAMutation) -> bool {
        mutation.abstract_gene() == self.gene
            && mutation.position() == self.position
            && mutation.contains_shared_aa(&self.aa_chars(), true)
    }
}
