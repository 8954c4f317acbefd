use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use sierra_core::models::Gene;

use crate::traits::AminoAcidPercents;

/// Prevalence of one amino acid at one gene position.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AminoAcidPercent {
    /// Abstract gene name, e.g. "RT"
    pub gene: String,
    pub position: u32,
    pub aa: char,
    /// Fraction of sequences carrying this amino acid (0 to 1)
    pub percent: f64,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub is_unusual: bool,
}

///
/// In-memory [`AminoAcidPercents`] backed by a list of records.
///
/// Amino acids without a record are treated as having no data: they are
/// not unusual and contribute a prevalence of zero.
///
#[derive(Clone, Debug, Default)]
pub struct AminoAcidPercentTable {
    records: HashMap<(String, u32, char), AminoAcidPercent>,
}

impl AminoAcidPercentTable {
    pub fn new(records: Vec<AminoAcidPercent>) -> Self {
        let records = records
            .into_iter()
            .map(|r| ((r.gene.clone(), r.position, r.aa), r))
            .collect();
        AminoAcidPercentTable { records }
    }

    pub fn get(&self, gene: &Gene, position: u32, aa: char) -> Option<&AminoAcidPercent> {
        self.records
            .get(&(gene.abstract_gene.clone(), position, aa))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AminoAcidPercents for AminoAcidPercentTable {
    fn contains_unusual_aa(&self, gene: &Gene, position: u32, aas: &str) -> bool {
        aas.chars()
            .filter_map(|aa| self.get(gene, position, aa))
            .any(|record| record.is_unusual)
    }

    fn highest_aa_percent_value(&self, gene: &Gene, position: u32, aas: &str) -> f64 {
        aas.chars()
            .filter_map(|aa| self.get(gene, position, aa))
            .map(|record| record.percent)
            .fold(0.0, f64::max)
    }
}

/// Prevalence of a mutation among treatment-naive and treated individuals
/// of one subtype.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MutationPrevalence {
    /// Abstract gene name, e.g. "RT"
    pub gene: String,
    pub position: u32,
    pub aa: char,
    pub subtype: String,
    pub total_naive: u32,
    pub frequency_naive: u32,
    pub percentage_naive: f64,
    pub total_treated: u32,
    pub frequency_treated: u32,
    pub percentage_treated: f64,
}
