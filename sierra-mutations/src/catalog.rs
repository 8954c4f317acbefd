//! JSON-backed knowledge base.
//!
//! [`StaticVirus`] is an in-memory [`Virus`] built from a single JSON
//! document. Catalog mutations are written as `GENE:MUTATION` tokens, e.g.
//! `"RT:M184V"`, and catalogs keyed by drug class keep the order they are
//! declared in, which decides the drug class reported for mutations listed
//! under more than one class.
//!
//! ```json
//! {
//!   "name": "HIV1",
//!   "genes": [
//!     {"strain": "HIV1", "name": "HIV1RT", "abstractGene": "RT", "ordinal": 2, "refSequence": "PISP..."}
//!   ],
//!   "drugResistMutations": [{"drugClass": "NRTI", "mutations": ["RT:M184VI"]}],
//!   "otherMutationType": "Other"
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use sierra_core::models::{DrugClass, Gene, GenePosition, MutationType};

use crate::errors::{KnowledgeBaseError, MutationError};
use crate::mutation_set::MutationSet;
use crate::mutation_type::MutationTypePair;
use crate::prevalence::{AminoAcidPercent, AminoAcidPercentTable, MutationPrevalence};
use crate::traits::{AminoAcidPercents, DrugClassMutations, Virus};

// ============================================================================
// Serialized form
// ============================================================================

/// Mutations listed under one drug class.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugClassMutationList {
    pub drug_class: DrugClass,
    pub mutations: Vec<String>,
}

/// The JSON document [`StaticVirus`] is built from.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirusDefinition {
    pub name: String,
    pub genes: Vec<Gene>,

    #[serde(default)]
    pub drug_resist_mutations: Vec<DrugClassMutationList>,

    #[serde(default)]
    pub surveil_drug_resist_mutations: Vec<DrugClassMutationList>,

    #[serde(default)]
    pub rx_selected_mutations: Vec<DrugClassMutationList>,

    #[serde(default)]
    pub apobec_mutations: Vec<String>,

    #[serde(default)]
    pub apobec_drms: Vec<String>,

    #[serde(default)]
    pub mutation_types: Vec<MutationTypePair>,

    #[serde(default = "default_other_mutation_type")]
    pub other_mutation_type: MutationType,

    #[serde(default)]
    pub amino_acid_percents: Vec<AminoAcidPercent>,

    #[serde(default)]
    pub mutation_prevalences: Vec<MutationPrevalence>,

    /// Extra drug resistance positions as `GENE:POS`, on top of every
    /// position listed in `drugResistMutations`.
    #[serde(default)]
    pub drug_resistance_positions: Vec<String>,
}

fn default_other_mutation_type() -> MutationType {
    MutationType::new("Other")
}

// ============================================================================
// StaticVirus
// ============================================================================

#[derive(Debug)]
pub struct StaticVirus {
    name: String,
    genes: Vec<Arc<Gene>>,
    drug_resist_mutations: Vec<(DrugClass, MutationSet)>,
    surveil_drug_resist_mutations: Vec<(DrugClass, MutationSet)>,
    rx_selected_mutations: Vec<(DrugClass, MutationSet)>,
    apobec_mutations: MutationSet,
    apobec_drms: MutationSet,
    mutation_types: Vec<MutationTypePair>,
    other_mutation_type: MutationType,
    amino_acid_percents: AminoAcidPercentTable,
    mutation_prevalences: Vec<MutationPrevalence>,
    drug_resistance_positions: HashSet<GenePosition>,
}

impl StaticVirus {
    ///
    /// Build a knowledge base from its definition, resolving every catalog
    /// token against the declared genes
    ///
    pub fn from_definition(definition: VirusDefinition) -> Result<Self, KnowledgeBaseError> {
        let genes: Vec<Arc<Gene>> = definition.genes.into_iter().map(Arc::new).collect();
        let lookup = |name: &str| find_gene(&genes, name);

        let by_drug_class = |lists: Vec<DrugClassMutationList>| {
            lists
                .into_iter()
                .map(|list| {
                    MutationSet::parse(&list.mutations.join(","), lookup)
                        .map(|muts| (list.drug_class, muts))
                })
                .collect::<Result<Vec<_>, MutationError>>()
        };

        let drug_resist_mutations = by_drug_class(definition.drug_resist_mutations)?;
        let surveil_drug_resist_mutations =
            by_drug_class(definition.surveil_drug_resist_mutations)?;
        let rx_selected_mutations = by_drug_class(definition.rx_selected_mutations)?;
        let apobec_mutations = MutationSet::parse(&definition.apobec_mutations.join(","), lookup)?;
        let apobec_drms = MutationSet::parse(&definition.apobec_drms.join(","), lookup)?;

        let mut drug_resistance_positions: HashSet<GenePosition> = drug_resist_mutations
            .iter()
            .flat_map(|(_, muts)| muts.iter().map(|m| m.gene_position()))
            .collect();
        for token in &definition.drug_resistance_positions {
            drug_resistance_positions.insert(parse_gene_position(token, &genes)?);
        }

        Ok(StaticVirus {
            name: definition.name,
            drug_resist_mutations,
            surveil_drug_resist_mutations,
            rx_selected_mutations,
            apobec_mutations,
            apobec_drms,
            mutation_types: definition.mutation_types,
            other_mutation_type: definition.other_mutation_type,
            amino_acid_percents: AminoAcidPercentTable::new(definition.amino_acid_percents),
            mutation_prevalences: definition.mutation_prevalences,
            drug_resistance_positions,
            genes,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeBaseError> {
        let definition: VirusDefinition = serde_json::from_str(json)?;
        Self::from_definition(definition)
    }

    ///
    /// Load a knowledge base from a JSON file
    ///
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading knowledge base from {}", path.display());

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base: {}", path.display()))?;
        let virus = Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse knowledge base: {}", path.display()))?;

        info!(
            "Loaded knowledge base {} ({} genes, {} DRM drug classes)",
            virus.name,
            virus.genes.len(),
            virus.drug_resist_mutations.len()
        );
        Ok(virus)
    }
}

fn find_gene(genes: &[Arc<Gene>], name: &str) -> Option<Arc<Gene>> {
    genes
        .iter()
        .find(|g| g.name == name)
        .or_else(|| genes.iter().find(|g| g.abstract_gene == name))
        .cloned()
}

fn parse_gene_position(
    token: &str,
    genes: &[Arc<Gene>],
) -> Result<GenePosition, KnowledgeBaseError> {
    let invalid = || KnowledgeBaseError::InvalidGenePosition(token.to_string());
    let (gene_name, position) = token.trim().split_once(':').ok_or_else(invalid)?;
    let gene = find_gene(genes, gene_name).ok_or_else(invalid)?;
    let position: u32 = position.parse().map_err(|_| invalid())?;
    if gene.ref_char(position).is_none() {
        return Err(invalid());
    }
    Ok(GenePosition::new(gene, position))
}

impl Virus for StaticVirus {
    fn name(&self) -> &str {
        &self.name
    }

    fn genes(&self) -> &[Arc<Gene>] {
        &self.genes
    }

    fn drug_resist_mutations(&self) -> &DrugClassMutations {
        &self.drug_resist_mutations
    }

    fn surveil_drug_resist_mutations(&self) -> &DrugClassMutations {
        &self.surveil_drug_resist_mutations
    }

    fn rx_selected_mutations(&self) -> &DrugClassMutations {
        &self.rx_selected_mutations
    }

    fn apobec_mutations(&self) -> &MutationSet {
        &self.apobec_mutations
    }

    fn apobec_drms(&self) -> &MutationSet {
        &self.apobec_drms
    }

    fn mutation_type_pairs(&self) -> &[MutationTypePair] {
        &self.mutation_types
    }

    fn other_mutation_type(&self) -> &MutationType {
        &self.other_mutation_type
    }

    fn amino_acid_percents(&self) -> &dyn AminoAcidPercents {
        &self.amino_acid_percents
    }

    fn mutation_prevalences(&self, gene_position: &GenePosition) -> Vec<MutationPrevalence> {
        self.mutation_prevalences
            .iter()
            .filter(|p| {
                p.gene == gene_position.abstract_gene() && p.position == gene_position.position
            })
            .cloned()
            .collect()
    }

    fn is_drug_resistance_position(&self, gene_position: &GenePosition) -> bool {
        self.drug_resistance_positions.contains(gene_position)
    }
}
