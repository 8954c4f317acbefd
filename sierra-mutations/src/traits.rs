use std::sync::Arc;

use sierra_core::models::{DrugClass, Gene, GenePosition, MutationType};

use crate::mutation_set::MutationSet;
use crate::mutation_type::MutationTypePair;
use crate::prevalence::MutationPrevalence;

/// Catalog mutation sets in the order the knowledge base declares their drug classes.
pub type DrugClassMutations = [(DrugClass, MutationSet)];

///
/// Amino-acid prevalence statistics for one strain, as observed across a
/// reference population.
///
pub trait AminoAcidPercents: Send + Sync {
    /// Whether any of `aas` is flagged unusual at this gene position.
    fn contains_unusual_aa(&self, gene: &Gene, position: u32, aas: &str) -> bool;

    /// Highest prevalence (0 to 1) among `aas` at this gene position.
    fn highest_aa_percent_value(&self, gene: &Gene, position: u32, aas: &str) -> f64;
}

///
/// The virus knowledge base mutations are classified against.
///
/// Implementations are read-only from the mutation model's point of view
/// and must return the same answers for the lifetime of any
/// [`ClassifiedMutation`](crate::ClassifiedMutation) built on top of them.
///
pub trait Virus: Send + Sync {
    fn name(&self) -> &str;

    fn genes(&self) -> &[Arc<Gene>];

    /// Look up a gene by its full name (`HIV1RT`) or abstract name (`RT`).
    fn gene(&self, name: &str) -> Option<Arc<Gene>> {
        self.genes()
            .iter()
            .find(|g| g.name == name)
            .or_else(|| self.genes().iter().find(|g| g.abstract_gene == name))
            .cloned()
    }

    /// Abstract gene names, in gene declaration order, without duplicates.
    fn abstract_genes(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for gene in self.genes() {
            if !names.contains(&gene.abstract_gene) {
                names.push(gene.abstract_gene.clone());
            }
        }
        names
    }

    fn drug_resist_mutations(&self) -> &DrugClassMutations;

    fn surveil_drug_resist_mutations(&self) -> &DrugClassMutations;

    fn rx_selected_mutations(&self) -> &DrugClassMutations;

    fn apobec_mutations(&self) -> &MutationSet;

    fn apobec_drms(&self) -> &MutationSet;

    fn mutation_type_pairs(&self) -> &[MutationTypePair];

    /// Type assigned when no mutation type pair matches.
    fn other_mutation_type(&self) -> &MutationType;

    fn amino_acid_percents(&self) -> &dyn AminoAcidPercents;

    fn mutation_prevalences(&self, gene_position: &GenePosition) -> Vec<MutationPrevalence>;

    fn is_drug_resistance_position(&self, gene_position: &GenePosition) -> bool;
}
