use std::collections::BTreeMap;
use std::collections::btree_map::Values;
use std::fmt::{self, Display};
use std::sync::Arc;

use sierra_core::models::{Gene, GenePosition};

use crate::errors::MutationError;
use crate::mutation::AAMutation;

///
/// An ordered collection of mutations holding at most one mutation per
/// gene position. Adding a second mutation at an occupied position merges
/// the amino acids into the existing one.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationSet {
    mutations: BTreeMap<GenePosition, AAMutation>,
}

impl MutationSet {
    pub fn new() -> Self {
        MutationSet::default()
    }

    ///
    /// Parse a comma or whitespace separated list of `GENE:MUTATION` tokens,
    /// e.g. `"RT:M41L, RT:K65R PR:D30N"`. `gene_lookup` resolves the gene
    /// part of each token.
    ///
    pub fn parse<F>(text: &str, gene_lookup: F) -> Result<Self, MutationError>
    where
        F: Fn(&str) -> Option<Arc<Gene>>,
    {
        let mut set = MutationSet::new();
        for token in text.split([',', ' ', '\t', '\n']).filter(|t| !t.is_empty()) {
            set.insert(parse_token(token, &gene_lookup)?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, mutation: AAMutation) {
        let gp = mutation.gene_position();
        let merged = match self.mutations.get(&gp) {
            Some(existing) => existing.merges_with(mutation.aa_chars().iter().copied()),
            None => mutation,
        };
        self.mutations.insert(gp, merged);
    }

    pub fn get(&self, gene_position: &GenePosition) -> Option<&AAMutation> {
        self.mutations.get(gene_position)
    }

    pub fn contains(&self, mutation: &AAMutation) -> bool {
        self.mutations.get(&mutation.gene_position()) == Some(mutation)
    }

    ///
    /// Whether the mutation at the query's gene position shares an amino
    /// acid with the query
    ///
    pub fn has_shared_aa_mutation(&self, query: &AAMutation, ignore_ref_or_stops: bool) -> bool {
        self.mutations
            .get(&query.gene_position())
            .is_some_and(|m| m.contains_shared_aa(query.aa_chars(), ignore_ref_or_stops))
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn iter(&self) -> Values<'_, GenePosition, AAMutation> {
        self.mutations.values()
    }
}

fn parse_token<F>(token: &str, gene_lookup: &F) -> Result<AAMutation, MutationError>
where
    F: Fn(&str) -> Option<Arc<Gene>>,
{
    let (gene_name, mutation) = token
        .split_once(':')
        .ok_or_else(|| MutationError::MutationParseError(token.to_string()))?;
    let gene = gene_lookup(gene_name)
        .ok_or_else(|| MutationError::UnknownGene(gene_name.to_string()))?;
    AAMutation::parse(gene, mutation)
}

impl FromIterator<AAMutation> for MutationSet {
    fn from_iter<T: IntoIterator<Item = AAMutation>>(iter: T) -> Self {
        let mut set = MutationSet::new();
        for mutation in iter {
            set.insert(mutation);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MutationSet {
    type Item = &'a AAMutation;
    type IntoIter = Values<'a, GenePosition, AAMutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for MutationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|m| m.human_format())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn genes() -> Vec<Arc<Gene>> {
        vec![
            Arc::new(Gene::new(
                "HIV1",
                "HIV1PR",
                "PR",
                1,
                "PQITLWQRPLVTIKIGGQLKEALLDTGADDTVLEEMNLPGRWKPKMIGGIGGFIKVRQYDQILIEICGHKAIGTVLVGPTPVNIIGRNLLTQIGCTLNF",
            )),
            Arc::new(Gene::new(
                "HIV1",
                "HIV1RT",
                "RT",
                2,
                "PISPIETVPVKLKPGMDGPKVKQWPLTEEKIKALVEICTEMEKEGKISKIGPENPYNTPVFAIKKKDSTKWRKLVDF",
            )),
        ]
    }

    fn lookup(genes: &[Arc<Gene>]) -> impl Fn(&str) -> Option<Arc<Gene>> + '_ {
        move |name| genes.iter().find(|g| g.abstract_gene == name).cloned()
    }

    #[rstest]
    fn test_parse_and_order(genes: Vec<Arc<Gene>>) {
        let set = MutationSet::parse("RT:M41L, PR:D30N RT:K65R", lookup(&genes)).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "D30N, M41L, K65R");
    }

    #[rstest]
    fn test_insert_merges_same_position(genes: Vec<Arc<Gene>>) {
        let set = MutationSet::parse("RT:K65R,RT:K65N", lookup(&genes)).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().aas(), "NR");
    }

    #[rstest]
    fn test_parse_unknown_gene(genes: Vec<Arc<Gene>>) {
        let err = MutationSet::parse("IN:Q148H", lookup(&genes)).unwrap_err();
        assert_eq!(err, MutationError::UnknownGene("IN".to_string()));
    }

    #[rstest]
    fn test_parse_missing_gene(genes: Vec<Arc<Gene>>) {
        let err = MutationSet::parse("Q148H", lookup(&genes)).unwrap_err();
        assert_eq!(err, MutationError::MutationParseError("Q148H".to_string()));
    }

    #[rstest]
    fn test_has_shared_aa_mutation(genes: Vec<Arc<Gene>>) {
        let set = MutationSet::parse("RT:K65R", lookup(&genes)).unwrap();
        let rt = Arc::clone(&genes[1]);
        let mixture = AAMutation::new(Arc::clone(&rt), 65, "KR".chars()).unwrap();
        let wild_type = AAMutation::new(Arc::clone(&rt), 65, "K".chars()).unwrap();
        let elsewhere = AAMutation::new(rt, 66, "R".chars()).unwrap();
        assert!(set.has_shared_aa_mutation(&mixture, false));
        assert!(!set.has_shared_aa_mutation(&wild_type, false));
        assert!(!set.has_shared_aa_mutation(&elsewhere, false));
    }

    #[rstest]
    fn test_contains(genes: Vec<Arc<Gene>>) {
        let set: MutationSet = vec![AAMutation::new(Arc::clone(&genes[0]), 30, "N".chars()).unwrap()]
            .into_iter()
            .collect();
        assert!(set.contains(&AAMutation::new(Arc::clone(&genes[0]), 30, "N".chars()).unwrap()));
        assert!(!set.contains(&AAMutation::new(Arc::clone(&genes[0]), 30, "NE".chars()).unwrap()));
        let d30n = AAMutation::new(Arc::clone(&genes[0]), 30, "N".chars()).unwrap();
        assert!(!MutationSet::new().contains(&d30n));
    }
}
