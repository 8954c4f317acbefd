//! Knowledge-base classification of amino-acid mutations.
//!
//! [`ClassifiedMutation`] pairs an [`AAMutation`] with the [`Virus`] it should
//! be interpreted against. Every fact is computed on first access and kept
//! for the lifetime of the object. The caches are `OnceLock`s: two threads
//! racing on the first access may both compute a fact, but both compute the
//! same value from the same immutable inputs.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use sierra_core::consts::AMBIGUOUS;
use sierra_core::models::{DrugClass, MutationType};

use crate::amino_acids::join_aas;
use crate::mutation::AAMutation;
use crate::mutation_set::MutationSet;
use crate::prevalence::MutationPrevalence;
use crate::traits::{DrugClassMutations, Virus};

#[derive(Clone, Default)]
struct FactCache {
    types: OnceLock<Vec<MutationType>>,
    is_at_drug_resistance_position: OnceLock<bool>,
    is_drm: OnceLock<bool>,
    is_sdrm: OnceLock<bool>,
    is_tsm: OnceLock<bool>,
    is_apobec_mutation: OnceLock<bool>,
    is_apobec_drm: OnceLock<bool>,
    is_unusual: OnceLock<bool>,
    highest_mut_prevalence: OnceLock<f64>,
    drm_drug_class: OnceLock<Option<DrugClass>>,
    sdrm_drug_class: OnceLock<Option<DrugClass>>,
    tsm_drug_class: OnceLock<Option<DrugClass>>,
}

///
/// A mutation bound to the knowledge base that classifies it.
///
/// Dereferences to the underlying [`AAMutation`], so the value accessors and
/// encodings are available directly. Equality, hashing and ordering are
/// those of the mutation.
///
#[derive(Clone)]
pub struct ClassifiedMutation {
    mutation: AAMutation,
    virus: Arc<dyn Virus>,
    cache: FactCache,
}

impl ClassifiedMutation {
    pub fn new(mutation: AAMutation, virus: Arc<dyn Virus>) -> Self {
        ClassifiedMutation {
            mutation,
            virus,
            cache: FactCache::default(),
        }
    }

    pub fn mutation(&self) -> &AAMutation {
        &self.mutation
    }

    pub fn into_mutation(self) -> AAMutation {
        self.mutation
    }

    pub fn virus(&self) -> &Arc<dyn Virus> {
        &self.virus
    }

    fn exists_in(&self, mutation_sets: &DrugClassMutations) -> bool {
        mutation_sets
            .iter()
            .any(|(_, muts)| muts.has_shared_aa_mutation(&self.mutation, false))
    }

    fn lookup_drug_class(&self, mutation_sets: &DrugClassMutations) -> Option<DrugClass> {
        mutation_sets
            .iter()
            .find(|(_, muts)| muts.has_shared_aa_mutation(&self.mutation, false))
            .map(|(drug_class, _)| drug_class.clone())
    }

    fn in_set(&self, mutation_set: &MutationSet) -> bool {
        mutation_set.has_shared_aa_mutation(&self.mutation, false)
    }

    /// Drug resistance mutation.
    pub fn is_drm(&self) -> bool {
        *self
            .cache
            .is_drm
            .get_or_init(|| self.exists_in(self.virus.drug_resist_mutations()))
    }

    /// First drug class whose DRM list contains this mutation.
    pub fn drm_drug_class(&self) -> Option<&DrugClass> {
        self.cache
            .drm_drug_class
            .get_or_init(|| {
                self.is_drm()
                    .then(|| self.lookup_drug_class(self.virus.drug_resist_mutations()))
                    .flatten()
            })
            .as_ref()
    }

    /// Surveillance drug resistance mutation.
    pub fn is_sdrm(&self) -> bool {
        *self
            .cache
            .is_sdrm
            .get_or_init(|| self.exists_in(self.virus.surveil_drug_resist_mutations()))
    }

    pub fn sdrm_drug_class(&self) -> Option<&DrugClass> {
        self.cache
            .sdrm_drug_class
            .get_or_init(|| {
                self.is_sdrm()
                    .then(|| self.lookup_drug_class(self.virus.surveil_drug_resist_mutations()))
                    .flatten()
            })
            .as_ref()
    }

    /// Treatment-selected mutation.
    pub fn is_tsm(&self) -> bool {
        *self
            .cache
            .is_tsm
            .get_or_init(|| self.exists_in(self.virus.rx_selected_mutations()))
    }

    pub fn tsm_drug_class(&self) -> Option<&DrugClass> {
        self.cache
            .tsm_drug_class
            .get_or_init(|| {
                self.is_tsm()
                    .then(|| self.lookup_drug_class(self.virus.rx_selected_mutations()))
                    .flatten()
            })
            .as_ref()
    }

    pub fn is_apobec_mutation(&self) -> bool {
        *self
            .cache
            .is_apobec_mutation
            .get_or_init(|| self.in_set(self.virus.apobec_mutations()))
    }

    pub fn is_apobec_drm(&self) -> bool {
        *self
            .cache
            .is_apobec_drm
            .get_or_init(|| self.in_set(self.virus.apobec_drms()))
    }

    ///
    /// Whether the observed amino acids are rarely seen at this position.
    /// Mutations containing `X` are always unusual.
    ///
    pub fn is_unusual(&self) -> bool {
        *self.cache.is_unusual.get_or_init(|| {
            let aa_chars = self.mutation.aa_chars();
            if aa_chars.contains(&AMBIGUOUS) {
                return true;
            }
            self.virus.amino_acid_percents().contains_unusual_aa(
                self.mutation.gene(),
                self.mutation.position(),
                &join_aas(aa_chars),
            )
        })
    }

    ///
    /// Highest prevalence, in percent, of the non-reference amino acids
    /// observed here. `X` is ignored.
    ///
    pub fn highest_mut_prevalence(&self) -> f64 {
        *self.cache.highest_mut_prevalence.get_or_init(|| {
            let mut aa_chars = self.mutation.aa_chars().clone();
            aa_chars.remove(&self.mutation.ref_char());
            aa_chars.remove(&AMBIGUOUS);
            if aa_chars.is_empty() {
                return 0.0;
            }
            self.virus.amino_acid_percents().highest_aa_percent_value(
                self.mutation.gene(),
                self.mutation.position(),
                &join_aas(&aa_chars),
            ) * 100.0
        })
    }

    /// Prevalence records for this gene position. Not cached.
    pub fn prevalences(&self) -> Vec<MutationPrevalence> {
        self.virus.mutation_prevalences(&self.mutation.gene_position())
    }

    ///
    /// Mutation types in the knowledge base's declaration order. Never empty:
    /// falls back to the knowledge base's "other" type.
    ///
    pub fn types(&self) -> &[MutationType] {
        self.cache.types.get_or_init(|| {
            let types: Vec<MutationType> = self
                .virus
                .mutation_type_pairs()
                .iter()
                .filter(|pair| pair.is_mutation_matched(&self.mutation))
                .map(|pair| pair.mutation_type.clone())
                .collect();
            if types.is_empty() {
                vec![self.virus.other_mutation_type().clone()]
            } else {
                types
            }
        })
    }

    pub fn primary_type(&self) -> &MutationType {
        &self.types()[0]
    }

    pub fn is_at_drug_resistance_position(&self) -> bool {
        *self.cache.is_at_drug_resistance_position.get_or_init(|| {
            self.virus
                .is_drug_resistance_position(&self.mutation.gene_position())
        })
    }
}

impl Deref for ClassifiedMutation {
    type Target = AAMutation;

    fn deref(&self) -> &Self::Target {
        &self.mutation
    }
}

impl Debug for ClassifiedMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifiedMutation")
            .field("mutation", &self.mutation)
            .field("virus", &self.virus.name())
            .finish()
    }
}

impl Display for ClassifiedMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.mutation, f)
    }
}

impl PartialEq for ClassifiedMutation {
    fn eq(&self, other: &Self) -> bool {
        self.mutation == other.mutation
    }
}

impl Eq for ClassifiedMutation {}

impl Hash for ClassifiedMutation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mutation.hash(state);
    }
}

impl PartialOrd for ClassifiedMutation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassifiedMutation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mutation.cmp(&other.mutation)
    }
}
