use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use sierra_core::consts::{AMBIGUOUS, DEFAULT_MAX_DISPLAY_AAS, DELETION, INSERTION, STOP};
use sierra_core::models::{Gene, GenePosition};

use crate::amino_acids::{join_aas, normalize_aa_chars};
use crate::errors::MutationError;

///
/// AAMutation struct, the amino acids observed at one position of a gene.
///
/// The value is immutable. Equality, hashing and ordering only look at
/// `(gene, position, aa_chars)`; `max_display_aas` changes how the
/// mutation is rendered, never what it is.
///
#[derive(Debug, Clone)]
pub struct AAMutation {
    gene: Arc<Gene>,
    position: u32,
    aa_chars: BTreeSet<char>,
    max_display_aas: usize,
    ref_char: char,
}

impl AAMutation {
    ///
    /// Create a mutation with the default display threshold
    ///
    pub fn new<I>(gene: Arc<Gene>, position: u32, aa_chars: I) -> Result<Self, MutationError>
    where
        I: IntoIterator<Item = char>,
    {
        Self::with_max_display_aas(gene, position, aa_chars, DEFAULT_MAX_DISPLAY_AAS)
    }

    ///
    /// Create a mutation. Positions are 1-based; position 0 and positions
    /// past the end of the gene are rejected.
    ///
    pub fn with_max_display_aas<I>(
        gene: Arc<Gene>,
        position: u32,
        aa_chars: I,
        max_display_aas: usize,
    ) -> Result<Self, MutationError>
    where
        I: IntoIterator<Item = char>,
    {
        let ref_char = gene
            .ref_char(position)
            .ok_or_else(|| MutationError::InvalidPosition {
                gene: gene.name.clone(),
                position,
                length: gene.aa_length(),
            })?;
        let aa_chars = normalize_aa_chars(aa_chars);
        if aa_chars.is_empty() {
            return Err(MutationError::EmptyAminoAcids {
                gene: gene.name.clone(),
                position,
            });
        }
        Ok(AAMutation {
            gene,
            position,
            aa_chars,
            max_display_aas,
            ref_char,
        })
    }

    ///
    /// Parse a mutation written as `[REF]POS AAS`, e.g. `M41L`, `41L`,
    /// `T69i`, `T69Insertion` or `K65del`.
    ///
    pub fn parse(gene: Arc<Gene>, text: &str) -> Result<Self, MutationError> {
        let text = text.trim();
        let parse_err = || MutationError::MutationParseError(text.to_string());

        let digits_start = text
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(parse_err)?;
        let lead = &text[..digits_start];
        if !lead.chars().all(|c| c.is_ascii_uppercase()) || lead.len() > 1 {
            return Err(parse_err());
        }
        let rest = &text[digits_start..];
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(parse_err)?;
        let position: u32 = rest[..digits_end].parse().map_err(|_| parse_err())?;

        let aas = match &rest[digits_end..] {
            "Insertion" | "ins" => INSERTION.to_string(),
            "Deletion" | "del" => DELETION.to_string(),
            other => other.to_string(),
        };
        Self::new(gene, position, aas.chars())
    }

    fn derive(&self, aa_chars: BTreeSet<char>) -> Self {
        AAMutation {
            gene: Arc::clone(&self.gene),
            position: self.position,
            aa_chars,
            max_display_aas: self.max_display_aas,
            ref_char: self.ref_char,
        }
    }

    fn check_same_position(&self, other: &AAMutation) -> Result<(), MutationError> {
        if self.gene != other.gene || self.position != other.position {
            return Err(MutationError::MismatchedPosition {
                gene: self.gene.name.clone(),
                position: self.position,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // set algebra
    // ------------------------------------------------------------------

    /// Union of the observed amino acids with `other_aas`.
    pub fn merges_with<I>(&self, other_aas: I) -> AAMutation
    where
        I: IntoIterator<Item = char>,
    {
        let aas = normalize_aa_chars(self.aa_chars.iter().copied().chain(other_aas));
        self.derive(aas)
    }

    /// Amino acids observed here but not in `other_aas`; `None` when nothing is left.
    /// `other_aas` is compared as given, aliases such as `i` are not folded.
    pub fn subtracts_by<I>(&self, other_aas: I) -> Option<AAMutation>
    where
        I: IntoIterator<Item = char>,
    {
        let other: BTreeSet<char> = other_aas.into_iter().collect();
        let aas: BTreeSet<char> = self.aa_chars.difference(&other).copied().collect();
        (!aas.is_empty()).then(|| self.derive(aas))
    }

    /// Amino acids observed both here and in `other_aas`; `None` when there are none.
    pub fn intersects_with<I>(&self, other_aas: I) -> Option<AAMutation>
    where
        I: IntoIterator<Item = char>,
    {
        let other: BTreeSet<char> = other_aas.into_iter().collect();
        let aas: BTreeSet<char> = self.aa_chars.intersection(&other).copied().collect();
        (!aas.is_empty()).then(|| self.derive(aas))
    }

    pub fn merges_with_mutation(&self, other: &AAMutation) -> Result<AAMutation, MutationError> {
        self.check_same_position(other)?;
        Ok(self.merges_with(other.aa_chars.iter().copied()))
    }

    pub fn subtracts_by_mutation(
        &self,
        other: &AAMutation,
    ) -> Result<Option<AAMutation>, MutationError> {
        self.check_same_position(other)?;
        Ok(self.subtracts_by(other.aa_chars.iter().copied()))
    }

    pub fn intersects_with_mutation(
        &self,
        other: &AAMutation,
    ) -> Result<Option<AAMutation>, MutationError> {
        self.check_same_position(other)?;
        Ok(self.intersects_with(other.aa_chars.iter().copied()))
    }

    ///
    /// Break a mixture into single amino-acid mutations, skipping the
    /// reference amino acid
    ///
    pub fn split(&self) -> Vec<AAMutation> {
        self.aa_chars
            .iter()
            .filter(|&&aa| aa != self.ref_char)
            .map(|&aa| AAMutation {
                gene: Arc::clone(&self.gene),
                position: self.position,
                aa_chars: BTreeSet::from([aa]),
                max_display_aas: DEFAULT_MAX_DISPLAY_AAS,
                ref_char: self.ref_char,
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // accessors
    // ------------------------------------------------------------------

    pub fn gene(&self) -> &Arc<Gene> {
        &self.gene
    }

    pub fn abstract_gene(&self) -> &str {
        &self.gene.abstract_gene
    }

    pub fn strain(&self) -> &str {
        &self.gene.strain
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn gene_position(&self) -> GenePosition {
        GenePosition::new(Arc::clone(&self.gene), self.position)
    }

    pub fn max_display_aas(&self) -> usize {
        self.max_display_aas
    }

    /// Reference amino acid at this position.
    pub fn ref_char(&self) -> char {
        self.ref_char
    }

    pub fn reference(&self) -> String {
        self.ref_char.to_string()
    }

    /// The full, normalized set of observed amino acids.
    pub fn aa_chars(&self) -> &BTreeSet<char> {
        &self.aa_chars
    }

    pub fn aas(&self) -> String {
        join_aas(&self.aa_chars)
    }

    /// Observed amino acids, collapsed to `X` past the display threshold.
    pub fn display_aa_chars(&self) -> BTreeSet<char> {
        if self.aa_chars.len() > self.max_display_aas {
            BTreeSet::from([AMBIGUOUS])
        } else {
            self.aa_chars.clone()
        }
    }

    pub fn display_aas(&self) -> String {
        join_aas(&self.display_aa_chars())
    }

    // ------------------------------------------------------------------
    // predicates
    // ------------------------------------------------------------------

    /// Amino-acid mutations always carry a call.
    pub fn is_unsequenced(&self) -> bool {
        false
    }

    pub fn is_insertion(&self) -> bool {
        self.aa_chars.contains(&INSERTION)
    }

    pub fn is_deletion(&self) -> bool {
        self.aa_chars.contains(&DELETION)
    }

    pub fn is_indel(&self) -> bool {
        self.is_insertion() || self.is_deletion()
    }

    pub fn is_mixture(&self) -> bool {
        self.aa_chars.len() > 1 || self.aa_chars.contains(&AMBIGUOUS)
    }

    pub fn has_reference(&self) -> bool {
        self.aa_chars.contains(&self.ref_char)
    }

    pub fn has_stop(&self) -> bool {
        self.aa_chars.contains(&STOP)
    }

    pub fn is_ambiguous(&self) -> bool {
        self.aa_chars.len() > self.max_display_aas || self.aa_chars.contains(&AMBIGUOUS)
    }

    ///
    /// Whether any of `query_aas` is also observed here.
    ///
    /// With `ignore_ref_or_stops` the reference amino acid and stop codons
    /// can't be responsible for a match.
    ///
    pub fn contains_shared_aa(
        &self,
        query_aas: &BTreeSet<char>,
        ignore_ref_or_stops: bool,
    ) -> bool {
        self.aa_chars
            .intersection(query_aas)
            .any(|&aa| !(ignore_ref_or_stops && (aa == self.ref_char || aa == STOP)))
    }

    /// Shared amino-acid test against another mutation at the same gene position.
    pub fn contains_shared_aa_mutation(&self, query: &AAMutation) -> bool {
        self.gene == query.gene
            && self.position == query.position
            && self.contains_shared_aa(&query.aa_chars, true)
    }
}

impl PartialEq for AAMutation {
    fn eq(&self, other: &Self) -> bool {
        self.gene == other.gene
            && self.position == other.position
            && self.aa_chars == other.aa_chars
    }
}

impl Eq for AAMutation {}

impl Hash for AAMutation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.gene.hash(state);
        self.position.hash(state);
        self.aa_chars.hash(state);
    }
}

impl PartialOrd for AAMutation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AAMutation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.gene
            .cmp(&other.gene)
            .then(self.position.cmp(&other.position))
            .then_with(|| self.aa_chars.iter().cmp(other.aa_chars.iter()))
    }
}
