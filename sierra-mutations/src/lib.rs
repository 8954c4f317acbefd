//! # Amino-acid mutations and drug resistance catalog classification
//!
//! This crate models the amino acids observed at one position of a viral
//! gene and classifies them against the catalogs of a virus knowledge base.
//! It provides:
//!
//! - [`AAMutation`]: the immutable mutation value, with ambiguity-code
//!   normalization, set algebra and four text encodings
//! - [`MutationSet`]: an ordered, one-mutation-per-position collection
//! - [`Virus`]: the knowledge-base seam catalogs and prevalence data come from
//! - [`ClassifiedMutation`]: lazily cached DRM/SDRM/TSM/APOBEC membership,
//!   unusualness, prevalence and mutation types
//! - [`StaticVirus`]: a JSON-backed knowledge base
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use sierra_core::Gene;
//! use sierra_mutations::AAMutation;
//!
//! let pr = Arc::new(Gene::new("HIV1", "HIV1PR", "PR", 1, "PQITLWQRPLVTIKIGGQLKEALLDTGADDTVLEE"));
//! let m = AAMutation::new(pr, 30, "NA".chars()).unwrap();
//!
//! assert_eq!(m.human_format(), "D30AN");
//! assert_eq!(m.hivdb_format(), "30AN");
//! assert!(m.is_mixture());
//! ```

pub mod amino_acids;
pub mod catalog;
pub mod classify;
pub mod errors;
pub mod format;
pub mod mutation;
pub mod mutation_set;
pub mod mutation_type;
pub mod prevalence;
pub mod traits;

// re-exports
pub use self::amino_acids::normalize_aa_chars;
pub use self::catalog::{StaticVirus, VirusDefinition};
pub use self::classify::ClassifiedMutation;
pub use self::errors::{KnowledgeBaseError, MutationError};
pub use self::mutation::AAMutation;
pub use self::mutation_set::MutationSet;
pub use self::mutation_type::MutationTypePair;
pub use self::prevalence::{AminoAcidPercent, AminoAcidPercentTable, MutationPrevalence};
pub use self::traits::{AminoAcidPercents, DrugClassMutations, Virus};
