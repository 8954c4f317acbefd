//! # sierra
//!
//! Umbrella crate for viral drug resistance mutation analysis. Each
//! component crate is re-exported behind a feature of the same name:
//!
//! - `core`: genes, gene positions, drug classes and the SIR scale
//! - `mutations`: amino-acid mutations, mutation sets and catalog classification
//! - `algorithm`: drug resistance algorithm metadata loading

#[cfg(feature = "core")]
#[doc(inline)]
pub use sierra_core as core;

#[cfg(feature = "mutations")]
#[doc(inline)]
pub use sierra_mutations as mutations;

#[cfg(feature = "algorithm")]
#[doc(inline)]
pub use sierra_algorithm as algorithm;
