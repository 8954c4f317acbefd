//! # Drug resistance algorithm metadata
//!
//! Loads the header of an ASI (Algorithm Specification Interface) rule
//! document and the per-gene rule map an external interpreter produces
//! from it. Rule objects are opaque here: this crate only filters them down
//! to the genes a [`Virus`](sierra_mutations::Virus) supports and hands them
//! on to the scoring engine.
//!
//! Algorithms are loaded once at start-up. A document that can't be parsed
//! is reported as [`AlgorithmError::MalformedDocument`] and should abort
//! initialization: rule documents are bundled, versioned assets.

pub mod algorithm;
pub mod errors;
pub mod transformer;

// re-exports
pub use self::algorithm::{AlgorithmOverrides, DrugResistanceAlgorithm};
pub use self::errors::{AlgorithmError, AsiParsingError};
pub use self::transformer::{AlgorithmInfo, AsiTransformer};

pub mod consts {
    /// Keys of the `ALGNAME_ALGVERSION_ALGDATE` header record.
    pub const ALGNAME: &str = "ALGNAME";
    pub const ALGVERSION: &str = "ALGVERSION";
    pub const ALGDATE: &str = "ALGDATE";

    /// Keys of the `ORDER1_ORIGINAL_SIR` header record.
    pub const ORIGINAL: &str = "ORIGINAL";
    pub const SIR: &str = "SIR";
}
