//! Core models shared by the sierra-rs crates.
//!
//! This crate holds the reference data that mutations are interpreted against:
//! genes with their reference amino-acid sequences, gene positions, drug
//! classes, mutation types and the three-level SIR resistance scale. Nothing
//! here talks to a knowledge base; see `sierra-mutations` for that.

pub mod consts;
pub mod errors;
pub mod models;

// re-export for cleaner imports
pub use self::errors::SirParseError;
pub use self::models::{DrugClass, Gene, GenePosition, MutationType, Sir};
