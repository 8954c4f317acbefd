pub mod drug_class;
pub mod gene;
pub mod sir;

// re-export for cleaner imports
pub use self::drug_class::{DrugClass, MutationType};
pub use self::gene::{Gene, GenePosition};
pub use self::sir::Sir;
