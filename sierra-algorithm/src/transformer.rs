use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::AsiParsingError;

///
/// Header records of an ASI document, as key/value maps:
/// `{ALGNAME, ALGVERSION, ALGDATE}` and `{ORIGINAL, SIR}`.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmInfo {
    #[serde(rename = "ALGNAME_ALGVERSION_ALGDATE")]
    pub name_version_date: BTreeMap<String, String>,

    #[serde(rename = "ORDER1_ORIGINAL_SIR")]
    pub original_level: BTreeMap<String, String>,
}

///
/// The external rule-document interpreter.
///
/// `transform` turns a document into per-gene rule objects keyed by
/// abstract gene name. The rule objects are opaque to this crate.
///
pub trait AsiTransformer {
    type Gene;

    fn transform(&self, xml_text: &str) -> Result<HashMap<String, Self::Gene>, AsiParsingError>;

    fn algorithm_info(&self, xml_text: &str) -> Result<AlgorithmInfo, AsiParsingError>;
}
