use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::{self, Display};

use log::{debug, info};

use sierra_core::models::{Gene, Sir};
use sierra_mutations::Virus;

use crate::consts::{ALGDATE, ALGNAME, ALGVERSION, ORIGINAL, SIR};
use crate::errors::AlgorithmError;
use crate::transformer::AsiTransformer;

/// Explicit metadata that takes precedence over the document header.
#[derive(Clone, Debug, Default)]
pub struct AlgorithmOverrides {
    pub name: Option<String>,
    pub family: Option<String>,
    pub version: Option<String>,
    pub publish_date: Option<String>,
}

///
/// A loaded drug resistance algorithm: header metadata plus the per-gene
/// rule objects of the genes the target virus supports.
///
/// Equality is identity. Two algorithms loaded from the same document are
/// distinct values; compare [`name`](Self::name) to match them by content.
/// Ordering follows `(family, version, publish_date)` and is therefore not
/// consistent with `==`: two loads of one document compare `Equal` while
/// being unequal. Don't key a `BTreeSet` or `BTreeMap` on this type, or
/// distinct loads will be merged.
///
pub struct DrugResistanceAlgorithm<G> {
    name: String,
    family: String,
    version: String,
    publish_date: String,
    original_level_text: String,
    original_level_sir: Sir,
    xml_text: String,
    gene_map: HashMap<String, G>,
}

fn header_value<'a>(
    record: &'a BTreeMap<String, String>,
    key: &str,
) -> Result<&'a str, AlgorithmError> {
    record
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| AlgorithmError::MalformedDocument(format!("missing {} in header", key)))
}

impl<G> DrugResistanceAlgorithm<G> {
    pub fn new<V, T>(
        virus: &V,
        xml_text: impl Into<String>,
        transformer: &T,
    ) -> Result<Self, AlgorithmError>
    where
        V: Virus + ?Sized,
        T: AsiTransformer<Gene = G>,
    {
        Self::with_overrides(AlgorithmOverrides::default(), virus, xml_text, transformer)
    }

    pub fn with_name<V, T>(
        name: impl Into<String>,
        virus: &V,
        xml_text: impl Into<String>,
        transformer: &T,
    ) -> Result<Self, AlgorithmError>
    where
        V: Virus + ?Sized,
        T: AsiTransformer<Gene = G>,
    {
        let overrides = AlgorithmOverrides {
            name: Some(name.into()),
            ..Default::default()
        };
        Self::with_overrides(overrides, virus, xml_text, transformer)
    }

    ///
    /// Load an algorithm, taking any metadata not given in `overrides` from
    /// the document header.
    ///
    pub fn with_overrides<V, T>(
        overrides: AlgorithmOverrides,
        virus: &V,
        xml_text: impl Into<String>,
        transformer: &T,
    ) -> Result<Self, AlgorithmError>
    where
        V: Virus + ?Sized,
        T: AsiTransformer<Gene = G>,
    {
        let xml_text = xml_text.into();
        let info = transformer.algorithm_info(&xml_text)?;

        let alg_name = header_value(&info.name_version_date, ALGNAME)?;
        let alg_version = header_value(&info.name_version_date, ALGVERSION)?;
        let alg_date = info
            .name_version_date
            .get(ALGDATE)
            .map(String::as_str)
            .unwrap_or_default();
        let original_level_text = header_value(&info.original_level, ORIGINAL)?.to_string();
        let original_level_sir: Sir = header_value(&info.original_level, SIR)?
            .parse()
            .map_err(|e| AlgorithmError::MalformedDocument(format!("{}", e)))?;

        let name = overrides
            .name
            .unwrap_or_else(|| format!("{}_{}", alg_name, alg_version));
        let family = overrides.family.unwrap_or_else(|| alg_name.to_string());
        let version = overrides.version.unwrap_or_else(|| alg_version.to_string());
        let publish_date = overrides.publish_date.unwrap_or_else(|| alg_date.to_string());

        let gene_map = Self::init_gene_map(&xml_text, virus, transformer)?;
        info!(
            "Loaded algorithm {} ({} genes supported by {})",
            name,
            gene_map.len(),
            virus.name()
        );

        Ok(DrugResistanceAlgorithm {
            name,
            family,
            version,
            publish_date,
            original_level_text,
            original_level_sir,
            xml_text,
            gene_map,
        })
    }

    fn init_gene_map<V, T>(
        xml_text: &str,
        virus: &V,
        transformer: &T,
    ) -> Result<HashMap<String, G>, AlgorithmError>
    where
        V: Virus + ?Sized,
        T: AsiTransformer<Gene = G>,
    {
        let parsed = transformer.transform(xml_text)?;
        let total = parsed.len();
        let abstract_genes: HashSet<String> = virus.abstract_genes().into_iter().collect();

        // genes the algorithm covers but the virus implementation doesn't
        let gene_map: HashMap<String, G> = parsed
            .into_iter()
            .filter(|(gene, _)| abstract_genes.contains(gene))
            .collect();
        debug!("Kept {} of {} algorithm genes", gene_map.len(), total);
        Ok(gene_map)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `"{family} {version}"`, e.g. `"HIVDB 9.4"`.
    pub fn display(&self) -> String {
        format!("{} {}", self.family, self.version)
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn publish_date(&self) -> &str {
        &self.publish_date
    }

    pub fn original_level_text(&self) -> &str {
        &self.original_level_text
    }

    pub fn original_level_sir(&self) -> Sir {
        self.original_level_sir
    }

    pub fn xml_text(&self) -> &str {
        &self.xml_text
    }

    pub fn gene_map(&self) -> &HashMap<String, G> {
        &self.gene_map
    }

    /// Rule object for a gene, looked up by its abstract gene name.
    pub fn asi_gene(&self, gene: &Gene) -> Option<&G> {
        self.gene_map.get(&gene.abstract_gene)
    }

    ///
    /// The name reduced to `[_0-9A-Za-z]`, usable as an enum variant:
    /// `HIVDB_9.4` becomes `HIVDB_9_4`, `-` becomes `p` and a leading
    /// digit gets an underscore prefix.
    ///
    pub fn enum_compat_name(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let mut name = name.replace("-stanford", "stanford").replace('-', "p");
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        name
    }
}

impl<G> Display for DrugResistanceAlgorithm<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl<G> fmt::Debug for DrugResistanceAlgorithm<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrugResistanceAlgorithm")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("version", &self.version)
            .field("publish_date", &self.publish_date)
            .field("genes", &self.gene_map.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<G> PartialEq for DrugResistanceAlgorithm<G> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<G> Eq for DrugResistanceAlgorithm<G> {}

impl<G> PartialOrd for DrugResistanceAlgorithm<G> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<G> Ord for DrugResistanceAlgorithm<G> {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.family, &self.version, &self.publish_date).cmp(&(
            &other.family,
            &other.version,
            &other.publish_date,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sierra_mutations::StaticVirus;

    use crate::errors::AsiParsingError;
    use crate::transformer::AlgorithmInfo;

    /// Takes every document at face value: the header is fixed and each
    /// whitespace separated word of the document is a gene.
    struct WordTransformer {
        name: &'static str,
    }

    impl AsiTransformer for WordTransformer {
        type Gene = String;

        fn transform(&self, xml_text: &str) -> Result<HashMap<String, String>, AsiParsingError> {
            Ok(xml_text
                .split_whitespace()
                .map(|w| (w.to_string(), format!("rules for {}", w)))
                .collect())
        }

        fn algorithm_info(&self, _xml_text: &str) -> Result<AlgorithmInfo, AsiParsingError> {
            Ok(AlgorithmInfo {
                name_version_date: BTreeMap::from([
                    (ALGNAME.to_string(), self.name.to_string()),
                    (ALGVERSION.to_string(), "1.0".to_string()),
                ]),
                original_level: BTreeMap::from([
                    (ORIGINAL.to_string(), "Susceptible".to_string()),
                    (SIR.to_string(), "S".to_string()),
                ]),
            })
        }
    }

    fn virus() -> Arc<StaticVirus> {
        Arc::new(
            StaticVirus::from_json_str(
                r#"{"name": "HIV1", "genes": [
                    {"strain": "HIV1", "name": "HIV1PR", "abstractGene": "PR", "refSequence": "PQITLWQRPL"}
                ]}"#,
            )
            .unwrap(),
        )
    }

    fn load(name: &'static str) -> DrugResistanceAlgorithm<String> {
        DrugResistanceAlgorithm::new(virus().as_ref(), "PR RT", &WordTransformer { name }).unwrap()
    }

    #[rstest]
    #[case("HIVDB", "HIVDB_1_0")]
    #[case("ANRS", "ANRS_1_0")]
    #[case("Rega-stanford", "Regastanford_1_0")]
    #[case("HIVDB-beta", "HIVDBpbeta_1_0")]
    #[case("9HIVDB", "_9HIVDB_1_0")]
    #[case("HIV DB", "HIV_DB_1_0")]
    fn test_enum_compat_name(#[case] alg_name: &'static str, #[case] expected: &str) {
        assert_eq!(load(alg_name).enum_compat_name(), expected);
    }

    #[test]
    fn test_missing_date_is_empty() {
        assert_eq!(load("HIVDB").publish_date(), "");
    }

    #[test]
    fn test_unsupported_genes_dropped() {
        let alg = load("HIVDB");
        assert_eq!(alg.gene_map().len(), 1);
        assert_eq!(alg.gene_map().get("PR").map(String::as_str), Some("rules for PR"));
    }

    #[test]
    fn test_identity_equality() {
        let a = load("HIVDB");
        let b = load("HIVDB");
        assert!(a == a);
        assert!(a != b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }
}
