use std::io::Write;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use sierra_core::models::{DrugClass, MutationType};
use sierra_mutations::{
    AAMutation, ClassifiedMutation, KnowledgeBaseError, MutationError, StaticVirus, Virus,
};

const KB_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/hiv1_mini.json");

#[fixture]
#[once]
fn hiv1() -> Arc<dyn Virus> {
    Arc::new(StaticVirus::from_path(KB_PATH).unwrap())
}

fn classify(virus: &Arc<dyn Virus>, gene: &str, position: u32, aas: &str) -> ClassifiedMutation {
    let gene = virus.gene(gene).unwrap();
    let mutation = AAMutation::new(gene, position, aas.chars()).unwrap();
    ClassifiedMutation::new(mutation, Arc::clone(virus))
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[rstest]
fn test_loads_fixture(hiv1: &Arc<dyn Virus>) {
    assert_eq!(hiv1.name(), "HIV1");
    assert_eq!(hiv1.abstract_genes(), vec!["PR", "RT", "IN"]);
    assert_eq!(hiv1.drug_resist_mutations().len(), 4);
    assert_eq!(hiv1.gene("HIV1RT"), hiv1.gene("RT"));
}

#[rstest]
fn test_sdrm_only_mutation(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "RT", 77, "L");
    assert!(m.is_sdrm());
    assert!(!m.is_drm());
    assert_eq!(m.sdrm_drug_class(), Some(&DrugClass::new("NRTI")));
    assert_eq!(m.drm_drug_class(), None);
}

#[rstest]
fn test_major_nrti_mutation(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "RT", 184, "V");
    assert!(m.is_drm());
    assert!(m.is_sdrm());
    assert!(!m.is_tsm());
    assert!(!m.is_apobec_mutation());
    assert!(!m.is_unusual());
    assert!(m.is_at_drug_resistance_position());
    assert_eq!(m.drm_drug_class(), Some(&DrugClass::new("NRTI")));
    assert_eq!(m.types(), &[MutationType::new("NRTI")]);
    assert!(approx_eq(m.highest_mut_prevalence(), 8.5));
    assert_eq!(m.human_format(), "M184V");
}

#[rstest]
fn test_apobec_mutation(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "RT", 184, "I");
    assert!(m.is_apobec_mutation());
    assert!(m.is_apobec_drm());
    assert!(m.is_drm());

    let g48r = classify(hiv1, "PR", 48, "R");
    assert!(g48r.is_apobec_mutation());
    assert!(!g48r.is_apobec_drm());
    assert!(!g48r.is_drm());
}

#[rstest]
#[case("RT", 184, "W", true)]
#[case("RT", 184, "VI", false)]
#[case("RT", 184, "X", true)]
#[case("PR", 30, "NY", true)]
#[case("PR", 30, "N", false)]
fn test_is_unusual(
    hiv1: &Arc<dyn Virus>,
    #[case] gene: &str,
    #[case] position: u32,
    #[case] aas: &str,
    #[case] expected: bool,
) {
    assert_eq!(classify(hiv1, gene, position, aas).is_unusual(), expected);
}

#[rstest]
#[case("*")]
#[case("Z")]
#[case("W")]
#[case("CW")]
fn test_catalog_matches_stop_and_reference(hiv1: &Arc<dyn Virus>, #[case] aas: &str) {
    let m = classify(hiv1, "RT", 88, aas);
    assert!(m.is_drm());
    assert_eq!(m.drm_drug_class(), Some(&DrugClass::new("NNRTI")));
}

#[rstest]
fn test_unusual_uses_every_amino_acid(hiv1: &Arc<dyn Virus>) {
    let with_unusual = classify(hiv1, "PR", 30, "ACEFGHY");
    assert_eq!(with_unusual.human_format(), "D30X");
    assert!(with_unusual.is_unusual());

    // collapses to X for display, but no observed amino acid is unusual
    let without_unusual = classify(hiv1, "PR", 30, "ACEFGHN");
    assert_eq!(without_unusual.human_format(), "D30X");
    assert!(!without_unusual.is_unusual());
}

#[rstest]
fn test_highest_prevalence_ignores_reference(hiv1: &Arc<dyn Virus>) {
    // M itself is 91% prevalent but is the reference
    let m = classify(hiv1, "RT", 184, "MI");
    assert!(approx_eq(m.highest_mut_prevalence(), 0.4));

    let wild_type = classify(hiv1, "RT", 184, "M");
    assert_eq!(wild_type.highest_mut_prevalence(), 0.0);

    let ambiguous = classify(hiv1, "RT", 184, "X");
    assert_eq!(ambiguous.highest_mut_prevalence(), 0.0);
}

#[rstest]
fn test_protease_major(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "PR", 30, "N");
    assert!(m.is_drm());
    assert_eq!(m.drm_drug_class(), Some(&DrugClass::new("PI")));
    assert_eq!(m.primary_type(), &MutationType::new("Major"));
    assert!(approx_eq(m.highest_mut_prevalence(), 1.5));
}

#[rstest]
fn test_treatment_selected(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "PR", 10, "F");
    assert!(m.is_tsm());
    assert!(!m.is_drm());
    assert_eq!(m.tsm_drug_class(), Some(&DrugClass::new("PI")));
    assert_eq!(m.primary_type(), &MutationType::new("Accessory"));
    assert!(!m.is_at_drug_resistance_position());
}

#[rstest]
fn test_multiple_types(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "IN", 148, "H");
    assert_eq!(
        m.types(),
        &[MutationType::new("Major"), MutationType::new("Accessory")]
    );
    assert_eq!(m.drm_drug_class(), Some(&DrugClass::new("INSTI")));
}

#[rstest]
fn test_insertion_catalog_entry(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "RT", 69, "#");
    assert!(m.is_insertion());
    assert!(m.is_drm());
    assert_eq!(m.human_format(), "T69Insertion");
    assert_eq!(m.asi_format(), "T69i");
}

#[rstest]
#[case("RT", 74, true)]
#[case("PR", 46, true)]
#[case("RT", 65, true)]
#[case("RT", 75, false)]
fn test_drug_resistance_positions(
    hiv1: &Arc<dyn Virus>,
    #[case] gene: &str,
    #[case] position: u32,
    #[case] expected: bool,
) {
    let m = classify(hiv1, gene, position, "A");
    assert_eq!(m.is_at_drug_resistance_position(), expected);
}

#[rstest]
fn test_prevalences(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "RT", 184, "V");
    let prevalences = m.prevalences();
    assert_eq!(prevalences.len(), 3);
    let subtypes: Vec<&str> = prevalences.iter().map(|p| p.subtype.as_str()).collect();
    assert_eq!(subtypes, vec!["B", "C", "B"]);
    assert!(classify(hiv1, "RT", 41, "L").prevalences().is_empty());
}

#[rstest]
fn test_display_threshold_does_not_change_classification(hiv1: &Arc<dyn Virus>) {
    let m = classify(hiv1, "RT", 184, "ACDEFGV");
    assert_eq!(m.human_format(), "M184X");
    assert_eq!(m.short_human_format(), "M184X");
    assert_eq!(m.hivdb_format(), "184ACDEFGV");
    assert!(m.is_drm());
}

#[test]
fn test_from_path_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"name\": \"HIV1\", \"genes\": [").unwrap();

    let err = StaticVirus::from_path(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse knowledge base"));
}

#[test]
fn test_from_path_missing() {
    let err = StaticVirus::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read knowledge base"));
}

#[test]
fn test_unknown_gene_in_catalog() {
    let json = r#"{
        "name": "HIV1",
        "genes": [{"strain": "HIV1", "name": "HIV1PR", "abstractGene": "PR", "refSequence": "PQITLWQRPL"}],
        "drugResistMutations": [{"drugClass": "NRTI", "mutations": ["RT:M41L"]}]
    }"#;
    match StaticVirus::from_json_str(json) {
        Err(KnowledgeBaseError::Mutation(err)) => {
            assert_eq!(err, MutationError::UnknownGene("RT".to_string()))
        }
        other => panic!("unexpected result: {:?}", other.map(|v| v.name().to_string())),
    }
}

#[test]
fn test_invalid_drug_resistance_position() {
    let json = r#"{
        "name": "HIV1",
        "genes": [{"strain": "HIV1", "name": "HIV1PR", "abstractGene": "PR", "refSequence": "PQITLWQRPL"}],
        "drugResistancePositions": ["PR:11"]
    }"#;
    assert!(matches!(
        StaticVirus::from_json_str(json),
        Err(KnowledgeBaseError::InvalidGenePosition(_))
    ));
}
