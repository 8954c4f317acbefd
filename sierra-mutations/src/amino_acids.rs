//! Amino-acid code normalization.
//!
//! Observed amino acids arrive in several spellings depending on the
//! upstream tool. Insertions, deletions and stop codons each have two
//! aliases that are folded into one canonical marker here, so that every
//! mutation value compares and displays the same way regardless of where
//! it came from.

use std::collections::BTreeSet;

use sierra_core::consts::{
    DELETION, DELETION_ALIASES, INSERTION, INSERTION_ALIASES, STOP, STOP_ALIASES,
};

/// Collect amino-acid codes into a sorted set with indel and stop aliases
/// replaced by their canonical markers.
///
/// Applying this to an already normalized set returns the same set.
pub fn normalize_aa_chars<I>(aa_chars: I) -> BTreeSet<char>
where
    I: IntoIterator<Item = char>,
{
    let mut aas: BTreeSet<char> = aa_chars.into_iter().collect();
    canonicalize(&mut aas, &INSERTION_ALIASES, INSERTION);
    canonicalize(&mut aas, &DELETION_ALIASES, DELETION);
    canonicalize(&mut aas, &STOP_ALIASES, STOP);
    aas
}

fn canonicalize(aas: &mut BTreeSet<char>, aliases: &[char], canonical: char) {
    let mut found = false;
    for alias in aliases {
        found |= aas.remove(alias);
    }
    if found {
        aas.insert(canonical);
    }
}

/// Concatenate amino-acid codes in iteration order.
pub fn join_aas<'a, I>(aas: I) -> String
where
    I: IntoIterator<Item = &'a char>,
{
    aas.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("#", "_")]
    #[case("i", "_")]
    #[case("#i", "_")]
    #[case("~", "-")]
    #[case("d", "-")]
    #[case("Z", "*")]
    #[case(".", "*")]
    #[case("KR", "KR")]
    #[case("RK", "KR")]
    #[case("dK#", "-K_")]
    #[case("Z.X", "*X")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        let aas = normalize_aa_chars(input.chars());
        assert_eq!(join_aas(&aas), expected);
    }

    #[rstest]
    #[case("#iA")]
    #[case("~dZ.")]
    #[case("ACDEFGHIKLMNPQRSTVWY_-*X")]
    fn test_normalize_idempotent(#[case] input: &str) {
        let once = normalize_aa_chars(input.chars());
        let twice = normalize_aa_chars(once.iter().copied());
        assert_eq!(once, twice);
    }
}
