//! Text encodings of amino-acid mutations.
//!
//! Every encoding has the shape `<lead><position><tail>`:
//!
//! - ASI format (`asi_format`): the notation rule interpreters consume,
//!   e.g. `T69i`, `K65Z`. Uses the full amino-acid set.
//! - HIVDB format (`hivdb_format`): compact internal notation without the
//!   reference, e.g. `69#`, `67~`. Uses the full amino-acid set.
//! - Human format (`human_format`): `D30N`, `T69Insertion`.
//! - Short human format (`short_human_format`): `D30N`, `T69i`.
//!
//! The two human formats list the reference amino acid first and collapse
//! to `X` once the display threshold is exceeded.

use std::fmt::{self, Display};

use sierra_core::consts::{AMBIGUOUS, DELETION, INSERTION, STOP};

use crate::amino_acids::join_aas;
use crate::mutation::AAMutation;

impl AAMutation {
    /// Display amino acids with the reference amino acid (if observed) first.
    pub fn aas_with_ref_first(&self) -> String {
        let mut aas = self.display_aa_chars();
        let mut result = String::with_capacity(aas.len());
        if aas.remove(&self.ref_char()) {
            result.push(self.ref_char());
        }
        result.push_str(&join_aas(&aas));
        result
    }

    pub fn aas_without_reference(&self) -> String {
        let mut aas = self.display_aa_chars();
        aas.remove(&self.ref_char());
        join_aas(&aas)
    }

    pub fn asi_format(&self) -> String {
        let aas: String = self
            .aa_chars()
            .iter()
            .map(|&aa| match aa {
                INSERTION => 'i',
                DELETION => 'd',
                AMBIGUOUS | STOP => 'Z',
                other => other,
            })
            .collect();
        format!("{}{}{}", self.ref_char(), self.position(), aas)
    }

    pub fn hivdb_format(&self) -> String {
        let aas: String = self
            .aa_chars()
            .iter()
            .map(|&aa| match aa {
                INSERTION => '#',
                DELETION => '~',
                other => other,
            })
            .collect();
        format!("{}{}", self.position(), aas)
    }

    pub fn human_format(&self) -> String {
        let aas = match self.aas_with_ref_first().as_str() {
            "_" => "Insertion".to_string(),
            "-" => "Deletion".to_string(),
            other => other.to_string(),
        };
        format!("{}{}{}", self.ref_char(), self.position(), aas)
    }

    pub fn short_human_format(&self) -> String {
        let aas = match self.aas_with_ref_first().as_str() {
            "_" => "i".to_string(),
            "-" => "d".to_string(),
            other => other.to_string(),
        };
        format!("{}{}{}", self.ref_char(), self.position(), aas)
    }

    pub fn human_format_without_leading_ref(&self) -> String {
        let human = self.human_format();
        human[self.ref_char().len_utf8()..].to_string()
    }

    /// Human format prefixed with the gene name, e.g. `HIV1RT_M184V`.
    pub fn human_format_with_gene(&self) -> String {
        format!("{}_{}", self.gene().name, self.human_format())
    }

    pub fn short_text(&self) -> String {
        self.short_human_format()
    }
}

impl Display for AAMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.human_format())
    }
}
