/// Display threshold: mutations with more amino acids than this render as `X`.
pub const DEFAULT_MAX_DISPLAY_AAS: usize = 6;

/// Canonical insertion marker.
pub const INSERTION: char = '_';
/// Canonical deletion marker.
pub const DELETION: char = '-';
/// Canonical stop codon marker.
pub const STOP: char = '*';
/// Unresolved / highly ambiguous amino acid.
pub const AMBIGUOUS: char = 'X';

/// Alternative spellings of the insertion marker accepted on input.
pub const INSERTION_ALIASES: [char; 2] = ['#', 'i'];
/// Alternative spellings of the deletion marker accepted on input.
pub const DELETION_ALIASES: [char; 2] = ['~', 'd'];
/// Alternative spellings of the stop marker accepted on input.
pub const STOP_ALIASES: [char; 2] = ['Z', '.'];
