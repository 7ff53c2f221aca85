//! The **standard genetic code** (NCBI translation table 1).
//!
//! Source: NCBI Taxonomy, *The Genetic Codes*, table 1 (Standard).
//!
//! - 64 codons over the DNA alphabet, stop codons encoded as `*`
//! - IUPAC ambiguity codes are resolved by expansion (see [`translate`])
//!
//! Notes:
//! - `X` is returned for codons that cannot be resolved to a single amino acid.
//!   It is not one of [`AA_CODES`], so default codon tables never carry it.

/// Single-letter codes of the 20 amino acids plus `*` (stop).
pub const AA_CODES: [char; 21] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V',
    'W', 'Y', '*',
];

/// Code reported for codons that do not resolve to one amino acid.
pub const UNKNOWN_AA: char = 'X';

/// Table 1 indexed by `16 * i(first) + 4 * i(second) + i(third)` with `T=0, C=1, A=2, G=3`.
const STANDARD: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

fn base_index(b: u8) -> Option<usize> {
    match b {
        b'T' | b'U' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

// Based on the table at https://www.bioinformatics.org/sms/iupac.html
fn expand_iupac(code: u8) -> &'static [u8] {
    match code {
        b'A' => b"A",
        b'C' => b"C",
        b'G' => b"G",
        b'T' | b'U' => b"T",
        b'R' => b"AG",
        b'Y' => b"CT",
        b'S' => b"GC",
        b'W' => b"AT",
        b'K' => b"GT",
        b'M' => b"AC",
        b'B' => b"CGT",
        b'D' => b"AGT",
        b'H' => b"ACT",
        b'V' => b"ACG",
        b'N' => b"ACGT",
        _ => b"",
    }
}

fn translate_exact(codon: [u8; 3]) -> Option<char> {
    let i = base_index(codon[0])? * 16 + base_index(codon[1])? * 4 + base_index(codon[2])?;
    Some(STANDARD[i] as char)
}

/// Return `true` if `aa` is one of the known amino-acid codes (stop included).
pub fn is_amino_acid(aa: char) -> bool {
    AA_CODES.contains(&aa)
}

/// Translate a 3-nucleotide codon to its single-letter amino-acid code.
///
/// Input is case-insensitive and `U` reads as `T`. Ambiguous codons resolve when
/// every expansion encodes the same residue (`GCN` → `A`); otherwise, and for
/// inputs that are not exactly three IUPAC symbols, the result is [`UNKNOWN_AA`].
///
/// # Examples
/// ```
/// use geneorator::data::genetic_code::translate;
/// assert_eq!(translate("ATG"), 'M');
/// assert_eq!(translate("tga"), '*');
/// assert_eq!(translate("GCN"), 'A');
/// assert_eq!(translate("NNK"), 'X');
/// ```
pub fn translate(codon: &str) -> char {
    let bytes = codon.as_bytes();
    if bytes.len() != 3 {
        return UNKNOWN_AA;
    }
    let up = [
        bytes[0].to_ascii_uppercase(),
        bytes[1].to_ascii_uppercase(),
        bytes[2].to_ascii_uppercase(),
    ];
    if let Some(aa) = translate_exact(up) {
        return aa;
    }

    let mut resolved: Option<char> = None;
    for &a in expand_iupac(up[0]) {
        for &b in expand_iupac(up[1]) {
            for &c in expand_iupac(up[2]) {
                let aa = translate_exact([a, b, c]).unwrap_or(UNKNOWN_AA);
                match resolved {
                    None => resolved = Some(aa),
                    Some(prev) if prev != aa => return UNKNOWN_AA,
                    Some(_) => {}
                }
            }
        }
    }
    resolved.unwrap_or(UNKNOWN_AA)
}
