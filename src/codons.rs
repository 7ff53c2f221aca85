//! Amino acid → **degenerate codon** substitution table.
//!
//! Every known amino acid (stop included) defaults to the saturating wildcard
//! codon [`DEFAULT_CODON`]. Callers override individual residues; overrides are
//! applied as-is, including keys outside the known alphabet.
//!
//! # Examples
//! ```
//! use std::collections::BTreeMap;
//! let table = geneorator::codons::build_codon_table(&BTreeMap::from([('S', "AGC".to_string())]));
//! assert_eq!(table.get('S'), Some("AGC"));
//! assert_eq!(table.get('A'), Some("NNK"));
//! ```
use std::collections::BTreeMap;
use std::path::Path;

use crate::data::genetic_code::{is_amino_acid, AA_CODES};
use crate::error::{GenieError, Result};

/// Saturating codon used for every amino acid unless overridden.
pub const DEFAULT_CODON: &str = "NNK";

/// Read-only mapping from amino-acid code to degenerate codon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodonTable {
    codons: BTreeMap<char, String>,
}

impl Default for CodonTable {
    fn default() -> Self {
        let codons = AA_CODES.iter().map(|&aa| (aa, DEFAULT_CODON.to_string())).collect();
        Self { codons }
    }
}

impl CodonTable {
    /// Degenerate codon configured for `amino_acid`, if any.
    pub fn get(&self, amino_acid: char) -> Option<&str> {
        self.codons.get(&amino_acid).map(String::as_str)
    }

    /// Degenerate codon for `amino_acid`, or [`GenieError::MissingCodon`].
    pub fn lookup(&self, amino_acid: char, codon: &str, position: usize) -> Result<&str> {
        self.get(amino_acid).ok_or_else(|| GenieError::MissingCodon {
            amino_acid,
            codon: codon.to_string(),
            position,
        })
    }

    /// Entries in amino-acid order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.codons.iter().map(|(aa, c)| (*aa, c.as_str()))
    }

    /// Number of configured amino acids.
    pub fn len(&self) -> usize { self.codons.len() }

    pub fn is_empty(&self) -> bool { self.codons.is_empty() }
}

/// Build the table: [`DEFAULT_CODON`] everywhere, then `overrides` on top.
pub fn build_codon_table(overrides: &BTreeMap<char, String>) -> CodonTable {
    let mut table = CodonTable::default();
    for (aa, codon) in overrides {
        table.codons.insert(*aa, codon.clone());
    }
    table
}

/// Override keys that are not amino-acid codes (kept, but worth reporting).
pub fn unknown_override_keys(overrides: &BTreeMap<char, String>) -> Vec<char> {
    overrides.keys().copied().filter(|aa| !is_amino_acid(*aa)).collect()
}

/// Parse `S=AGC` (case-insensitive) into `('S', "AGC")`.
pub fn parse_override(text: &str) -> Result<(char, String)> {
    let (aa, codon) = text
        .split_once('=')
        .ok_or_else(|| GenieError::InvalidOverride(text.to_string()))?;
    let mut chars = aa.trim().chars();
    let aa = match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_ascii_uppercase(),
        _ => return Err(GenieError::InvalidOverride(text.to_string())),
    };
    let codon = codon.trim().to_ascii_uppercase();
    if codon.is_empty() {
        return Err(GenieError::InvalidOverride(text.to_string()));
    }
    Ok((aa, codon))
}

/// Load overrides from a two-column CSV or TSV (`amino_acid,codon`, with header).
pub fn load_overrides<P: AsRef<Path>>(path: P) -> anyhow::Result<BTreeMap<char, String>> {
    let p = path.as_ref();
    let delim = if p.extension().map(|e| e == "tsv").unwrap_or(false) { b'\t' } else { b',' };
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).delimiter(delim).from_path(p)?;
    let mut map = BTreeMap::new();
    for rec in rdr.records() {
        let r = rec?;
        if r.len() >= 2 {
            let (aa, codon) = parse_override(&format!("{}={}", &r[0], &r[1]))?;
            map.insert(aa, codon);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod codon_table_tests {
    use super::*;

    #[test]
    fn default_covers_every_amino_acid_with_nnk() {
        let t = build_codon_table(&BTreeMap::new());
        assert_eq!(t.len(), 21);
        assert!(t.iter().all(|(_, c)| c == "NNK"));
        assert_eq!(t.get('*'), Some("NNK"));
        assert_eq!(t.get('X'), None);
    }

    #[test]
    fn overrides_replace_only_given_keys_and_may_add_new_ones() {
        let o = BTreeMap::from([('S', "AGC".to_string()), ('X', "NNN".to_string())]);
        let t = build_codon_table(&o);
        assert_eq!(t.get('S'), Some("AGC"));
        assert_eq!(t.get('T'), Some("NNK"));
        assert_eq!(t.get('X'), Some("NNN"));
        assert_eq!(unknown_override_keys(&o), vec!['X']);
    }

    #[test]
    fn missing_entry_is_a_configuration_error() {
        let t = CodonTable { codons: BTreeMap::new() };
        let err = t.lookup('M', "ATG", 0).unwrap_err();
        assert_eq!(err, GenieError::MissingCodon { amino_acid: 'M', codon: "ATG".into(), position: 0 });
    }

    #[test]
    fn parse_override_text() {
        assert_eq!(parse_override("s=agc").unwrap(), ('S', "AGC".to_string()));
        assert_eq!(parse_override(" * = TAA ").unwrap(), ('*', "TAA".to_string()));
        assert!(parse_override("SAGC").is_err());
        assert!(parse_override("SER=AGC").is_err());
        assert!(parse_override("S=").is_err());
    }

    #[test]
    fn load_overrides_from_tsv() {
        let dir = std::env::temp_dir().join(format!("geneorator-codons-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("codons.tsv");
        std::fs::write(&path, "amino_acid\tcodon\nS\tAGC\nl\tctg\n").unwrap();
        let map = load_overrides(&path).unwrap();
        assert_eq!(map.get(&'S').map(String::as_str), Some("AGC"));
        assert_eq!(map.get(&'L').map(String::as_str), Some("CTG"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
