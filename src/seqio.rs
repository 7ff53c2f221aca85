//! Template input from **FASTA / FASTQ (optionally gzipped)** files.
//!
//! Parsing is done with `needletail`; only the first record is used as the
//! template. Sequences are uppercased and whitespace is dropped.
//!
//! ### Example
//! ```no_run
//! let t = geneorator::seqio::read_template("gene.fasta").unwrap();
//! println!("{} ({} nt)", t.id, t.seq.len());
//! ```
use std::path::Path;

use anyhow::{bail, Result};
use needletail::parse_fastx_file;

/// A template record read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    pub id: String,
    pub seq: String,
    /// Records in the file after the first (ignored).
    pub skipped: usize,
}

/// Uppercase `seq` and drop whitespace.
pub fn normalize_seq(seq: &str) -> String {
    seq.chars().filter(|c| !c.is_whitespace()).map(|c| c.to_ascii_uppercase()).collect()
}

/// Read the first record of `path` as the template.
pub fn read_template<P: AsRef<Path>>(path: P) -> Result<TemplateRecord> {
    let p = path.as_ref();
    let mut reader = parse_fastx_file(p)?;
    let first = match reader.next() {
        Some(record) => {
            let rec = record?;
            let id = String::from_utf8_lossy(rec.id()).to_string();
            let seq = normalize_seq(&String::from_utf8_lossy(&rec.seq()));
            (id, seq)
        }
        None => bail!("No sequence records in {}", p.display()),
    };
    let mut skipped = 0usize;
    while let Some(record) = reader.next() {
        record?;
        skipped += 1;
    }
    Ok(TemplateRecord { id: first.0, seq: first.1, skipped })
}

#[cfg(test)]
mod seqio_tests {
    use super::*;

    #[test]
    fn first_fasta_record_is_the_template() {
        let dir = std::env::temp_dir().join(format!("geneorator-seqio-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("t.fasta");
        std::fs::write(&path, ">gene1 test\natggct\nagc\n>gene2\nTTT\n").unwrap();
        let t = read_template(&path).unwrap();
        assert_eq!(t.id, "gene1 test");
        assert_eq!(t.seq, "ATGGCTAGC");
        assert_eq!(t.skipped, 1);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn normalize_strips_space_and_uppercases() {
        assert_eq!(normalize_seq(" at g\ncc "), "ATGCC");
    }
}
