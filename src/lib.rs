#![forbid(unsafe_code)]
//! # geneorator
//!
//! Oligo design for **saturation-mutagenesis** libraries. A template coding
//! sequence is cut into consecutive **sets** of codons; for every codon of a
//! set one oligo is produced in which that codon is replaced by a **degenerate
//! codon** (`NNK` by default) and the set is framed by flanking arms trimmed to
//! a target **melting temperature**.
//!
//! ## Pipeline
//! - [`codons::build_codon_table`]: amino acid → degenerate codon, with overrides.
//! - [`partition::partition_sets`]: windows of `set_len` codons over `pre + template + post`.
//! - [`flank::fit_flank`]: upstream/downstream arms fitted once per set, ending on G/C.
//! - [`member::build_member`]: one substituted oligo per codon position.
//! - [`get_oligos`]: the whole run, records ordered by set then member.
//!
//! ## Examples
//! ```rust
//! use geneorator::{get_oligos, DesignOpts, FlankPair};
//! let opts = DesignOpts { set_len: 3, ..DesignOpts::default() };
//! let oligos = get_oligos("ATGGCTAGC", &FlankPair::default(), &opts).unwrap();
//! assert_eq!(oligos.len(), 3);
//! assert!(oligos.iter().all(|o| o.set_number == 1 && o.pre_melt_temp.is_nan()));
//! ```
//!
//! ## Melting temperature
//! Nearest-neighbour model with salt correction, see [`melt`].

pub mod error;
pub mod oligo;
pub mod codons;
pub mod melt;
pub mod flank;
pub mod member;
pub mod partition;
pub mod design;
pub mod table;
pub mod seqio;
pub mod data { pub mod genetic_code; }

pub use design::{design_sets, get_oligos, DesignOpts};
pub use error::{GenieError, Result};
pub use oligo::{FitOutcome, FittedFlank, FlankPair, OligoRecord, OligoSet};

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convenience: the effective codon table as `(amino_acid, codon)` rows.
pub fn codon_rows(overrides: &std::collections::BTreeMap<char, String>) -> Vec<(String, String)> {
    codons::build_codon_table(overrides)
        .iter()
        .map(|(aa, c)| (aa.to_string(), c.to_string()))
        .collect()
}

/// Count the flank fits of a design that fell back to the unfitted candidate.
pub fn fallback_count(sets: &[OligoSet]) -> usize {
    sets.iter()
        .map(|s| usize::from(!s.pre.is_fitted()) + usize::from(!s.post.is_fitted()))
        .sum()
}

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    const PRE: &str = "GGTCTCAGCTAGCGATATCGCTACGGAATTCGC";
    const POST: &str = "GCGTAAGCTTCCATGGCTCGAGGCCGTCGACC";

    fn opts(set_len: usize) -> DesignOpts {
        DesignOpts { set_len, run_date: NaiveDate::from_ymd_opt(2017, 5, 1), ..DesignOpts::default() }
    }

    #[test]
    fn single_codon_sets() {
        let o = get_oligos("ATGGCTAGC", &FlankPair::default(), &opts(1)).unwrap();
        assert_eq!(o.len(), 3);
        assert_eq!(o.iter().map(|r| r.set_number).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(o.iter().all(|r| r.set_member == 1));
        assert_eq!(o.iter().map(|r| r.amino_acid).collect::<String>(), "MAS");
        assert_eq!(o[1].sequence, "ATGNNKAGC");
        assert_eq!(o[2].id, "2017-05-01_3.1");
    }

    #[test]
    fn one_set_covers_template() {
        let sets = design_sets("ATGGCTAGC", &FlankPair::default(), &opts(3)).unwrap();
        assert_eq!(sets.len(), 1);
        let s = &sets[0];
        assert_eq!(s.members.iter().map(|r| r.set_member).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(s.members.iter().all(|r| r.pre_melt_temp.is_nan() && r.post_melt_temp.is_nan()));
        assert_eq!(fallback_count(&sets), 2);
    }

    #[test]
    fn template_not_codon_aligned_fails() {
        for set_len in 1..=4 {
            let err = get_oligos("ATGGCTAGCA", &FlankPair::default(), &opts(set_len)).unwrap_err();
            assert_eq!(err, GenieError::PartialCodon { position: 9, fragment: "A".into() });
        }
    }

    #[test]
    fn serine_override_is_used() {
        let mut o = opts(1);
        o.codons = BTreeMap::from([('S', "AGC".to_string())]);
        let recs = get_oligos("ATGTCTGCT", &FlankPair::default(), &o).unwrap();
        assert_eq!(recs[1].amino_acid, 'S');
        assert_eq!(recs[1].mutated_codon(), "AGC");
        assert_eq!(recs[0].mutated_codon(), "NNK");
    }

    #[test]
    fn one_record_per_codon_and_mutation_in_place() {
        let template = "ATGAAAGATCTGGCTTCCGGTTGGTAA";
        let flanks = FlankPair::new(PRE, POST);
        for set_len in 1..=10 {
            let sets = design_sets(template, &flanks, &opts(set_len)).unwrap();
            let recs: Vec<&OligoRecord> = sets.iter().flat_map(|s| s.members.iter()).collect();
            assert_eq!(recs.len(), template.len() / 3);
            for (i, r) in recs.iter().enumerate() {
                assert_eq!(r.mutated_codon(), "NNK");
                assert_eq!(r.template_codon, &template[3 * i..3 * i + 3]);
                let s = &sets[r.set_number - 1];
                assert!(r.sequence.starts_with(&s.pre.flank().sequence));
                assert!(r.sequence.ends_with(&s.post.flank().sequence));
                // Everything but the mutated codon is the full sequence, contiguous.
                let full = [PRE, template, POST].concat();
                let pre_len = s.pre.flank().sequence.len();
                let start = s.span.start - pre_len;
                let expect = &full[start..start + r.len()];
                assert_eq!(&r.sequence[..r.mutation_offset], &expect[..r.mutation_offset]);
                assert_eq!(&r.sequence[r.mutation_offset + 3..], &expect[r.mutation_offset + 3..]);
            }
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let flanks = FlankPair::new(PRE, POST);
        let a = get_oligos("ATGGCTAGCTTT", &flanks, &opts(2)).unwrap();
        let b = get_oligos("ATGGCTAGCTTT", &flanks, &opts(2)).unwrap();
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
    }

    #[test]
    fn fitted_arms_end_on_gc_and_meet_tolerance() {
        let sets = design_sets("ATGGCTAGC", &FlankPair::new(PRE, POST), &opts(1)).unwrap();
        for s in &sets {
            for fit in [&s.pre, &s.post] {
                let f = fit.flank();
                if fit.is_fitted() {
                    assert!((f.melt_temp - 60.0).abs() / 60.0 < 0.075);
                }
            }
            let pre = &s.pre.flank().sequence;
            let post = &s.post.flank().sequence;
            if s.pre.is_fitted() { assert!(matches!(pre.as_bytes()[0], b'G' | b'C')); }
            if s.post.is_fitted() { assert!(matches!(post.as_bytes()[post.len() - 1], b'G' | b'C')); }
        }
        assert!(sets[0].pre.is_fitted() && sets[0].post.is_fitted());
    }

    #[test]
    fn failing_search_keeps_every_record() {
        let mut o = opts(1);
        o.tolerance = 0.0;
        let sets = design_sets("ATGGCTAGC", &FlankPair::new(PRE, POST), &o).unwrap();
        assert_eq!(sets.iter().map(|s| s.members.len()).sum::<usize>(), 3);
        assert!(sets.iter().all(|s| !s.pre.is_fitted() && !s.post.is_fitted()));
        assert_eq!(sets[0].pre.flank().sequence, PRE);
        assert_eq!(sets[2].post.flank().sequence, POST);
    }

    #[test]
    fn invalid_numbers_are_caller_errors() {
        assert_eq!(get_oligos("ATG", &FlankPair::default(), &opts(0)).unwrap_err(), GenieError::InvalidSetLength(0));
        let o = DesignOpts { melt_temp: f64::NAN, ..opts(1) };
        assert!(matches!(get_oligos("ATG", &FlankPair::default(), &o), Err(GenieError::InvalidMeltTemp(_))));
    }

    #[test]
    fn codon_rows_list_every_amino_acid() {
        let rows = codon_rows(&BTreeMap::new());
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().any(|(aa, c)| aa == "*" && c == "NNK"));
    }
}
