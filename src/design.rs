//! Pipeline driver: codon table → full sequence → sets → ordered records.
//!
//! [`DesignOpts`] carries every knob of a run. Its defaults match the usual
//! single-codon scan: one codon per set, 60 °C flanks, 7.5 % tolerance, `NNK`
//! everywhere.
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::codons::build_codon_table;
use crate::error::{require_ascii, GenieError, Result};
use crate::flank::{FitParams, DEFAULT_TOLERANCE};
use crate::melt::Reagents;
use crate::oligo::{FlankPair, OligoRecord, OligoSet};
use crate::partition::partition_sets;

/// Parameters for one design run.
#[derive(Clone, Debug, PartialEq)]
pub struct DesignOpts {
    /// Codons per set.
    pub set_len: usize,
    /// Target flank melting temperature (°C).
    pub melt_temp: f64,
    /// Allowed deviation as a fraction of `melt_temp`.
    pub tolerance: f64,
    /// Buffer used for every Tm.
    pub reagents: Reagents,
    /// Amino acid → degenerate codon overrides on top of `NNK`.
    pub codons: BTreeMap<char, String>,
    /// Date stamped into record ids; `None` means today.
    pub run_date: Option<NaiveDate>,
}

impl Default for DesignOpts {
    fn default() -> Self {
        Self {
            set_len: 1,
            melt_temp: 60.0,
            tolerance: DEFAULT_TOLERANCE,
            reagents: Reagents::default(),
            codons: BTreeMap::new(),
            run_date: None,
        }
    }
}

impl DesignOpts {
    /// Flank search settings derived from these options.
    pub fn fit_params(&self) -> FitParams {
        FitParams { melt_temp: self.melt_temp, tolerance: self.tolerance, reagents: self.reagents }
    }

    /// Date stamped into ids: `run_date`, or today's local date.
    pub fn date(&self) -> NaiveDate {
        self.run_date.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn validate(&self) -> Result<()> {
        if self.set_len == 0 || self.set_len.checked_mul(3).is_none() {
            return Err(GenieError::InvalidSetLength(self.set_len));
        }
        if !self.melt_temp.is_finite() {
            return Err(GenieError::InvalidMeltTemp(self.melt_temp));
        }
        Ok(())
    }
}

/// Design all sets for `template` between `flanks`.
///
/// Sequences and override codons must be ASCII; the first non-ASCII character
/// is reported as [`GenieError::InvalidBase`] against the input it came from.
pub fn design_sets(template: &str, flanks: &FlankPair, opts: &DesignOpts) -> Result<Vec<OligoSet>> {
    opts.validate()?;
    for seq in [flanks.pre.as_str(), template, flanks.post.as_str()] {
        require_ascii(seq)?;
    }
    for codon in opts.codons.values() {
        require_ascii(codon)?;
    }
    let table = build_codon_table(&opts.codons);
    let full = [flanks.pre.as_str(), template, flanks.post.as_str()].concat();
    let offset = flanks.pre.len();
    partition_sets(&full, offset, offset + template.len(), opts.set_len, &opts.fit_params(), &table, opts.date())
}

/// Design every oligo for `template`, ordered by set then member.
///
/// # Examples
/// ```
/// use geneorator::{get_oligos, DesignOpts, FlankPair};
/// let oligos = get_oligos("ATGGCTAGC", &FlankPair::default(), &DesignOpts::default()).unwrap();
/// let seqs: Vec<&str> = oligos.iter().map(|o| o.sequence.as_str()).collect();
/// assert_eq!(seqs, ["NNKGCTAGC", "ATGNNKAGC", "ATGGCTNNK"]);
/// ```
pub fn get_oligos(template: &str, flanks: &FlankPair, opts: &DesignOpts) -> Result<Vec<OligoRecord>> {
    let sets = design_sets(template, flanks, opts)?;
    Ok(sets.into_iter().flat_map(|s| s.members).collect())
}
