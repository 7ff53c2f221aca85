//! Nearest-neighbour **melting temperature** and Tm-directed sub-sequence search.
//!
//! ### Model
//! - Unified nearest-neighbour parameters (Allawi & SantaLucia 1997)
//! - Terminal A·T / G·C initiation penalties
//! - Entropy salt correction `0.368·(N − 1)·ln[Na⁺]` (SantaLucia 1998) on the
//!   monovalent-equivalent concentration `Na + K + Tris/2 (+ 120·√(Mg − dNTPs))`
//! - Two non-self-complementary strands at 25 nM each
//!
//! ### Example
//! ```
//! use geneorator::melt::{melting_temperature, Reagents};
//! let na_only = Reagents { mg: 0.0, ..Reagents::default() };
//! let tm = melting_temperature("CGTTCCAAAGATGTGGGCATGAGCTTAC", &na_only).unwrap();
//! assert!((tm - 60.32).abs() < 0.01);
//! ```
use bio::alphabets::dna;

use crate::error::{require_ascii, GenieError, Result};
use crate::oligo::Direction;

/// Gas constant in cal/(K·mol).
const R: f64 = 1.987;

/// Unified NN stacks as `(ΔH kcal/mol, ΔS cal/(K·mol))`, keyed by the top strand.
/// The six stacks missing here are read through their reverse complement.
const NN_STACKS: [(&[u8; 2], f64, f64); 10] = [
    (b"AA", -7.9, -22.2),
    (b"AT", -7.2, -20.4),
    (b"TA", -7.2, -21.3),
    (b"CA", -8.5, -22.7),
    (b"GT", -8.4, -22.4),
    (b"CT", -7.8, -21.0),
    (b"GA", -8.2, -22.2),
    (b"CG", -10.6, -27.2),
    (b"GC", -9.8, -24.4),
    (b"GG", -8.0, -19.9),
];

const INIT_AT: (f64, f64) = (2.3, 4.1);
const INIT_GC: (f64, f64) = (0.1, -2.8);

/// Reagent concentrations used by the salt correction. Ions in mM, strands in nM.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reagents {
    /// Na⁺ (mM).
    pub na: f64,
    /// K⁺ (mM).
    pub k: f64,
    /// Tris buffer (mM).
    pub tris: f64,
    /// Mg²⁺ (mM).
    pub mg: f64,
    /// dNTPs (mM); they chelate Mg²⁺.
    pub dntps: f64,
    /// Concentration of the strand in excess (nM).
    pub strand_high: f64,
    /// Concentration of the limiting strand (nM).
    pub strand_low: f64,
}

impl Default for Reagents {
    fn default() -> Self {
        Self { na: 50.0, k: 0.0, tris: 0.0, mg: 10.0, dntps: 0.0, strand_high: 25.0, strand_low: 25.0 }
    }
}

impl Reagents {
    /// Sodium-equivalent monovalent concentration in mM (von Ahsen 2001).
    pub fn monovalent_equivalent(&self) -> f64 {
        let mut mon = self.na + self.k + self.tris / 2.0;
        if self.mg > self.dntps {
            mon += 120.0 * (self.mg - self.dntps).sqrt();
        }
        mon
    }
}

fn stack(pair: &[u8]) -> (f64, f64) {
    let lookup = |p: &[u8]| NN_STACKS.iter().find(|(k, _, _)| k.as_slice() == p).map(|&(_, h, s)| (h, s));
    lookup(pair)
        .or_else(|| lookup(&dna::revcomp(pair)))
        .unwrap_or((0.0, 0.0))
}

/// Melting temperature (°C) of `seq` against its perfect complement.
///
/// Returns [`GenieError::InvalidBase`] for anything other than A/C/G/T.
/// An empty sequence has no duplex and yields `NaN`.
pub fn melting_temperature(seq: &str, reagents: &Reagents) -> Result<f64> {
    if seq.is_empty() {
        return Ok(f64::NAN);
    }
    let s = seq.to_ascii_uppercase();
    let bytes = s.as_bytes();
    if let Some(&bad) = bytes.iter().find(|&&b| !matches!(b, b'A' | b'C' | b'G' | b'T')) {
        return Err(GenieError::InvalidBase { sequence: seq.to_string(), base: bad as char });
    }
    debug_assert!(dna::alphabet().is_word(bytes));

    let (mut dh, mut ds) = (0.0, 0.0);
    for &end in &[bytes[0], bytes[bytes.len() - 1]] {
        let (h, s) = if matches!(end, b'A' | b'T') { INIT_AT } else { INIT_GC };
        dh += h;
        ds += s;
    }
    for pair in bytes.windows(2) {
        let (h, s) = stack(pair);
        dh += h;
        ds += s;
    }

    // SantaLucia (1998) entropy correction.
    let mon = reagents.monovalent_equivalent() * 1e-3;
    ds += 0.368 * (bytes.len() - 1) as f64 * mon.ln();

    let k = (reagents.strand_high - reagents.strand_low / 2.0) * 1e-9;
    Ok((1000.0 * dh) / (ds + R * k.ln()) - 273.15)
}

/// Find the sub-sequence of `seq` whose Tm is closest to `target`.
///
/// Candidates of length 4 up to `seq.len()` are taken from the start
/// ([`Direction::Forward`], terminus = last base) or from the end
/// ([`Direction::Backward`], terminus = first base). Only candidates whose
/// terminus is in `terminii` are scored. A candidate is in tolerance when
/// `|tm - target| / target < tolerance`; the closest wins and ties keep the
/// shorter one. The scan stops at the first scored candidate that drops out of
/// tolerance after one was found.
///
/// # Examples
/// ```
/// use geneorator::melt::{seq_by_melt_temp, Reagents};
/// use geneorator::oligo::Direction;
/// let post = "GCGTAAGCTTCCATGGCTCGAGGCCGTCGACC";
/// let (sub, tm) = seq_by_melt_temp(post, 60.0, Direction::Forward, b"CG", 0.075, &Reagents::default()).unwrap();
/// assert!(post.starts_with(&sub));
/// assert!((tm - 60.0).abs() / 60.0 < 0.075);
/// ```
pub fn seq_by_melt_temp(
    seq: &str,
    target: f64,
    direction: Direction,
    terminii: &[u8],
    tolerance: f64,
    reagents: &Reagents,
) -> Result<(String, f64)> {
    require_ascii(seq)?;
    let terminii: Vec<u8> = terminii.iter().map(u8::to_ascii_uppercase).collect();
    let n = seq.len();
    let mut best: Option<(f64, &str, f64)> = None;

    for len in 4..=n {
        let (sub, terminus) = if direction.is_forward() {
            (&seq[..len], seq.as_bytes()[len - 1])
        } else {
            (&seq[n - len..], seq.as_bytes()[n - len])
        };
        if !terminii.contains(&terminus.to_ascii_uppercase()) {
            continue;
        }
        let tm = melting_temperature(sub, reagents)?;
        let delta = (tm - target).abs();
        if delta / target < tolerance {
            if best.map_or(true, |(d, _, _)| delta < d) {
                best = Some((delta, sub, tm));
            }
        } else if best.is_some() {
            break;
        }
    }

    best.map(|(_, sub, tm)| (sub.to_string(), tm))
        .ok_or(GenieError::MeltTempNotFound { target })
}
