//! Error type shared by the oligo design pipeline.
//!
//! Only [`GenieError::MeltTempNotFound`] is recovered inside the crate (the flank
//! fitter falls back to the untrimmed candidate). Every other variant reaches the
//! caller unchanged.
use thiserror::Error;

/// Errors raised while designing oligos.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenieError {
    /// The amino acid encoded at a template position has no degenerate codon.
    #[error("No degenerate codon configured for amino acid '{amino_acid}' (codon {codon} at position {position})")]
    MissingCodon {
        amino_acid: char,
        codon: String,
        position: usize,
    },
    /// The template ends in a fragment shorter than one codon.
    #[error("Partial codon '{fragment}' at position {position}: template length is not a multiple of 3")]
    PartialCodon { position: usize, fragment: String },
    /// A melting temperature was requested for a sequence outside A/C/G/T.
    #[error("Invalid base '{base}' in sequence {sequence}")]
    InvalidBase { sequence: String, base: char },
    /// No sub-sequence met the melting-temperature tolerance.
    #[error("Unable to get sequence of melting temperature: {target}")]
    MeltTempNotFound { target: f64 },
    /// Sets must hold at least one codon, and a window of that many codons must
    /// be addressable past the template end.
    #[error("Invalid set length: {0} (must be >= 1 and the window must fit in the sequence)")]
    InvalidSetLength(usize),
    /// Target melting temperature must be a finite number.
    #[error("Invalid melting temperature: {0}")]
    InvalidMeltTemp(f64),
    /// Malformed `AA=CODON` override text.
    #[error("Invalid codon override: {0}")]
    InvalidOverride(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GenieError>;

/// Reject `seq` if it holds anything but ASCII, reporting the first offending character.
///
/// Sequence coordinates are byte offsets, so this is checked once before any slicing.
pub fn require_ascii(seq: &str) -> Result<()> {
    match seq.chars().find(|c| !c.is_ascii()) {
        Some(base) => Err(GenieError::InvalidBase { sequence: seq.to_string(), base }),
        None => Ok(()),
    }
}
