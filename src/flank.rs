//! Flank fitting: trim the sequence around a set to a target melting temperature.
//!
//! A failed search is not an error. The candidate is kept untrimmed together
//! with its raw Tm and reported as [`FitOutcome::Fallback`].
use crate::error::{require_ascii, GenieError, Result};
use crate::melt::{melting_temperature, seq_by_melt_temp, Reagents};
use crate::oligo::{Direction, FitOutcome, FittedFlank};

/// Tolerance as a fraction of the target Tm.
pub const DEFAULT_TOLERANCE: f64 = 0.075;

/// Bases a fitted flank may end on (its 5' end upstream, its 3' end downstream).
pub const FLANK_TERMINII: &[u8] = b"CG";

/// Target and search settings shared by every flank of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    /// Target Tm (°C).
    pub melt_temp: f64,
    /// Allowed deviation as a fraction of `melt_temp`.
    pub tolerance: f64,
    /// Buffer used for every Tm.
    pub reagents: Reagents,
}

impl Default for FitParams {
    fn default() -> Self {
        Self { melt_temp: 60.0, tolerance: DEFAULT_TOLERANCE, reagents: Reagents::default() }
    }
}

/// Fit `candidate` to `params.melt_temp`, growing in `direction` and ending on one of `terminii`.
///
/// An empty candidate is returned as-is with a `NaN` Tm. Bases outside A/C/G/T
/// are an error because the raw Tm cannot be computed.
pub fn fit_flank(candidate: &str, params: &FitParams, direction: Direction, terminii: &[u8]) -> Result<FitOutcome> {
    if candidate.is_empty() {
        return Ok(FitOutcome::Fallback(FittedFlank::empty()));
    }
    let raw = melting_temperature(candidate, &params.reagents)?;

    match seq_by_melt_temp(candidate, params.melt_temp, direction, terminii, params.tolerance, &params.reagents) {
        Ok((sequence, melt_temp)) => Ok(FitOutcome::Fitted(FittedFlank { sequence, melt_temp })),
        Err(GenieError::MeltTempNotFound { .. }) => Ok(FitOutcome::Fallback(FittedFlank {
            sequence: candidate.to_string(),
            melt_temp: raw,
        })),
        Err(e) => Err(e),
    }
}

/// Fit everything upstream of `start_pos`; the fitted flank abuts the set.
///
/// `full` must be ASCII, otherwise [`GenieError::InvalidBase`].
pub fn upstream_flank(full: &str, start_pos: usize, params: &FitParams) -> Result<FitOutcome> {
    require_ascii(full)?;
    let candidate = &full[..start_pos.min(full.len())];
    fit_flank(candidate, params, Direction::Backward, FLANK_TERMINII)
}

/// Fit everything downstream of `end_pos`; empty when the window runs past the end.
///
/// `full` must be ASCII, otherwise [`GenieError::InvalidBase`].
pub fn downstream_flank(full: &str, end_pos: usize, params: &FitParams) -> Result<FitOutcome> {
    require_ascii(full)?;
    let candidate = &full[end_pos.min(full.len())..];
    fit_flank(candidate, params, Direction::Forward, FLANK_TERMINII)
}
