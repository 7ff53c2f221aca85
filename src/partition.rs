//! Set partitioning: walk the template in windows of `set_len` codons.
//!
//! Each window gets one upstream and one downstream flank fit, shared by all
//! of its members. Windows are emitted in order, members in codon order, and a
//! window with no whole codon left never produces a set.
use chrono::NaiveDate;

use crate::codons::CodonTable;
use crate::error::{require_ascii, GenieError, Result};
use crate::flank::{downstream_flank, upstream_flank, FitParams};
use crate::member::{build_member, partial_codon};
use crate::oligo::{oligo_id, OligoRecord, OligoSet, SetSpan};

/// Window width in nucleotides for `set_len` codons.
///
/// Fails with [`GenieError::InvalidSetLength`] when `set_len` is 0 or a window
/// starting inside the template could not be addressed past `template_end`.
pub fn window_len(set_len: usize, template_end: usize) -> Result<usize> {
    set_len
        .checked_mul(3)
        .filter(|&w| w > 0 && template_end.checked_add(w).is_some())
        .ok_or(GenieError::InvalidSetLength(set_len))
}

/// Number of windows needed to cover `template_len` nucleotides.
pub fn window_count(template_len: usize, set_len: usize) -> usize {
    template_len.div_ceil(set_len.saturating_mul(3))
}

/// Spans of every window over the template at `offset..template_end`.
pub fn set_spans(offset: usize, template_end: usize, set_len: usize) -> Vec<SetSpan> {
    (0..window_count(template_end - offset, set_len))
        .map(|set_idx| SetSpan::new(offset, template_end, set_idx, set_len))
        .collect()
}

/// Partition `full` into sets and build every member oligo.
///
/// `offset..template_end` is the template inside `full`. A template whose length
/// is not a multiple of 3 fails with [`GenieError::PartialCodon`]; non-ASCII
/// text anywhere in `full` fails with [`GenieError::InvalidBase`].
pub fn partition_sets(
    full: &str,
    offset: usize,
    template_end: usize,
    set_len: usize,
    params: &FitParams,
    table: &CodonTable,
    date: NaiveDate,
) -> Result<Vec<OligoSet>> {
    window_len(set_len, template_end)?;
    require_ascii(full)?;
    let spans = set_spans(offset, template_end, set_len);
    let mut sets = Vec::with_capacity(spans.len());

    for span in spans {
        if let Some(pos) = span.trailing_fragment() {
            return Err(partial_codon(full, pos, &span));
        }
        let count = span.member_count(set_len);
        if count == 0 {
            continue;
        }

        let pre = upstream_flank(full, span.start, params)?;
        let post = downstream_flank(full, span.end, params)?;
        let (pre_tm, post_tm) = (pre.flank().melt_temp, post.flank().melt_temp);

        let mut members = Vec::with_capacity(count);
        for member_idx in 0..count {
            let m = build_member(full, &span, member_idx, pre.flank(), post.flank(), table)?;
            let id = oligo_id(date, m.set_number, m.set_member);
            members.push(m.into_record(pre_tm, post_tm, id));
        }
        sets.push(OligoSet { span, pre, post, members });
    }
    Ok(sets)
}

/// [`partition_sets`] flattened to records in (set, member) order.
pub fn partition(
    full: &str,
    offset: usize,
    template_end: usize,
    set_len: usize,
    params: &FitParams,
    table: &CodonTable,
    date: NaiveDate,
) -> Result<Vec<OligoRecord>> {
    let sets = partition_sets(full, offset, template_end, set_len, params, table, date)?;
    Ok(sets.into_iter().flat_map(|s| s.members).collect())
}
