//! Core types for **flanks**, **sets** and **oligo records**.
//!
//! This module holds the data model shared by the partitioner, the member
//! generator and the table writer. Coordinates are 0-based nucleotide offsets
//! into the *full sequence* (`pre + template + post`) unless stated otherwise;
//! set and member numbers exposed to users are 1-based.
use core::fmt;

/// Sequences attached upstream (`pre`) and downstream (`post`) of the template.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FlankPair {
    /// Upstream flank; its length is the template offset in the full sequence.
    pub pre: String,
    /// Downstream flank.
    pub post: String,
}

impl FlankPair {
    /// Pair `pre` and `post` as given; no case folding.
    pub fn new(pre: impl Into<String>, post: impl Into<String>) -> Self {
        Self { pre: pre.into(), post: post.into() }
    }
}

/// Direction of a melting-temperature search.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Grow from the 5' end (downstream flanks); the 3' base is the terminus.
    Forward,
    /// Grow from the 3' end (upstream flanks); the 5' base is the terminus.
    Backward,
}

impl Direction {
    /// `true` for [`Direction::Forward`].
    pub fn is_forward(self) -> bool { matches!(self, Direction::Forward) }
}

/// A flank sequence and its melting temperature (`NaN` when the flank is empty).
#[derive(Clone, Debug, PartialEq)]
pub struct FittedFlank {
    /// Flank bases, possibly empty.
    pub sequence: String,
    /// Tm of `sequence` in °C.
    pub melt_temp: f64,
}

impl FittedFlank {
    /// The empty flank: no sequence and a `NaN` melting temperature.
    pub fn empty() -> Self { Self { sequence: String::new(), melt_temp: f64::NAN } }
}

/// Result of fitting one flank.
#[derive(Clone, Debug, PartialEq)]
pub enum FitOutcome {
    /// The search met the tolerance and terminal-base constraints.
    Fitted(FittedFlank),
    /// The search failed; the untrimmed candidate and its raw Tm are used.
    Fallback(FittedFlank),
}

impl FitOutcome {
    /// The flank used for the set, fitted or not.
    pub fn flank(&self) -> &FittedFlank {
        match self {
            FitOutcome::Fitted(f) | FitOutcome::Fallback(f) => f,
        }
    }

    /// Whether the search succeeded.
    pub fn is_fitted(&self) -> bool { matches!(self, FitOutcome::Fitted(_)) }

    /// `"fitted"` or `"fallback"`, for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            FitOutcome::Fitted(_) => "fitted",
            FitOutcome::Fallback(_) => "fallback",
        }
    }
}

/// Span of one set inside the full sequence.
///
/// `end` is the nominal window end (`start + 3 * set_len`) and may run past the
/// template; [`SetSpan::template_end`] clips it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SetSpan {
    /// 0-based set index.
    pub index: usize,
    /// Start of the template within the full sequence.
    pub offset: usize,
    /// First nucleotide of the window.
    pub start: usize,
    /// Nominal window end (exclusive).
    pub end: usize,
    /// End of the template within the full sequence.
    pub template_end: usize,
}

impl SetSpan {
    /// Window `set_idx` of `set_len` codons starting at `offset`.
    ///
    /// Coordinates saturate at `usize::MAX`; callers reject window sizes that
    /// cannot be addressed (see [`crate::partition::window_len`]).
    pub fn new(offset: usize, template_end: usize, set_idx: usize, set_len: usize) -> Self {
        let width = set_len.saturating_mul(3);
        let start = offset.saturating_add(set_idx.saturating_mul(width));
        Self { index: set_idx, offset, start, end: start.saturating_add(width), template_end }
    }

    /// Number of whole codons between `start` and the template end.
    pub fn codons_remaining(&self) -> usize {
        self.template_end.saturating_sub(self.start) / 3
    }

    /// Members in this set: the window size capped by the codons left.
    pub fn member_count(&self, set_len: usize) -> usize {
        set_len.min(self.codons_remaining())
    }

    /// Window end clipped to the template.
    pub fn clipped_end(&self) -> usize { self.end.min(self.template_end) }

    /// Nucleotide offset of codon `member_idx` (0-based).
    pub fn codon_pos(&self, member_idx: usize) -> usize { self.start + 3 * member_idx }

    /// Start of a partial codon at the template end, if it falls inside this window.
    pub fn trailing_fragment(&self) -> Option<usize> {
        let leftover = self.template_end.saturating_sub(self.start) % 3;
        (leftover > 0 && self.end >= self.template_end).then(|| self.template_end - leftover)
    }
}

/// One output row: a degenerate-codon variant of one template codon.
#[derive(Clone, Debug, PartialEq)]
pub struct OligoRecord {
    /// 1-based set number.
    pub set_number: usize,
    /// 1-based position of the mutated codon within its set.
    pub set_member: usize,
    /// Assembled oligo: fitted pre + set prefix + degenerate codon + set suffix + fitted post.
    pub sequence: String,
    /// Upstream (5') flank melting temperature.
    pub pre_melt_temp: f64,
    /// Downstream (3') flank melting temperature.
    pub post_melt_temp: f64,
    /// `YYYY-MM-DD_<set>.<member>`.
    pub id: String,
    /// Template codon that was replaced.
    pub template_codon: String,
    /// Amino acid encoded by `template_codon`.
    pub amino_acid: char,
    /// Codon written in its place.
    pub degenerate_codon: String,
    /// Offset of `degenerate_codon` within `sequence`.
    pub mutation_offset: usize,
}

impl OligoRecord {
    /// Oligo length in nucleotides.
    pub fn len(&self) -> usize { self.sequence.len() }

    pub fn is_empty(&self) -> bool { self.sequence.is_empty() }

    /// The substituted codon as it appears inside [`OligoRecord::sequence`].
    pub fn mutated_codon(&self) -> &str {
        let end = self.mutation_offset + self.degenerate_codon.len();
        self.sequence.get(self.mutation_offset..end).unwrap_or("")
    }
}

impl fmt::Display for OligoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}->{} {}", self.id, self.amino_acid, self.set_member, self.degenerate_codon, self.sequence)
    }
}

/// All members of one set together with the flank fits they share.
#[derive(Clone, Debug, PartialEq)]
pub struct OligoSet {
    pub span: SetSpan,
    /// Upstream fit.
    pub pre: FitOutcome,
    /// Downstream fit.
    pub post: FitOutcome,
    /// Records in member order.
    pub members: Vec<OligoRecord>,
}

/// Identifier for a record: `date_set.member`, both numbers 1-based.
pub fn oligo_id(date: chrono::NaiveDate, set_number: usize, set_member: usize) -> String {
    format!("{}_{}.{}", date.format("%Y-%m-%d"), set_number, set_member)
}

#[cfg(test)]
mod span_tests {
    use super::*;

    #[test]
    fn last_window_is_capped_to_remaining_codons() {
        // 7 codons, 3 per set: windows hold 3, 3, 1.
        let counts: Vec<usize> = (0..3).map(|i| SetSpan::new(5, 5 + 21, i, 3).member_count(3)).collect();
        assert_eq!(counts, vec![3, 3, 1]);
        let last = SetSpan::new(5, 26, 2, 3);
        assert_eq!(last.start, 23);
        assert_eq!(last.end, 32);
        assert_eq!(last.clipped_end(), 26);
    }

    #[test]
    fn partial_codon_is_reported_only_by_the_last_window() {
        // 10-nt template behind a 33-nt flank.
        assert_eq!(SetSpan::new(33, 43, 0, 3).trailing_fragment(), None);
        assert_eq!(SetSpan::new(33, 43, 1, 3).trailing_fragment(), Some(42));
        assert_eq!(SetSpan::new(0, 9, 2, 1).trailing_fragment(), None);
    }

    #[test]
    fn huge_window_saturates_instead_of_wrapping() {
        let span = SetSpan::new(0, 6, 1, usize::MAX / 2);
        assert_eq!((span.start, span.end), (usize::MAX, usize::MAX));
        assert_eq!(span.codons_remaining(), 0);
    }

    #[test]
    fn record_display_names_id_mutation_and_sequence() {
        let rec = OligoRecord {
            set_number: 1,
            set_member: 2,
            sequence: "ATGNNKAGC".into(),
            pre_melt_temp: f64::NAN,
            post_melt_temp: f64::NAN,
            id: "2017-05-01_1.2".into(),
            template_codon: "GCT".into(),
            amino_acid: 'A',
            degenerate_codon: "NNK".into(),
            mutation_offset: 3,
        };
        assert_eq!(rec.to_string(), "2017-05-01_1.2 A2->NNK ATGNNKAGC");
        assert_eq!(rec.mutated_codon(), "NNK");
    }

    #[test]
    fn id_uses_iso_date() {
        let d = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(oligo_id(d, 2, 11), "2024-03-09_2.11");
    }
}
