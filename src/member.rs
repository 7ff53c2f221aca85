//! Member generation: one degenerate-codon oligo per codon position of a set.
use crate::codons::CodonTable;
use crate::data::genetic_code::translate;
use crate::error::{require_ascii, GenieError, Result};
use crate::oligo::{FittedFlank, OligoRecord, SetSpan};

/// An assembled oligo before the set-level Tm values and id are attached.
///
/// Fields mean the same as on [`OligoRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub set_number: usize,
    pub set_member: usize,
    pub sequence: String,
    pub template_codon: String,
    pub amino_acid: char,
    pub degenerate_codon: String,
    pub mutation_offset: usize,
}

impl Member {
    pub fn len(&self) -> usize { self.sequence.len() }

    pub fn is_empty(&self) -> bool { self.sequence.is_empty() }

    /// Attach the set's flank Tm values and the record id.
    pub fn into_record(self, pre_melt_temp: f64, post_melt_temp: f64, id: String) -> OligoRecord {
        OligoRecord {
            set_number: self.set_number,
            set_member: self.set_member,
            sequence: self.sequence,
            pre_melt_temp,
            post_melt_temp,
            id,
            template_codon: self.template_codon,
            amino_acid: self.amino_acid,
            degenerate_codon: self.degenerate_codon,
            mutation_offset: self.mutation_offset,
        }
    }
}

/// Error for a codon at `pos` that runs past the template end.
pub fn partial_codon(full: &str, pos: usize, span: &SetSpan) -> GenieError {
    let end = span.template_end.min(full.len());
    GenieError::PartialCodon {
        position: pos.saturating_sub(span.offset),
        fragment: full.get(pos..end).unwrap_or("").to_string(),
    }
}

/// The whole codon at `pos`, or [`GenieError::PartialCodon`] if the template ends first.
pub fn codon_at<'a>(full: &'a str, pos: usize, span: &SetSpan) -> Result<&'a str> {
    if pos + 3 > span.template_end {
        return Err(partial_codon(full, pos, span));
    }
    full.get(pos..pos + 3).ok_or_else(|| partial_codon(full, pos, span))
}

/// Build member `member_idx` (0-based) of `span`.
///
/// The codon at the member position is translated and replaced by its table
/// entry; the rest of the window is copied unchanged between the two flanks.
/// Non-ASCII text in `full` or in the table entry is [`GenieError::InvalidBase`].
pub fn build_member(
    full: &str,
    span: &SetSpan,
    member_idx: usize,
    pre: &FittedFlank,
    post: &FittedFlank,
    table: &CodonTable,
) -> Result<Member> {
    require_ascii(full)?;
    let pos = span.codon_pos(member_idx);
    let codon = codon_at(full, pos, span)?;
    let amino_acid = translate(codon);
    let degenerate = table.lookup(amino_acid, codon, pos - span.offset)?;
    require_ascii(degenerate)?;
    let end = span.end.min(full.len()).max(pos + 3);

    let mut sequence = String::with_capacity(pre.sequence.len() + (end - span.start) + post.sequence.len());
    sequence.push_str(&pre.sequence);
    sequence.push_str(&full[span.start..pos]);
    let mutation_offset = sequence.len();
    sequence.push_str(degenerate);
    sequence.push_str(&full[pos + 3..end]);
    sequence.push_str(&post.sequence);

    Ok(Member {
        set_number: span.index + 1,
        set_member: member_idx + 1,
        sequence,
        template_codon: codon.to_string(),
        amino_acid,
        degenerate_codon: degenerate.to_string(),
        mutation_offset,
    })
}
