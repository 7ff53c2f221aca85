//! Tabular rendering of oligo records (TSV / CSV / pretty table) via `polars`.
//!
//! Columns: `Residue` (1-based running row index), `Set number`, `Set member`,
//! `Sequence`, `Length`, `5' Tm`, `3' Tm`, `id`. A `NaN` Tm (empty flank) is
//! written as `nan`.
use std::io::Write;

use polars::prelude::*;

use crate::oligo::OligoRecord;

/// Column headers, in output order.
pub const HEADER: [&str; 8] = ["Residue", "Set number", "Set member", "Sequence", "Length", "5' Tm", "3' Tm", "id"];

/// Output layout for the oligo table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TableFormat {
    #[default]
    Tsv,
    Csv,
    Table,
}

impl std::str::FromStr for TableFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" | "tab" => Ok(Self::Tsv),
            "csv" => Ok(Self::Csv),
            "table" | "pretty" => Ok(Self::Table),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}

fn tm_cell(tm: f64) -> Option<f64> {
    if tm.is_nan() { None } else { Some(tm) }
}

/// Build the oligo table as a `DataFrame`.
pub fn oligo_frame(records: &[OligoRecord]) -> PolarsResult<DataFrame> {
    df!(
        HEADER[0] => (1..=records.len()).map(|i| i as u64).collect::<Vec<_>>(),
        HEADER[1] => records.iter().map(|r| r.set_number as u64).collect::<Vec<_>>(),
        HEADER[2] => records.iter().map(|r| r.set_member as u64).collect::<Vec<_>>(),
        HEADER[3] => records.iter().map(|r| r.sequence.clone()).collect::<Vec<_>>(),
        HEADER[4] => records.iter().map(|r| r.len() as u64).collect::<Vec<_>>(),
        HEADER[5] => records.iter().map(|r| tm_cell(r.pre_melt_temp)).collect::<Vec<_>>(),
        HEADER[6] => records.iter().map(|r| tm_cell(r.post_melt_temp)).collect::<Vec<_>>(),
        HEADER[7] => records.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
    )
}

/// Write records as delimited text with a header row.
pub fn write_delimited<W: Write>(records: &[OligoRecord], writer: W, separator: u8) -> PolarsResult<()> {
    let mut df = oligo_frame(records)?;
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(separator)
        .with_null_value("nan".to_string())
        .finish(&mut df)
}

/// Write records in `format` to `writer`.
pub fn write_table<W: Write>(records: &[OligoRecord], mut writer: W, format: TableFormat) -> PolarsResult<()> {
    match format {
        TableFormat::Tsv => write_delimited(records, writer, b'\t'),
        TableFormat::Csv => write_delimited(records, writer, b','),
        TableFormat::Table => {
            let df = oligo_frame(records)?;
            // Read by polars' pretty-printer; show every row and untruncated sequences.
            std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
            std::env::set_var("POLARS_FMT_MAX_COLS", "100000");
            std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
            std::env::set_var("POLARS_FMT_STR_LEN", "100000");
            std::env::set_var("POLARS_TABLE_WIDTH", "65535");
            writeln!(writer, "{}", df)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod table_tests {
    use super::*;

    fn record(set: usize, member: usize, pre: f64) -> OligoRecord {
        OligoRecord {
            set_number: set,
            set_member: member,
            sequence: "ATGNNKAGC".into(),
            pre_melt_temp: pre,
            post_melt_temp: f64::NAN,
            id: format!("2017-05-01_{set}.{member}"),
            template_codon: "GCT".into(),
            amino_acid: 'A',
            degenerate_codon: "NNK".into(),
            mutation_offset: 3,
        }
    }

    #[test]
    fn tsv_has_header_and_running_index() {
        let mut buf = Vec::new();
        write_table(&[record(1, 1, f64::NAN), record(2, 1, 58.5)], &mut buf, TableFormat::Tsv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER.join("\t"));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1\t1\t1\tATGNNKAGC\t9\tnan\tnan\t2017-05-01_1.1");
        assert!(lines[2].starts_with("2\t2\t1\tATGNNKAGC\t9\t58.5\tnan\t"));
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("TSV".parse::<TableFormat>(), Ok(TableFormat::Tsv));
        assert_eq!("csv".parse::<TableFormat>(), Ok(TableFormat::Csv));
        assert_eq!("pretty".parse::<TableFormat>(), Ok(TableFormat::Table));
        assert!("xlsx".parse::<TableFormat>().is_err());
    }
}
