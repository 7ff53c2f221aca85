use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use geneorator::codons::{load_overrides, parse_override, unknown_override_keys};
use geneorator::melt::{melting_temperature, seq_by_melt_temp, Reagents};
use geneorator::oligo::Direction;
use geneorator::seqio::{normalize_seq, read_template};
use geneorator::table::{write_table, TableFormat};
use geneorator::{design_sets, fallback_count, DesignOpts, FlankPair};

/// Geneorator CLI
#[derive(Parser)]
#[command(name = "geneorator")]
#[command(version)]
#[command(about = "Saturation-mutagenesis oligo design", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design degenerate-codon oligos for a template
    Design {
        /// Template coding sequence (omit when using --fasta)
        template: Option<String>,
        /// Read the template from the first record of a FASTA/FASTQ file
        #[arg(long)]
        fasta: Option<PathBuf>,
        /// Upstream flank sequence
        #[arg(long, default_value = "")]
        pre: String,
        /// Downstream flank sequence
        #[arg(long, default_value = "")]
        post: String,
        /// Codons per set
        #[arg(long, default_value_t = 1)]
        set_len: usize,
        /// Target flank melting temperature (°C)
        #[arg(long, default_value_t = 60.0)]
        melt_temp: f64,
        /// Tm tolerance as a fraction of the target
        #[arg(long, default_value_t = 0.075)]
        tolerance: f64,
        /// Degenerate codon override, e.g. S=AGC (repeatable)
        #[arg(long = "codon")]
        codon: Vec<String>,
        /// CSV/TSV file of amino_acid,codon overrides
        #[arg(long)]
        codons: Option<PathBuf>,
        /// Output format (tsv, csv, table)
        #[arg(long, default_value = "tsv")]
        format: String,
        /// Date stamped into ids (YYYY-MM-DD; default today)
        #[arg(long)]
        date: Option<String>,
        /// Report parameters and flank fits on stderr
        #[arg(long)]
        verbose: bool,
    },

    /// Print the effective amino acid -> degenerate codon table
    Codons {
        /// Degenerate codon override, e.g. S=AGC (repeatable)
        #[arg(long = "codon")]
        codon: Vec<String>,
        /// CSV/TSV file of amino_acid,codon overrides
        #[arg(long)]
        codons: Option<PathBuf>,
    },

    /// Melting temperature of a sequence, optionally fitted to a target
    Tm {
        /// Nucleotide sequence
        sequence: String,
        /// Fit a sub-sequence to this Tm (°C)
        #[arg(long)]
        target: Option<f64>,
        /// Grow the fit from the 3' end instead of the 5' end
        #[arg(long)]
        backward: bool,
        /// Allowed terminal bases of the fit
        #[arg(long, default_value = "CG")]
        terminii: String,
        /// Tm tolerance as a fraction of the target
        #[arg(long, default_value_t = 0.075)]
        tolerance: f64,
    },
}

fn collect_overrides(codon: &[String], codons: Option<&PathBuf>) -> anyhow::Result<BTreeMap<char, String>> {
    let mut map = match codons {
        Some(p) => load_overrides(p).with_context(|| format!("reading codon overrides from {}", p.display()))?,
        None => BTreeMap::new(),
    };
    for text in codon {
        let (aa, c) = parse_override(text)?;
        map.insert(aa, c);
    }
    for aa in unknown_override_keys(&map) {
        eprintln!("warning: override for '{}' is not a known amino-acid code", aa);
    }
    Ok(map)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Design { template, fasta, pre, post, set_len, melt_temp, tolerance, codon, codons, format, date, verbose } => {
            let template = match (template, fasta) {
                (Some(t), None) => normalize_seq(&t),
                (None, Some(path)) => {
                    let rec = read_template(&path)?;
                    if rec.skipped > 0 {
                        eprintln!("warning: {} extra record(s) in {} ignored; using {}", rec.skipped, path.display(), rec.id);
                    }
                    rec.seq
                }
                (Some(_), Some(_)) => bail!("Give either a template sequence or --fasta, not both."),
                (None, None) => bail!("No template: pass a sequence or --fasta <file>."),
            };
            let format = format.parse::<TableFormat>().map_err(anyhow::Error::msg)?;
            let run_date = match date {
                Some(d) => Some(NaiveDate::parse_from_str(&d, "%Y-%m-%d").with_context(|| format!("invalid --date {}", d))?),
                None => None,
            };
            let opts = DesignOpts {
                set_len,
                melt_temp,
                tolerance,
                reagents: Reagents::default(),
                codons: collect_overrides(&codon, codons.as_ref())?,
                run_date,
            };
            let flanks = FlankPair::new(normalize_seq(&pre), normalize_seq(&post));

            if verbose {
                eprintln!(
                    "design: template={} nt | pre={} nt | post={} nt | set_len={} | melt_temp={} | tolerance={} | date={}",
                    template.len(), flanks.pre.len(), flanks.post.len(), opts.set_len, opts.melt_temp, opts.tolerance, opts.date()
                );
            }

            let sets = design_sets(&template, &flanks, &opts)?;
            if verbose {
                for s in &sets {
                    eprintln!(
                        "set {}: {} member(s) | 5' {} {:.2} | 3' {} {:.2}",
                        s.span.index + 1, s.members.len(),
                        s.pre.label(), s.pre.flank().melt_temp,
                        s.post.label(), s.post.flank().melt_temp
                    );
                    for rec in &s.members {
                        eprintln!("  {}", rec);
                    }
                }
                eprintln!("design: {} set(s), {} flank fit(s) fell back to the raw sequence", sets.len(), fallback_count(&sets));
            }

            let records: Vec<_> = sets.into_iter().flat_map(|s| s.members).collect();
            let stdout = std::io::stdout();
            write_table(&records, stdout.lock(), format)?;
        }

        Commands::Codons { codon, codons } => {
            let overrides = collect_overrides(&codon, codons.as_ref())?;
            for (aa, c) in geneorator::codon_rows(&overrides) {
                println!("{aa}\t{c}");
            }
        }

        Commands::Tm { sequence, target, backward, terminii, tolerance } => {
            let seq = normalize_seq(&sequence);
            let reagents = Reagents::default();
            println!("{}\t{:.2}", seq, melting_temperature(&seq, &reagents)?);
            if let Some(t) = target {
                let direction = if backward { Direction::Backward } else { Direction::Forward };
                let (sub, tm) = seq_by_melt_temp(&seq, t, direction, terminii.as_bytes(), tolerance, &reagents)?;
                println!("{}\t{:.2}", sub, tm);
            }
        }
    }

    Ok(())
}
