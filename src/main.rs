use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bio::io::fasta;
use clap::{Args, Parser, Subcommand};

use hsspal::alphabet;
use hsspal::hssp::sequence::HsspRow;
use hsspal::hssp::{create_hssp, ReportMeta};
use hsspal::msa::{align_msa, Entry};
use hsspal::options::Options;

#[derive(Parser)]
#[command(name = "hsspal")]
#[command(version = "0.1.0")]
#[command(about = "Progressive multiple sequence alignment and HSSP profile generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Progressively align the sequences of a FastA file
    Align(AlignArgs),

    /// Build an HSSP report from an aligned FastA file (first record is the query)
    Hssp(HsspArgs),
}

#[derive(Args, Debug)]
struct AlignArgs {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Substitution matrix family (BLOSUM, PAM or GONNET)
    #[arg(short, long, default_value = "BLOSUM")]
    matrix: String,
    #[arg(long, default_value_t = 10.0)]
    gap_open: f32,
    #[arg(long, default_value_t = 0.2)]
    gap_extend: f32,
    #[arg(long, default_value_t = 0.1)]
    magic: f32,
    /// Do not anchor columns on fixed positions
    #[arg(long)]
    ignore_positions: bool,
    /// Use a single worker thread
    #[arg(short = 'T', long)]
    no_threads: bool,
}

#[derive(Args, Debug)]
struct HsspArgs {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Offset added to the homology threshold curve
    #[arg(short, long, default_value_t = 0.05)]
    threshold: f32,
    /// Keep at most this many hits (0 keeps all)
    #[arg(long, default_value_t = 1500)]
    max_hits: u32,
    /// Minimum query length
    #[arg(long, default_value_t = 25)]
    min_length: u32,
    #[arg(long, default_value = "UNKNOWN")]
    pdbid: String,
    #[arg(long, default_value = "UniProtKB")]
    seqbase: String,
    #[arg(long, default_value = "latest")]
    seqbase_version: String,
    /// Use a single worker thread
    #[arg(short = 'T', long)]
    no_threads: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Align(args) => run_align(args),
        Commands::Hssp(args) => run_hssp(args),
    }
}

fn build_pool(no_threads: bool) -> Result<()> {
    let num_threads = if no_threads { 1 } else { num_cpus::get() };
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .context("Failed to build thread pool")
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Failed to create {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn run_align(args: AlignArgs) -> Result<()> {
    build_pool(args.no_threads)?;

    let reader = fasta::Reader::from_file(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let mut entries = Vec::new();
    for (nr, record) in reader.records().enumerate() {
        let record = record.context("Malformed FastA record")?;
        let text = std::str::from_utf8(record.seq()).context("Non-ASCII sequence data")?;
        let mut entry = Entry::from_text(nr as u32, record.id(), text)?;
        entry.description = record.desc().map(str::to_string);
        entries.push(entry);
    }

    let opts = Options {
        ignore_positions: args.ignore_positions,
        multi_threaded: !args.no_threads,
        matrix_name: args.matrix,
        gap_open: args.gap_open,
        gap_extend: args.gap_extend,
        magic: args.magic,
        ..Options::default()
    };

    let msa = align_msa(entries, &opts)?;

    let out = open_output(args.out.as_ref())?;
    let mut writer = fasta::Writer::new(out);
    for row in &msa {
        writer.write(&row.id, row.description.as_deref(), row.decoded().as_bytes())?;
    }
    Ok(())
}

fn run_hssp(args: HsspArgs) -> Result<()> {
    build_pool(args.no_threads)?;

    let reader = fasta::Reader::from_file(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let mut msa: Vec<HsspRow> = Vec::new();
    for record in reader.records() {
        let record = record.context("Malformed FastA record")?;
        let text = std::str::from_utf8(record.seq()).context("Non-ASCII sequence data")?;
        let mut row = HsspRow::new(record.id(), record.desc().unwrap_or(""));
        row.append(text);
        msa.push(row);
    }

    let query_residues = msa
        .first()
        .map(|q| {
            q.as_bytes()
                .iter()
                .filter(|&&c| !alphabet::is_gap_char(c))
                .count() as u32
        })
        .unwrap_or(0);
    if query_residues < args.min_length {
        bail!(
            "query holds {query_residues} residues, below the minimum of {}",
            args.min_length
        );
    }

    let opts = Options {
        threshold: args.threshold,
        max_hits: args.max_hits,
        min_seq_length: args.min_length,
        multi_threaded: !args.no_threads,
        ..Options::default()
    };

    let meta = ReportMeta {
        pdbid: args.pdbid,
        description: String::new(),
        seqbase_name: args.seqbase,
        seqbase_version: args.seqbase_version,
    };

    let mut out = open_output(args.out.as_ref())?;
    create_hssp(msa, &meta, &opts, &mut out)?;
    Ok(())
}
