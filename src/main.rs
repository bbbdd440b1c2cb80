//! seqanalysis - DNA sequence analysis tools
//!
//! ## Usage
//!
//! ```bash
//! seqanalysis ATCGCGTA --gc
//! seqanalysis ATCGCGTA --kmer 2 --pattern cg
//! seqanalysis ATCGCGTA --transcribe --reverse-complement -o out.txt
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use seqanalysis::report::{Report, Request};
use seqanalysis::SequenceAnalyzer;

/// DNA Sequence Analysis Tools
#[derive(Parser, Debug)]
#[command(author, version, about = "DNA Sequence Analysis Tools", long_about = None)]
struct Args {
    /// DNA sequence (A, C, G, T; case-insensitive)
    sequence: String,

    /// Calculate GC content
    #[arg(long)]
    gc: bool,

    /// Count k-mers (specify k)
    #[arg(long, value_name = "K", allow_negative_numbers = true, value_parser = parse_kmer)]
    kmer: Option<i64>,

    /// Find pattern occurrences
    #[arg(long)]
    pattern: Option<String>,

    /// Transcribe to RNA
    #[arg(long)]
    transcribe: bool,

    /// Generate reverse complement
    #[arg(long = "reverse-complement")]
    reverse_complement: bool,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// The log level to use, one of Off, Error, Warn, Info, Debug, Trace
    #[arg(long, default_value = "Warn")]
    log_level: LevelFilter,
}

impl Args {
    fn request(&self) -> Request {
        Request {
            gc: self.gc,
            kmer: self.kmer,
            pattern: self.pattern.clone(),
            transcribe: self.transcribe,
            reverse_complement: self.reverse_complement,
        }
    }
}

/// Parses the `--kmer` value.
///
/// Integers outside the `i64` range are clamped so they fail the analyzer's
/// range check like any other out-of-range k.
fn parse_kmer(value: &str) -> Result<i64, String> {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{}' is not an integer", value));
    }

    Ok(value.parse::<i64>().unwrap_or(if value.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

fn initialise_logging(level_filter: LevelFilter) {
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(
        level_filter,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Validates the sequence, computes the report and writes it out.
fn run(args: &Args) -> Result<()> {
    let analyzer = SequenceAnalyzer::new(&args.sequence)?;
    debug!("Loaded sequence of length {}", analyzer.len());

    let request = args.request();
    debug!("Requested analyses: {:?}", request);

    let report = Report::build(&analyzer, &request)?;
    if report.is_empty() {
        info!("No analysis requested");
    }

    if args.output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        report.write_to(&mut handle)?;
        handle.flush()?;
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create output file {}", args.output))?;
        let mut writer = BufWriter::new(file);
        report.write_to(&mut writer)?;
        writer.flush()?;
        info!("Wrote report to {}", args.output);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    initialise_logging(args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
