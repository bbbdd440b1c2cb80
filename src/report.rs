//! Text report for the command-line front end.
//!
//! Results are computed up front by [`Report::build`], so a failing
//! operation is reported before any line is written. Sections are written in
//! a fixed order, separated by blank lines:
//!
//! ```text
//! GC Content: 50.00%
//!
//! K-mer Counts:
//! AT: 1
//! CG: 2
//!
//! Pattern 'cg' found at positions: [2, 4]
//!
//! RNA Sequence: AUCGCGUA
//!
//! Reverse Complement: TACGCGAT
//! ```

use std::io::{self, Write};

use crate::analyzer::{AnalysisResult, SequenceAnalyzer};

/// Which analyses to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Report GC content
    pub gc: bool,
    /// Report k-mer counts for this k (negative values are invalid)
    pub kmer: Option<i64>,
    /// Report offsets of this pattern
    pub pattern: Option<String>,
    /// Report the RNA transcript
    pub transcribe: bool,
    /// Report the reverse complement
    pub reverse_complement: bool,
}

/// One computed section of the report.
#[derive(Debug, Clone, PartialEq)]
enum Section {
    Gc(f64),
    Kmers(Vec<(String, usize)>),
    Pattern { pattern: String, positions: Vec<usize> },
    Rna(String),
    ReverseComplement(String),
}

/// Fully computed results, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    sections: Vec<Section>,
}

impl Report {
    /// Runs every requested analysis, failing on the first error.
    pub fn build(analyzer: &SequenceAnalyzer, request: &Request) -> AnalysisResult<Self> {
        let mut sections = Vec::new();

        if request.gc {
            sections.push(Section::Gc(analyzer.gc_content()));
        }

        if let Some(k) = request.kmer {
            let mut kmers: Vec<(String, usize)> = analyzer.count_kmers(k)?.into_iter().collect();
            kmers.sort_unstable();
            sections.push(Section::Kmers(kmers));
        }

        if let Some(pattern) = &request.pattern {
            let positions = analyzer.find_patterns(pattern)?;
            sections.push(Section::Pattern {
                pattern: pattern.clone(),
                positions,
            });
        }

        if request.transcribe {
            sections.push(Section::Rna(analyzer.transcribe()));
        }

        if request.reverse_complement {
            sections.push(Section::ReverseComplement(analyzer.reverse_complement()));
        }

        Ok(Self { sections })
    }

    /// Returns true if no analysis was requested.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Writes the report to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            match section {
                Section::Gc(gc) => writeln!(out, "GC Content: {:.2}%", gc)?,
                Section::Kmers(kmers) => {
                    writeln!(out, "K-mer Counts:")?;
                    for (kmer, count) in kmers {
                        writeln!(out, "{}: {}", kmer, count)?;
                    }
                }
                Section::Pattern { pattern, positions } => writeln!(
                    out,
                    "Pattern '{}' found at positions: {:?}",
                    pattern, positions
                )?,
                Section::Rna(rna) => writeln!(out, "RNA Sequence: {}", rna)?,
                Section::ReverseComplement(rc) => writeln!(out, "Reverse Complement: {}", rc)?,
            }
        }
        Ok(())
    }
}
