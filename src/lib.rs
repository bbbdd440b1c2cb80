//! # seqanalysis - DNA sequence analysis
//!
//! Small analyses over a single DNA sequence given on the command line.
//!
//! ## Architecture
//!
//! - `analyzer`: the validated sequence and its query operations
//!   (GC content, k-mers, pattern search, transcription, reverse complement)
//! - `report`: runs the requested analyses and formats the text output
//!
//! ## Example
//!
//! ```
//! use seqanalysis::analyzer::SequenceAnalyzer;
//!
//! let seq = SequenceAnalyzer::new("ATCGATCGATCG").unwrap();
//! assert_eq!(seq.find_patterns("cg").unwrap(), vec![2, 6, 10]);
//! assert_eq!(seq.reverse_complement(), "CGATCGATCGAT");
//! ```

pub mod analyzer;
pub mod report;

pub use analyzer::{AnalysisError, AnalysisResult, ErrorKind, SequenceAnalyzer};
