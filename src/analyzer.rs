//! DNA sequence analysis.
//!
//! A [`SequenceAnalyzer`] owns one validated, uppercase sequence over the
//! alphabet `{A, C, G, T}` and answers queries about it:
//! - GC content
//! - k-mer counting (overlapping windows)
//! - exact pattern search (overlapping matches)
//! - transcription to RNA (T -> U)
//! - reverse complement
//!
//! Input is case-insensitive and validated once at construction. Nothing
//! mutates the stored sequence afterwards.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Broad category of an [`AnalysisError`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input sequence was rejected at construction.
    Validation,
    /// An operation received an argument it cannot work with.
    InvalidParameter,
}

/// Errors that can occur while building or querying an analyzer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid sequence. Only A, T, C, G allowed (found {found:?} at position {position}).")]
    InvalidSequence { position: usize, found: char },

    #[error("Invalid k value: must be between 1 and the sequence length ({len})")]
    InvalidKmerSize { k: i64, len: usize },

    #[error("Invalid pattern: pattern must not be empty")]
    EmptyPattern,
}

impl AnalysisError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::InvalidSequence { .. } => ErrorKind::Validation,
            AnalysisError::InvalidKmerSize { .. } | AnalysisError::EmptyPattern => {
                ErrorKind::InvalidParameter
            }
        }
    }
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Returns the Watson-Crick complement of a normalized base.
///
/// Anything outside `ACGT` is returned unchanged; a validated sequence never
/// contains such bytes.
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        other => other,
    }
}

/// A validated DNA sequence with read-only analysis operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceAnalyzer {
    sequence: String,
}

impl SequenceAnalyzer {
    /// Creates an analyzer from raw input of any case.
    ///
    /// The input is uppercased, then every character must be one of
    /// `A`, `C`, `G` or `T`. The empty string is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqanalysis::analyzer::SequenceAnalyzer;
    ///
    /// let analyzer = SequenceAnalyzer::new("atcg").unwrap();
    /// assert_eq!(analyzer.sequence(), "ATCG");
    /// assert!(SequenceAnalyzer::new("ATNG").is_err());
    /// ```
    pub fn new(sequence: &str) -> AnalysisResult<Self> {
        let sequence = sequence.to_ascii_uppercase();

        if let Some((position, found)) = sequence
            .chars()
            .enumerate()
            .find(|&(_, c)| !matches!(c, 'A' | 'C' | 'G' | 'T'))
        {
            return Err(AnalysisError::InvalidSequence { position, found });
        }

        Ok(Self { sequence })
    }

    /// Returns the normalized sequence.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Counts each base, in `[A, C, G, T]` order.
    pub fn base_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for base in self.sequence.bytes() {
            let idx = match base {
                b'A' => 0,
                b'C' => 1,
                b'G' => 2,
                b'T' => 3,
                _ => continue,
            };
            counts[idx] += 1;
        }
        counts
    }

    /// Percentage of bases that are G or C, in `0.0..=100.0`.
    ///
    /// The empty sequence has a GC content of exactly `0.0`.
    pub fn gc_content(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let [_, c, g, _] = self.base_counts();
        ((c + g) as f64 / self.len() as f64) * 100.0
    }

    /// Counts every k-length window of the sequence, sliding by one base.
    ///
    /// Only k-mers that occur are present in the map. Fails when `k <= 0` or
    /// `k` is longer than the sequence, so an empty sequence has no valid `k`.
    pub fn count_kmers(&self, k: i64) -> AnalysisResult<HashMap<String, usize>> {
        let k = match usize::try_from(k) {
            Ok(size) if size > 0 && size <= self.len() => size,
            _ => return Err(AnalysisError::InvalidKmerSize { k, len: self.len() }),
        };

        let mut kmers: HashMap<String, usize> = HashMap::new();
        for i in 0..=self.len() - k {
            *kmers.entry(self.sequence[i..i + k].to_string()).or_insert(0) += 1;
        }
        Ok(kmers)
    }

    /// Returns every offset where `pattern` occurs, in ascending order.
    ///
    /// The pattern is matched case-insensitively and matches may overlap.
    /// A pattern longer than the sequence simply yields no offsets; an empty
    /// pattern is rejected.
    pub fn find_patterns(&self, pattern: &str) -> AnalysisResult<Vec<usize>> {
        if pattern.is_empty() {
            return Err(AnalysisError::EmptyPattern);
        }

        let pattern = pattern.to_ascii_uppercase();
        let haystack = self.sequence.as_bytes();
        let needle = pattern.as_bytes();

        Ok(haystack
            .windows(needle.len())
            .enumerate()
            .filter(|(_, window)| *window == needle)
            .map(|(i, _)| i)
            .collect())
    }

    /// Transcribes the sequence to RNA by replacing every `T` with `U`.
    pub fn transcribe(&self) -> String {
        self.sequence.replace('T', "U")
    }

    /// Complements every base (A<->T, C<->G) and reverses the order.
    pub fn reverse_complement(&self) -> String {
        self.sequence
            .bytes()
            .rev()
            .map(|b| complement(b) as char)
            .collect()
    }
}

impl fmt::Display for SequenceAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sequence)
    }
}

impl FromStr for SequenceAnalyzer {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SequenceAnalyzer {
    type Error = AnalysisError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = "ATCGCGTA";
    const GC_RICH: &str = "GCGCGCGC";
    const AT_RICH: &str = "ATATATAT";
    const WITH_PATTERN: &str = "ATCGATCGATCG";

    fn analyzer(seq: &str) -> SequenceAnalyzer {
        SequenceAnalyzer::new(seq).unwrap()
    }

    #[test]
    fn test_sequence_validation() {
        assert!(SequenceAnalyzer::new(BASIC).is_ok());
        assert_eq!(analyzer("atcg").sequence(), "ATCG");
        assert_eq!(analyzer("atcg"), analyzer("ATCG"));
        assert!(analyzer("").is_empty());
    }

    #[test]
    fn test_invalid_sequences() {
        for seq in ["ATXG", "AT1G", "AT-G", "ATNG", "AT G", "ATÇG"] {
            let err = SequenceAnalyzer::new(seq).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{seq} should be rejected");
        }
    }

    #[test]
    fn test_invalid_sequence_reports_position() {
        let err = SequenceAnalyzer::new("acgx").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidSequence {
                position: 3,
                found: 'X'
            }
        );
        assert!(err.to_string().starts_with("Invalid sequence"));
    }

    #[test]
    fn test_gc_content() {
        assert_eq!(analyzer(BASIC).gc_content(), 50.0);
        assert_eq!(analyzer(GC_RICH).gc_content(), 100.0);
        assert_eq!(analyzer(AT_RICH).gc_content(), 0.0);
        assert_eq!(analyzer("").gc_content(), 0.0);
        assert_eq!(analyzer("ACGTA").gc_content(), 40.0);
    }

    #[test]
    fn test_base_counts() {
        assert_eq!(analyzer("ACGT").base_counts(), [1, 1, 1, 1]);
        assert_eq!(analyzer("aacg").base_counts(), [2, 1, 1, 0]);
        assert_eq!(analyzer("").base_counts(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_count_kmers() {
        let kmers = analyzer(BASIC).count_kmers(2).unwrap();
        let expected: HashMap<String, usize> = [
            ("AT", 1),
            ("TC", 1),
            ("CG", 2),
            ("GC", 1),
            ("GT", 1),
            ("TA", 1),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(kmers, expected);
    }

    #[test]
    fn test_count_kmers_overlapping() {
        let kmers = analyzer("AAAA").count_kmers(2).unwrap();
        assert_eq!(kmers.len(), 1);
        assert_eq!(kmers["AA"], 3);
    }

    #[test]
    fn test_kmer_totals() {
        let seq = analyzer(WITH_PATTERN);
        for k in 1..=seq.len() {
            let total: usize = seq.count_kmers(k as i64).unwrap().values().sum();
            assert_eq!(total, seq.len() - k + 1, "k = {k}");
        }
    }

    #[test]
    fn test_kmer_boundaries() {
        let seq = analyzer(BASIC);

        let err = seq.count_kmers(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(
            seq.count_kmers(9).unwrap_err(),
            AnalysisError::InvalidKmerSize { k: 9, len: 8 }
        );

        assert_eq!(
            seq.count_kmers(-1).unwrap_err(),
            AnalysisError::InvalidKmerSize { k: -1, len: 8 }
        );
        assert_eq!(
            seq.count_kmers(i64::MIN).unwrap_err(),
            AnalysisError::InvalidKmerSize { k: i64::MIN, len: 8 }
        );

        let whole = seq.count_kmers(8).unwrap();
        assert_eq!(whole.len(), 1);
        assert_eq!(whole[BASIC], 1);
    }

    #[test]
    fn test_kmers_of_empty_sequence() {
        let empty = analyzer("");
        assert!(empty.count_kmers(0).is_err());
        assert!(empty.count_kmers(1).is_err());
        assert!(empty.count_kmers(-3).is_err());
    }

    #[test]
    fn test_find_patterns() {
        let seq = analyzer(WITH_PATTERN);
        assert_eq!(seq.find_patterns("ATCG").unwrap(), vec![0, 4, 8]);
        assert_eq!(seq.find_patterns("CG").unwrap(), vec![2, 6, 10]);
        assert_eq!(seq.find_patterns("XXX").unwrap(), Vec::<usize>::new());
        // Case insensitive
        assert_eq!(seq.find_patterns("atcg").unwrap(), vec![0, 4, 8]);
    }

    #[test]
    fn test_find_patterns_overlapping() {
        assert_eq!(analyzer("AAAA").find_patterns("AA").unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_find_patterns_longer_than_sequence() {
        assert!(analyzer("ACG").find_patterns("ACGT").unwrap().is_empty());
        assert!(analyzer("").find_patterns("A").unwrap().is_empty());
    }

    #[test]
    fn test_find_empty_pattern() {
        let err = analyzer(BASIC).find_patterns("").unwrap_err();
        assert_eq!(err, AnalysisError::EmptyPattern);
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_transcribe() {
        assert_eq!(analyzer(BASIC).transcribe(), "AUCGCGUA");
        assert_eq!(analyzer("TTTT").transcribe(), "UUUU");
        assert_eq!(analyzer("").transcribe(), "");
        assert_eq!(analyzer("gcat").transcribe(), "GCAU");
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(analyzer(BASIC).reverse_complement(), "TACGCGAT");
        assert_eq!(analyzer("AATT").reverse_complement(), "AATT");
        assert_eq!(analyzer("").reverse_complement(), "");
        assert_eq!(analyzer("AAGC").reverse_complement(), "GCTT");
    }

    #[test]
    fn test_reverse_complement_involution() {
        for seq in [BASIC, GC_RICH, AT_RICH, WITH_PATTERN, "GATTACA", ""] {
            let once = analyzer(seq).reverse_complement();
            let twice = analyzer(&once).reverse_complement();
            assert_eq!(twice, seq);
        }
    }

    #[test]
    fn test_case_insensitive_operations() {
        let lower = analyzer("gattaca");
        let upper = analyzer("GATTACA");
        assert_eq!(lower.gc_content(), upper.gc_content());
        assert_eq!(lower.count_kmers(3).unwrap(), upper.count_kmers(3).unwrap());
        assert_eq!(
            lower.find_patterns("TA").unwrap(),
            upper.find_patterns("TA").unwrap()
        );
        assert_eq!(lower.transcribe(), upper.transcribe());
        assert_eq!(lower.reverse_complement(), upper.reverse_complement());
    }

    #[test]
    fn test_parse_and_display() {
        let seq: SequenceAnalyzer = "acgt".parse().unwrap();
        assert_eq!(seq.to_string(), "ACGT");
        assert!(SequenceAnalyzer::try_from("ACGU").is_err());
    }

    #[test]
    fn test_complement() {
        assert_eq!(complement(b'A'), b'T');
        assert_eq!(complement(b'T'), b'A');
        assert_eq!(complement(b'C'), b'G');
        assert_eq!(complement(b'G'), b'C');
    }
}
