//! FASTA input.
//!
//! The viewer compares exactly two sequences; a FASTA file supplies them as
//! its first two records. Later records are ignored with a warning.
//!
//! ```text
//! >reference optional description
//! VLSPADKTNIKASWEKIGSHG
//! >variant
//! VLTPEDKTNVKAAWGKVGAHA
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::model::{InputError, Sequence, SequencePair};

/// Errors that can occur while reading a FASTA pair.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Expected two sequences, found {0}")]
    NotAPair(usize),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Reads the first two records of a FASTA file as a validated pair.
///
/// # Examples
///
/// ```no_run
/// use pairview::fasta::read_pair_file;
///
/// let pair = read_pair_file("pair.fasta").unwrap();
/// println!("{} residues", pair.len());
/// ```
pub fn read_pair_file<P: AsRef<Path>>(path: P) -> FastaResult<SequencePair> {
    let file = File::open(path)?;
    read_pair(BufReader::new(file))
}

/// Reads the first two records from FASTA content.
pub fn read_pair<R: BufRead>(reader: R) -> FastaResult<SequencePair> {
    let records = parse_records(reader)?;
    let count = records.len();
    if count > 2 {
        log::warn!("ignoring {} records after the first two", count - 2);
    }

    let mut records = records.into_iter();
    match (records.next(), records.next()) {
        (Some(first), Some(second)) => Ok(SequencePair::new(first, second)?),
        _ => Err(FastaError::NotAPair(count)),
    }
}

/// Reads a pair from an in-memory string.
pub fn read_pair_str(content: &str) -> FastaResult<SequencePair> {
    read_pair(content.as_bytes())
}

fn parse_records<R: BufRead>(reader: R) -> FastaResult<Vec<Sequence>> {
    let mut records = Vec::new();
    let mut current: Option<Sequence> = None;

    for (i, line) in reader.lines().enumerate() {
        let line_number = i + 1;
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            records.extend(current.take());

            let id = header.split_whitespace().next().unwrap_or_default();
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }
            current = Some(Sequence::new(id, String::new()));
        } else {
            let seq = current
                .as_mut()
                .ok_or(FastaError::SequenceWithoutHeader(line_number))?;
            seq.data.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }
    records.extend(current);

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_read_simple_pair() {
        let pair = read_pair_str(">ref\nARND\n>alt\narnc\n").unwrap();
        assert_eq!(pair.first().id, "ref");
        assert_eq!(pair.first().data, "ARND");
        assert_eq!(pair.second().id, "alt");
        assert_eq!(pair.second().data, "ARNC");
    }

    #[test]
    fn test_multiline_and_description() {
        let pair = read_pair_str(">a human beta\nVLSP\nADKT\n\n>b mouse\nVLTP\nEDKT\n").unwrap();
        assert_eq!(pair.first().id, "a");
        assert_eq!(pair.first().data, "VLSPADKT");
        assert_eq!(pair.second().data, "VLTPEDKT");
    }

    #[test]
    fn test_extra_records_ignored() {
        let pair = read_pair_str(">a\nAA\n>b\nAC\n>c\nGGGG\n").unwrap();
        assert_eq!(pair.second().id, "b");
    }

    #[test]
    fn test_single_record() {
        let result = read_pair_str(">a\nAAAA\n");
        assert!(matches!(result, Err(FastaError::NotAPair(1))));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(read_pair_str(""), Err(FastaError::NotAPair(0))));
    }

    #[test]
    fn test_sequence_without_header() {
        let result = read_pair_str("ACGT\n>seq1\nTGCA\n");
        assert!(matches!(result, Err(FastaError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_empty_identifier() {
        let result = read_pair_str(">\nAAAA\n>b\nAAAA\n");
        assert!(matches!(result, Err(FastaError::InvalidFormat(_))));
    }

    #[test]
    fn test_validation_errors_surface() {
        let result = read_pair_str(">a\nAAAA\n>b\nAAA\n");
        assert!(matches!(
            result,
            Err(FastaError::Input(InputError::LengthMismatch { first: 4, second: 3 }))
        ));

        // A header with no residues is an empty sequence
        let result = read_pair_str(">a\n>b\nAAA\n");
        assert!(matches!(result, Err(FastaError::Input(InputError::Empty { .. }))));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">x\nKRDE\n>y\nKRDQ").unwrap();
        let pair = read_pair_file(file.path()).unwrap();
        assert_eq!(pair.len(), 4);
        assert_eq!(pair.second().data, "KRDQ");
    }

    #[test]
    fn test_missing_file() {
        let result = read_pair_file("/nonexistent/pair.fasta");
        assert!(matches!(result, Err(FastaError::IoError(_))));
    }

    #[test]
    fn test_read_error_is_not_reported_as_open_failure() {
        // Invalid UTF-8 fails while reading lines, after the source is open
        let err = read_pair(&b">a\n\xff\n>b\nA\n"[..]).unwrap_err();
        assert!(matches!(err, FastaError::IoError(_)));
        let message = err.to_string();
        assert!(message.starts_with("I/O error"), "{message}");
        assert!(!message.contains("open"), "{message}");
    }
}
