use crate::core::models::nucleotide::{LookupError, Sequence};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid sequence in '{path}': {source}")]
    Lookup { path: String, source: LookupError },
}

/// Parses a FASTA-style body: the first line is a header and is discarded, the
/// remaining lines are concatenated with all whitespace removed.
pub fn parse_sequence_file(content: &str) -> Result<Sequence, LookupError> {
    let body: String = content
        .lines()
        .skip(1)
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect();
    body.parse()
}

pub fn read_sequence(path: &Path) -> Result<Sequence, SequenceLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| SequenceLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse_sequence_file(&content).map_err(|e| SequenceLoadError::Lookup {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn header_line_is_dropped_and_lines_are_joined() {
        let seq = parse_sequence_file(">plasmid test\nACGT\nacgt\r\nTT\n").unwrap();
        assert_eq!(seq.to_string(), "ACGTACGTTT");
    }

    #[test]
    fn header_only_file_yields_empty_sequence() {
        let seq = parse_sequence_file(">only a header\n").unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn invalid_characters_are_reported_with_their_position() {
        let err = parse_sequence_file(">h\nACG\nNAC\n").unwrap_err();
        assert_eq!(
            err,
            LookupError::InvalidNucleotide {
                base: 'N',
                position: 3
            }
        );
    }

    #[test]
    fn read_sequence_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_sequence(&dir.path().join("missing.fasta"));
        assert!(matches!(result, Err(SequenceLoadError::Io { .. })));
    }

    #[test]
    fn read_sequence_loads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seq.fasta");
        fs::write(&path, ">seq\nAAGG\nCCTT\n").unwrap();
        assert_eq!(read_sequence(&path).unwrap().len(), 8);
    }
}
