//! Word list input.
//!
//! The word list is UTF-8 text with one word per line, already
//! deduplicated upstream. Lines are trimmed and blank lines skipped; no
//! further deduplication happens here.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads the ordered input word list.
pub struct WordSource;

impl WordSource {
    /// Read at most `limit` words from the file at `path`.
    pub fn from_path(path: &Path, limit: usize) -> Result<Vec<String>, SourceError> {
        let io_error = |source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let words = Self::from_reader(BufReader::new(file), limit).map_err(io_error)?;

        log::info!("source: read {} words from {}", words.len(), path.display());
        Ok(words)
    }

    /// Read at most `limit` words from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, limit: usize) -> std::io::Result<Vec<String>> {
        let mut words = Vec::new();
        for line in reader.lines() {
            if words.len() >= limit {
                break;
            }
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_owned());
            }
        }
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn trims_and_skips_blank_lines() {
        let input = Cursor::new("  അവൻ \n\n\tവീട്\r\n   \nമല\n");
        let words = WordSource::from_reader(input, 100).unwrap();
        assert_eq!(words, vec!["അവൻ", "വീട്", "മല"]);
    }

    #[test]
    fn respects_limit() {
        let input = Cursor::new("a\nb\nc\nd\n");
        assert_eq!(WordSource::from_reader(input, 2).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn zero_limit_reads_nothing() {
        let input = Cursor::new("a\nb\n");
        assert!(WordSource::from_reader(input, 0).unwrap().is_empty());
    }

    #[test]
    fn keeps_duplicates_and_order() {
        let input = Cursor::new("b\na\nb\n");
        assert_eq!(
            WordSource::from_reader(input, 10).unwrap(),
            vec!["b", "a", "b"]
        );
    }

    #[test]
    fn reads_from_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "ഒന്ന്\nരണ്ട്\n").unwrap();

        let words = WordSource::from_path(&path, 10).unwrap();
        assert_eq!(words, vec!["ഒന്ന്", "രണ്ട്"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("absent.txt");

        let err = WordSource::from_path(&path, 10).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }
}
