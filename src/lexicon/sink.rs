//! Atomic JSON result files.
//!
//! [`ResultSink`] serializes a whole collection into a temporary file in the
//! destination directory and renames it over the destination. Readers see
//! either the previous complete file or the new complete file, never a
//! partial one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

// ---------------------------------------------------------------------------
// PersistenceError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize results for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid result file: {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// ResultSink
// ---------------------------------------------------------------------------

/// Writes and reads result collections at one destination path.
#[derive(Debug, Clone)]
pub struct ResultSink {
    path: PathBuf,
}

impl ResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the destination with `records` as a pretty-printed JSON array.
    ///
    /// The parent directory is created if needed. On error the destination
    /// is untouched and the temporary file is removed.
    pub fn write<T: Serialize>(&self, records: &[T]) -> Result<(), PersistenceError> {
        let io_error = |source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(io_error)?;

        let temp_file = NamedTempFile::new_in(parent).map_err(io_error)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
                PersistenceError::Serialize {
                    path: self.path.clone(),
                    source,
                }
            })?;
            writer.write_all(b"\n").map_err(io_error)?;
            writer.flush().map_err(io_error)?;
        }
        temp_file.as_file().sync_all().map_err(io_error)?;

        temp_file
            .persist(&self.path)
            .map_err(|e| io_error(e.error))?;

        log::info!(
            "sink: wrote {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Load a collection previously written by [`write`](Self::write).
    pub fn read<T: DeserializeOwned>(&self) -> Result<Vec<T>, PersistenceError> {
        let file = File::open(&self.path).map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            PersistenceError::Deserialize {
                path: self.path.clone(),
                source,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::AnalysisCandidate;
    use crate::pipeline::{Morphology, WordRecord};
    use serde_json::json;
    use tempfile::tempdir;

    fn records() -> Vec<WordRecord> {
        vec![
            WordRecord {
                word: "അവൻ".into(),
                phonetic: vec!["a".into(), "ʋ".into(), "a".into(), "n".into()],
                morphology: Morphology::Selected(
                    AnalysisCandidate::from_service_entry(json!({
                        "weight": 1,
                        "morphemes": [{ "root": "അവൻ", "pos": ["prn"] }]
                    }))
                    .unwrap(),
                ),
            },
            WordRecord {
                word: "വീട്".into(),
                phonetic: vec![],
                morphology: Morphology::FetchError,
            },
        ]
    }

    #[test]
    fn writes_and_reads_back() {
        let dir = tempdir().expect("temp dir");
        let sink = ResultSink::new(dir.path().join("out.json"));

        sink.write(&records()).unwrap();
        let back: Vec<WordRecord> = sink.read().unwrap();

        assert_eq!(back, records());
    }

    #[test]
    fn keeps_non_ascii_verbatim() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("out.json");

        ResultSink::new(&path).write(&records()).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.contains("\"word\": \"അവൻ\""));
        assert!(text.contains("\"morphology\": \"FetchError\""));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("deeper").join("out.json");

        ResultSink::new(&path).write(&records()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn replaces_previous_file_completely() {
        let dir = tempdir().expect("temp dir");
        let sink = ResultSink::new(dir.path().join("out.json"));

        sink.write(&records()).unwrap();
        sink.write(&records()[..1]).unwrap();

        let back: Vec<WordRecord> = sink.read().unwrap();
        assert_eq!(back.len(), 1);
    }

    /// Writing over a directory fails and leaves it (and no temp files) behind.
    #[test]
    fn failed_write_leaves_destination_intact() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "previous").unwrap();

        let err = ResultSink::new(&target).write(&records()).unwrap_err();

        assert!(matches!(err, PersistenceError::Io { .. }));
        assert_eq!(
            fs::read_to_string(target.join("keep.txt")).unwrap(),
            "previous"
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    /// Serializes halfway, then fails.
    struct Poisoned;

    impl Serialize for Poisoned {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("poisoned record"))
        }
    }

    #[test]
    fn failed_serialization_keeps_previous_file_bytes() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("out.json");
        let sink = ResultSink::new(&path);

        sink.write(&records()).unwrap();
        let before = fs::read(&path).unwrap();

        let err = sink.write(&[Poisoned]).unwrap_err();

        assert!(matches!(err, PersistenceError::Serialize { .. }));
        assert_eq!(fs::read(&path).unwrap(), before);
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn empty_collection_is_an_empty_array() {
        let dir = tempdir().expect("temp dir");
        let sink = ResultSink::new(dir.path().join("empty.json"));

        sink.write::<WordRecord>(&[]).unwrap();

        let text = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(text.trim(), "[]");
    }

    #[test]
    fn reading_garbage_is_a_deserialize_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ResultSink::new(&path).read::<WordRecord>().unwrap_err();
        assert!(matches!(err, PersistenceError::Deserialize { .. }));
    }
}
