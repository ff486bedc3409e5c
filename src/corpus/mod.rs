//! Word list extraction from raw text corpora.
//!
//! Corpus files are Wikipedia-style dumps: `<doc …>` / `</doc>` wrappers
//! around plain text. Extraction drops the markup and URLs, keeps only
//! Malayalam (U+0D00 – U+0D7F) characters and whitespace, splits on
//! whitespace and deduplicates in first-seen order.

use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot walk corpus directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot read corpus file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write word list {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Text cleaning
// ---------------------------------------------------------------------------

static DOC_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<doc.*?>|</doc>").unwrap());

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

static NON_MALAYALAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x{0D00}-\x{0D7F}\s]").unwrap());

/// Words of `text` after markup, URL and foreign-script removal, in order
/// and with repeats.
///
/// A `<doc` tag never spans lines; an opening tag without `>` on its line is
/// left as text and only loses its non-Malayalam characters.
pub fn extract_text(text: &str) -> Vec<String> {
    let cleaned = DOC_TAG.replace_all(text, "");
    let cleaned = URL.replace_all(&cleaned, "");
    let cleaned = NON_MALAYALAM.replace_all(&cleaned, "");

    cleaned.split_whitespace().map(str::to_owned).collect()
}

// ---------------------------------------------------------------------------
// CorpusExtractor
// ---------------------------------------------------------------------------

/// Accumulates unique words across corpus files.
#[derive(Debug, Default)]
pub struct CorpusExtractor {
    seen: HashSet<String>,
    words: Vec<String>,
}

impl CorpusExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the words of `text`; returns how many were new.
    pub fn add_text(&mut self, text: &str) -> usize {
        let before = self.words.len();
        for word in extract_text(text) {
            if self.seen.insert(word.clone()) {
                self.words.push(word);
            }
        }
        self.words.len() - before
    }

    /// Add every file under `dir`, recursively, in file-name order.
    ///
    /// Files that are not valid UTF-8 are skipped with a warning.
    pub fn add_dir(&mut self, dir: &Path) -> Result<usize, CorpusError> {
        let mut files = 0;
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let bytes = fs::read(entry.path()).map_err(|source| CorpusError::Read {
                path: entry.path().to_path_buf(),
                source,
            })?;
            match String::from_utf8(bytes) {
                Ok(text) => {
                    let added = self.add_text(&text);
                    log::debug!("corpus: {} → {added} new words", entry.path().display());
                }
                Err(_) => {
                    log::warn!("corpus: skipping non-UTF-8 file {}", entry.path().display());
                    continue;
                }
            }
            files += 1;
        }

        log::info!(
            "corpus: {} unique words from {files} files under {}",
            self.words.len(),
            dir.display()
        );
        Ok(files)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

/// Write `words` one per line, replacing `path` atomically.
pub fn write_word_list(path: &Path, words: &[String]) -> Result<(), CorpusError> {
    let write_error = |source| CorpusError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_error)?;

    let temp_file = NamedTempFile::new_in(parent).map_err(write_error)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        for word in words {
            writeln!(writer, "{word}").map_err(write_error)?;
        }
        writer.flush().map_err(write_error)?;
    }
    temp_file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::WordSource;
    use tempfile::tempdir;

    #[test]
    fn strips_doc_tags() {
        let text = "<doc id=\"1\" url=\"x\" title=\"t\">മല\nവീട്</doc>";
        assert_eq!(extract_text(text), vec!["മല", "വീട്"]);
    }

    #[test]
    fn strips_urls_and_foreign_script() {
        let text = "മല https://ml.wikipedia.org/wiki/മല (hill) 1999 വീട്.";
        assert_eq!(extract_text(text), vec!["മല", "വീട്"]);
    }

    #[test]
    fn foreign_characters_inside_word_are_dropped() {
        assert_eq!(extract_text("മലx്"), vec!["മല്"]);
    }

    #[test]
    fn unterminated_doc_tag_keeps_following_text() {
        assert_eq!(extract_text("മല <doc id=\"2\" വീട്"), vec!["മല", "വീട്"]);
    }

    #[test]
    fn doc_tag_does_not_span_lines() {
        let text = "<doc id=\"3\"\nകാട്>\nമല";
        assert_eq!(extract_text(text), vec!["കാട്", "മല"]);
    }

    #[test]
    fn url_inside_parentheses_is_removed_whole() {
        assert_eq!(
            extract_text("(https://ml.wikipedia.org/wiki/മല) വീട്"),
            vec!["വീട്"]
        );
    }

    #[test]
    fn url_glued_to_text_takes_rest_of_token() {
        assert_eq!(extract_text("കാട്http://x.org/മല വീട്"), vec!["കാട്", "വീട്"]);
    }

    #[test]
    fn extractor_deduplicates_in_first_seen_order() {
        let mut extractor = CorpusExtractor::new();
        assert_eq!(extractor.add_text("ബി എ ബി"), 2);
        assert_eq!(extractor.add_text("എ സി"), 1);
        assert_eq!(extractor.words(), ["ബി", "എ", "സി"]);
    }

    #[test]
    fn walks_directory_recursively() {
        let dir = tempdir().expect("temp dir");
        let nested = dir.path().join("AA");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("wiki_00"), "<doc id=\"1\">മല വീട്</doc>").unwrap();
        fs::write(nested.join("wiki_01"), "<doc id=\"2\">വീട് കാട്</doc>").unwrap();
        fs::write(nested.join("binary"), [0xff, 0xfe, 0x00]).unwrap();

        let mut extractor = CorpusExtractor::new();
        let files = extractor.add_dir(dir.path()).unwrap();

        assert_eq!(files, 2);
        let mut words = extractor.into_words();
        words.sort();
        let mut expected = vec!["കാട്", "മല", "വീട്"];
        expected.sort();
        assert_eq!(words, expected);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let mut extractor = CorpusExtractor::new();
        assert!(extractor.add_dir(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn written_list_is_readable_as_word_source() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("words.txt");
        let words = vec!["മല".to_string(), "വീട്".to_string()];

        write_word_list(&path, &words).unwrap();

        assert_eq!(WordSource::from_path(&path, 10).unwrap(), words);
    }
}
