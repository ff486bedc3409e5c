//! Phonetic transcription.
//!
//! [`PhoneticTranscriber`] is the interface the pipeline calls for every
//! word. It is synchronous and expected to succeed for any word in the
//! configured script; an error is a fatal fault for the whole run.
//!
//! [`MalayalamTranscriber`] is the shipped implementation, a table-driven
//! grapheme-to-IPA converter.

pub mod malayalam;

use thiserror::Error;

pub use malayalam::MalayalamTranscriber;

// ---------------------------------------------------------------------------
// TranscriberError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranscriberError {
    #[error("cannot transcribe an empty word")]
    EmptyWord,

    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),
}

// ---------------------------------------------------------------------------
// PhoneticTranscriber trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for grapheme-to-phoneme conversion.
///
/// Returns the phonetic representation as an ordered sequence of strings.
pub trait PhoneticTranscriber: Send + Sync {
    fn transcribe(&self, word: &str) -> Result<Vec<String>, TranscriberError>;
}

const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn PhoneticTranscriber>) {}
};

// ---------------------------------------------------------------------------
// MockTranscriber  (test-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub use mock::MockTranscriber;
