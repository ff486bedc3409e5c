//! Lexicon builder: enriches a word list with phonetic transcriptions and
//! morphological analyses.
//!
//! * [`pipeline`]: bounded-concurrency enrichment orchestrator.
//! * [`morphology`]: analysis service client and candidate selection.
//! * [`phonetic`]: grapheme-to-phoneme transcription.
//! * [`lexicon`]: word list input and atomic JSON result files.
//! * [`tagging`]: layman grammatical categories.
//! * [`corpus`]: word list extraction from text corpora.
//! * [`config`]: TOML settings.

pub mod config;
pub mod corpus;
pub mod lexicon;
pub mod morphology;
pub mod phonetic;
pub mod pipeline;
pub mod tagging;
