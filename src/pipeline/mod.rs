//! Enrichment pipeline: word list → phonetic + morphology → ordered records.
//!
//! # Architecture
//!
//! ```text
//! Vec<String> (word source)
//!        │
//!        ▼
//! PipelineOrchestrator::run()  ← async, one tokio task per word
//!        │
//!        ├─ PhoneticTranscriber::transcribe      (sync, fatal on error)
//!        └─ ConcurrencyLimiter::acquire
//!              └─ MorphologyFetcher::fetch        (≤ C in flight, per-word errors)
//!                    └─ select()                  (min weight, first wins ties)
//!        │
//!        ▼
//! Vec<WordRecord> (input order) ──▶ ResultSink
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lexicon_builder::config::AppConfig;
//! use lexicon_builder::lexicon::{ResultSink, WordSource};
//! use lexicon_builder::morphology::ApiFetcher;
//! use lexicon_builder::phonetic::MalayalamTranscriber;
//! use lexicon_builder::pipeline::PipelineOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default();
//!     let words = WordSource::from_path(&config.source.path, config.source.word_limit)?;
//!
//!     let orchestrator = PipelineOrchestrator::new(
//!         Arc::new(MalayalamTranscriber::new()),
//!         Arc::new(ApiFetcher::from_config(&config.morphology)),
//!         config.morphology.concurrency,
//!     );
//!     let records = orchestrator.run(words).await?;
//!
//!     ResultSink::new(&config.output.path).write(&records)?;
//!     Ok(())
//! }
//! ```

pub mod limiter;
pub mod record;
pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use limiter::{ConcurrencyLimiter, FetchPermit};
pub use record::{Morphology, RunSummary, WordRecord};
pub use runner::{PipelineError, PipelineOrchestrator};
