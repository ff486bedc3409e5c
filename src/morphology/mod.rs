//! Morphological analysis: fetching candidates and picking the canonical one.
//!
//! This module provides:
//! * [`MorphologyFetcher`]: async trait implemented by analysis backends.
//! * [`ApiFetcher`]: HTTP client for the SMC-style `/api/analyse` endpoint.
//! * [`AnalysisCandidate`] / [`Weight`]: one parse and its normalized weight.
//! * [`select`] / [`Selection`]: stable minimum-weight selection.
//! * [`FetchError`]: per-word fetch failures.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use lexicon_builder::config::MorphologyConfig;
//! use lexicon_builder::morphology::{select, ApiFetcher, MorphologyFetcher, Selection};
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = ApiFetcher::from_config(&MorphologyConfig::default());
//!
//!     match fetcher.fetch("അവൻ").await {
//!         Ok(candidates) => match select(candidates) {
//!             Selection::Selected(best) => println!("{:?}", best.root),
//!             Selection::NoneFound => println!("no analysis"),
//!         },
//!         Err(e) => eprintln!("fetch failed: {e}"),
//!     }
//! }
//! ```

pub mod candidate;
pub mod fetcher;
pub mod selector;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use candidate::{AnalysisCandidate, CandidateError, Weight};
pub use fetcher::{parse_response, ApiFetcher, FetchError, MorphologyFetcher};
pub use selector::{select, Selection};

#[cfg(test)]
pub use fetcher::{MockFetcher, MockReply};
