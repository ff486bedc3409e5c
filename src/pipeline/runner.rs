//! Pipeline orchestrator: drives a whole enrichment batch.
//!
//! [`PipelineOrchestrator`] owns the transcriber, the fetcher and a
//! [`ConcurrencyLimiter`], and turns a word list into one [`WordRecord`] per
//! word.
//!
//! # Pipeline flow
//!
//! ```text
//! for each word, in input order:
//!   transcriber.transcribe(word)          (sync, on the coordinating task)
//!     ├─ Err → abort in-flight tasks, return TranscriberFault
//!     └─ Ok  → spawn word task into JoinSet
//!                 └─▶ limiter.acquire()   (suspends while C fetches run)
//!                       └─▶ fetcher.fetch(word)
//!                             ├─ Err      → FetchError   (warn, keep going)
//!                             ├─ []       → NoneFound
//!                             └─ [c, …]   → Selected(min weight)
//!
//! join_next_with_id() in completion order → slot[index] → Vec<WordRecord> in input order
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::{self, JoinSet};

use crate::morphology::MorphologyFetcher;
use crate::phonetic::{PhoneticTranscriber, TranscriberError};

use super::limiter::ConcurrencyLimiter;
use super::record::{Morphology, WordRecord};

/// Completed-word interval between progress log lines.
const PROGRESS_EVERY: usize = 1_000;

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Fatal errors that end a run. Per-word fetch failures are not here; they
/// become [`Morphology::FetchError`] in that word's record.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The phonetic transcriber rejected a word.
    #[error("phonetic transcription failed for {word:?}: {source}")]
    TranscriberFault {
        word: String,
        #[source]
        source: TranscriberError,
    },

    /// A word task panicked or was cancelled.
    #[error("word task for {word:?} failed: {reason}")]
    TaskFailed { word: String, reason: String },

    /// The concurrency limiter stopped handing out permits.
    #[error("concurrency limiter closed while {word:?} was waiting")]
    LimiterClosed { word: String },
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Runs enrichment batches.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use lexicon_builder::config::MorphologyConfig;
/// use lexicon_builder::morphology::ApiFetcher;
/// use lexicon_builder::phonetic::MalayalamTranscriber;
/// use lexicon_builder::pipeline::PipelineOrchestrator;
///
/// # async fn example() -> Result<(), lexicon_builder::pipeline::PipelineError> {
/// let config = MorphologyConfig::default();
/// let orchestrator = PipelineOrchestrator::new(
///     Arc::new(MalayalamTranscriber::new()),
///     Arc::new(ApiFetcher::from_config(&config)),
///     config.concurrency,
/// );
///
/// let records = orchestrator.run(vec!["അവൻ".into(), "വീട്".into()]).await?;
/// assert_eq!(records.len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct PipelineOrchestrator {
    transcriber: Arc<dyn PhoneticTranscriber>,
    fetcher: Arc<dyn MorphologyFetcher>,
    limiter: ConcurrencyLimiter,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `transcriber`: grapheme-to-phoneme converter.
    /// * `fetcher`: morphology backend (e.g. `ApiFetcher`).
    /// * `concurrency`: maximum fetches in flight at once (0 is raised to 1).
    pub fn new(
        transcriber: Arc<dyn PhoneticTranscriber>,
        fetcher: Arc<dyn MorphologyFetcher>,
        concurrency: usize,
    ) -> Self {
        Self {
            transcriber,
            fetcher,
            limiter: ConcurrencyLimiter::new(concurrency),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.limiter.limit()
    }

    /// Enrich `words` and return one record per word, in input order.
    ///
    /// Returns only after every word has a record. If any word cannot be
    /// transcribed the run stops, in-flight fetches are aborted and
    /// [`PipelineError::TranscriberFault`] names the word.
    pub async fn run(&self, words: Vec<String>) -> Result<Vec<WordRecord>, PipelineError> {
        let total = words.len();
        if total == 0 {
            log::info!("pipeline: no words to process");
            return Ok(Vec::new());
        }

        log::info!(
            "pipeline: processing {total} words with at most {} concurrent fetches",
            self.limiter.limit()
        );

        // Dropping the set on an early return aborts every task still in it.
        let mut tasks: JoinSet<Result<(usize, WordRecord), PipelineError>> = JoinSet::new();
        let mut task_words: HashMap<task::Id, String> = HashMap::with_capacity(total);
        let mut spawned_words = Vec::with_capacity(total);

        for (index, word) in words.into_iter().enumerate() {
            let phonetic = self.transcriber.transcribe(&word).map_err(|source| {
                PipelineError::TranscriberFault {
                    word: word.clone(),
                    source,
                }
            })?;

            spawned_words.push(word.clone());
            let fetcher = Arc::clone(&self.fetcher);
            let limiter = self.limiter.clone();
            let task_word = word.clone();

            let handle = tasks.spawn(async move {
                let morphology = analyse(&word, fetcher.as_ref(), &limiter).await?;
                Ok((
                    index,
                    WordRecord {
                        word,
                        phonetic,
                        morphology,
                    },
                ))
            });
            task_words.insert(handle.id(), task_word);
        }

        let mut slots: Vec<Option<WordRecord>> = vec![None; total];
        let mut completed = 0usize;

        while let Some(joined) = tasks.join_next_with_id().await {
            let (index, record) = match joined {
                Ok((id, outcome)) => {
                    task_words.remove(&id);
                    outcome?
                }
                Err(join_error) => {
                    let word = task_words.remove(&join_error.id()).unwrap_or_default();
                    return Err(PipelineError::TaskFailed {
                        word,
                        reason: join_error.to_string(),
                    });
                }
            };

            log::debug!("pipeline: {:?} → {:?}", record.word, record.morphology);
            slots[index] = Some(record);
            completed += 1;

            if completed % PROGRESS_EVERY == 0 {
                log::info!("pipeline: {completed}/{total} words processed");
            }
        }

        log::info!("pipeline: all {total} words processed");

        slots
            .into_iter()
            .zip(spawned_words)
            .map(|(slot, word)| {
                slot.ok_or_else(|| PipelineError::TaskFailed {
                    word,
                    reason: "task finished without a record".into(),
                })
            })
            .collect()
    }
}

/// Fetch and select the analysis for one word under the concurrency ceiling.
async fn analyse(
    word: &str,
    fetcher: &dyn MorphologyFetcher,
    limiter: &ConcurrencyLimiter,
) -> Result<Morphology, PipelineError> {
    let outcome = {
        let _permit = limiter
            .acquire()
            .await
            .map_err(|_| PipelineError::LimiterClosed {
                word: word.to_owned(),
            })?;
        fetcher.fetch(word).await
    };

    if let Err(e) = &outcome {
        log::warn!("pipeline: analysis of {word:?} failed: {e}");
    }

    Ok(Morphology::from_fetch(outcome))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
