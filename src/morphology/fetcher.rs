//! Core `MorphologyFetcher` trait and `ApiFetcher` implementation.
//!
//! `ApiFetcher` queries an SMC-style analyser at
//! `{base_url}/api/analyse?text=<word>` and expects
//! `{"result": {"<word>": [entry, …]}}` back. All connection details come
//! from [`MorphologyConfig`]; nothing is hardcoded.
//!
//! Every failure here is per-word: callers record it against the word and
//! carry on with the batch.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::MorphologyConfig;
use crate::morphology::candidate::AnalysisCandidate;

// ---------------------------------------------------------------------------
// FetchError
// ---------------------------------------------------------------------------

/// Errors that can occur while fetching analyses for one word.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The word was empty; no request was issued.
    #[error("word must not be empty")]
    InvalidWord,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("analysis request timed out")]
    Timeout,

    /// The service answered with a non-success status code.
    #[error("analysis service returned HTTP {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("failed to parse analysis response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// MorphologyFetcher trait
// ---------------------------------------------------------------------------

/// Async trait for morphological analysis lookups.
///
/// Implementors must be `Send + Sync` so they can be shared across the
/// pipeline's word tasks behind an `Arc<dyn MorphologyFetcher>`.
///
/// `Ok(vec![])` means the service answered with no analyses; that is a
/// valid outcome, not an error.
#[async_trait]
pub trait MorphologyFetcher: Send + Sync {
    async fn fetch(&self, word: &str) -> Result<Vec<AnalysisCandidate>, FetchError>;
}

// ---------------------------------------------------------------------------
// ApiFetcher
// ---------------------------------------------------------------------------

/// HTTP client for the morphology analysis service.
pub struct ApiFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl ApiFetcher {
    /// Build an `ApiFetcher` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`. A default (no-timeout) client is used if the
    /// builder fails.
    pub fn from_config(config: &MorphologyConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let endpoint = format!("{}/api/analyse", config.base_url.trim_end_matches('/'));

        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MorphologyFetcher for ApiFetcher {
    async fn fetch(&self, word: &str) -> Result<Vec<AnalysisCandidate>, FetchError> {
        if word.is_empty() {
            return Err(FetchError::InvalidWord);
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("text", word)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        parse_response(word, body)
    }
}

/// Decode an analyser response body into the candidates for `word`.
///
/// A body without an entry for `word` yields no candidates. A body whose
/// `result` is not an object, or whose entry for `word` is not an array of
/// objects, is malformed.
pub fn parse_response(word: &str, body: Value) -> Result<Vec<AnalysisCandidate>, FetchError> {
    let Value::Object(mut root) = body else {
        return Err(FetchError::Parse("response is not a JSON object".into()));
    };

    let mut result = match root.remove("result") {
        Some(Value::Object(result)) => result,
        Some(_) => return Err(FetchError::Parse("`result` is not an object".into())),
        None => return Err(FetchError::Parse("missing `result`".into())),
    };

    let entries = match result.remove(word) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(FetchError::Parse(format!(
                "analyses for {word:?} are not an array"
            )))
        }
    };

    entries
        .into_iter()
        .map(|entry| {
            AnalysisCandidate::from_service_entry(entry).map_err(|e| FetchError::Parse(e.to_string()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// MockFetcher  (test-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub use mock::{MockFetcher, MockReply};


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_config(base_url: &str) -> MorphologyConfig {
        MorphologyConfig {
            base_url: base_url.into(),
            timeout_secs: 2,
            concurrency: 4,
        }
    }

    #[test]
    fn endpoint_is_built_from_base_url() {
        let fetcher = ApiFetcher::from_config(&make_config("https://morph.example.org/"));
        assert_eq!(fetcher.endpoint(), "https://morph.example.org/api/analyse");
    }

    #[test]
    fn parses_candidates_in_service_order() {
        let body = json!({
            "result": {
                "അവൾ": [
                    { "weight": 2, "morphemes": [{ "root": "അവൾ", "pos": ["prn"] }] },
                    { "weight": 1, "morphemes": [{ "root": "അവ", "pos": ["dem"] }] }
                ]
            }
        });

        let candidates = parse_response("അവൾ", body).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].weight.value(), Some(2.0));
        assert_eq!(candidates[1].root.as_deref(), Some("അവ"));
    }

    #[test]
    fn missing_word_key_means_no_candidates() {
        let body = json!({ "result": { "other": [{ "weight": 1 }] } });
        assert_eq!(parse_response("word", body).unwrap(), Vec::new());
    }

    #[test]
    fn empty_analysis_list_means_no_candidates() {
        let body = json!({ "result": { "word": [] } });
        assert!(parse_response("word", body).unwrap().is_empty());
    }

    #[test]
    fn malformed_bodies_are_parse_errors() {
        let cases = [
            json!([]),
            json!({}),
            json!({ "result": [] }),
            json!({ "result": { "word": "n" } }),
            json!({ "result": { "word": [1, 2] } }),
        ];
        for body in cases {
            assert!(
                matches!(parse_response("word", body.clone()), Err(FetchError::Parse(_))),
                "expected parse error for {body}"
            );
        }
    }

    #[tokio::test]
    async fn empty_word_is_rejected_without_request() {
        let fetcher = ApiFetcher::from_config(&make_config("http://127.0.0.1:9"));
        assert_eq!(fetcher.fetch("").await, Err(FetchError::InvalidWord));
    }

    /// Nothing listens on the discard port locally, so the connection is
    /// refused and the failure comes back as a per-word error.
    #[tokio::test]
    async fn unreachable_service_is_a_fetch_error() {
        let fetcher = ApiFetcher::from_config(&make_config("http://127.0.0.1:9"));
        let result = fetcher.fetch("വീട്").await;
        assert!(matches!(
            result,
            Err(FetchError::Request(_)) | Err(FetchError::Timeout)
        ));
    }

    #[test]
    fn fetcher_is_object_safe() {
        let fetcher: Box<dyn MorphologyFetcher> =
            Box::new(ApiFetcher::from_config(&make_config("http://localhost")));
        drop(fetcher);
    }
}
