//! Per-word output records.
//!
//! [`WordRecord`] is what the pipeline produces for every input word.
//! [`Morphology`] is always exactly one of three states; on disk the two
//! non-selected states are written as the bare strings `"NoneFound"` and
//! `"FetchError"`, the selected state as the candidate object itself.

use serde::{Deserialize, Serialize};

use crate::morphology::{select, AnalysisCandidate, FetchError, Selection};

// ---------------------------------------------------------------------------
// Morphology
// ---------------------------------------------------------------------------

/// Morphological outcome for one word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MorphologyRepr", into = "MorphologyRepr")]
pub enum Morphology {
    /// The minimum-weight candidate returned by the service.
    Selected(AnalysisCandidate),
    /// The service answered with zero candidates.
    NoneFound,
    /// The service call failed.
    FetchError,
}

impl Morphology {
    /// Map a fetch outcome to a morphology state.
    ///
    /// A failed fetch never reaches the selector.
    pub fn from_fetch(outcome: Result<Vec<AnalysisCandidate>, FetchError>) -> Self {
        match outcome {
            Ok(candidates) => match select(candidates) {
                Selection::Selected(best) => Self::Selected(best),
                Selection::NoneFound => Self::NoneFound,
            },
            Err(_) => Self::FetchError,
        }
    }

    pub fn selected(&self) -> Option<&AnalysisCandidate> {
        match self {
            Self::Selected(candidate) => Some(candidate),
            Self::NoneFound | Self::FetchError => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MorphologyRepr {
    Status(MorphologyStatus),
    Selected(AnalysisCandidate),
}

#[derive(Serialize, Deserialize)]
enum MorphologyStatus {
    NoneFound,
    FetchError,
}

impl From<MorphologyRepr> for Morphology {
    fn from(repr: MorphologyRepr) -> Self {
        match repr {
            MorphologyRepr::Status(MorphologyStatus::NoneFound) => Self::NoneFound,
            MorphologyRepr::Status(MorphologyStatus::FetchError) => Self::FetchError,
            MorphologyRepr::Selected(candidate) => Self::Selected(candidate),
        }
    }
}

impl From<Morphology> for MorphologyRepr {
    fn from(morphology: Morphology) -> Self {
        match morphology {
            Morphology::Selected(candidate) => Self::Selected(candidate),
            Morphology::NoneFound => Self::Status(MorphologyStatus::NoneFound),
            Morphology::FetchError => Self::Status(MorphologyStatus::FetchError),
        }
    }
}

// ---------------------------------------------------------------------------
// WordRecord
// ---------------------------------------------------------------------------

/// Consolidated enrichment result for one word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub phonetic: Vec<String>,
    pub morphology: Morphology,
}

// ---------------------------------------------------------------------------
// RunSummary
// ---------------------------------------------------------------------------

/// Per-state counts over a result collection, for end-of-run reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub selected: usize,
    pub none_found: usize,
    pub fetch_errors: usize,
}

impl RunSummary {
    pub fn from_records(records: &[WordRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut summary, record| {
                summary.total += 1;
                match record.morphology {
                    Morphology::Selected(_) => summary.selected += 1,
                    Morphology::NoneFound => summary.none_found += 1,
                    Morphology::FetchError => summary.fetch_errors += 1,
                }
                summary
            })
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} words ({} analysed, {} without analysis, {} fetch errors)",
            self.total, self.selected, self.none_found, self.fetch_errors
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(weight: f64) -> AnalysisCandidate {
        AnalysisCandidate::from_service_entry(json!({
            "weight": weight,
            "morphemes": [{ "root": "വീട്", "pos": ["n"] }]
        }))
        .unwrap()
    }

    #[test]
    fn failed_fetch_maps_to_fetch_error() {
        let morphology = Morphology::from_fetch(Err(FetchError::Timeout));
        assert_eq!(morphology, Morphology::FetchError);
    }

    #[test]
    fn empty_fetch_maps_to_none_found() {
        assert_eq!(Morphology::from_fetch(Ok(Vec::new())), Morphology::NoneFound);
    }

    #[test]
    fn non_empty_fetch_selects_lowest_weight() {
        let morphology = Morphology::from_fetch(Ok(vec![candidate(2.0), candidate(1.0)]));
        assert_eq!(
            morphology.selected().and_then(|c| c.weight.value()),
            Some(1.0)
        );
    }

    #[test]
    fn status_states_serialize_as_strings() {
        let record = WordRecord {
            word: "x".into(),
            phonetic: vec!["x".into()],
            morphology: Morphology::NoneFound,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["morphology"], json!("NoneFound"));

        let value = serde_json::to_value(Morphology::FetchError).unwrap();
        assert_eq!(value, json!("FetchError"));
    }

    #[test]
    fn selected_state_serializes_as_candidate_object() {
        let value = serde_json::to_value(Morphology::Selected(candidate(3.0))).unwrap();
        assert_eq!(value["weight"], json!(3.0));
        assert_eq!(value["root"], json!("വീട്"));
        assert_eq!(value["partOfSpeech"], json!(["n"]));
        assert!(value["morphemes"].is_array());
    }

    #[test]
    fn records_read_back_in_all_states() {
        let records = vec![
            WordRecord {
                word: "a".into(),
                phonetic: vec!["a".into()],
                morphology: Morphology::Selected(candidate(1.0)),
            },
            WordRecord {
                word: "b".into(),
                phonetic: vec![],
                morphology: Morphology::NoneFound,
            },
            WordRecord {
                word: "c".into(),
                phonetic: vec![],
                morphology: Morphology::FetchError,
            },
        ];

        let text = serde_json::to_string(&records).unwrap();
        let back: Vec<WordRecord> = serde_json::from_str(&text).unwrap();

        assert_eq!(back, records);
    }

    #[test]
    fn summary_counts_each_state() {
        let records = vec![
            WordRecord {
                word: "a".into(),
                phonetic: vec![],
                morphology: Morphology::Selected(candidate(1.0)),
            },
            WordRecord {
                word: "b".into(),
                phonetic: vec![],
                morphology: Morphology::FetchError,
            },
            WordRecord {
                word: "c".into(),
                phonetic: vec![],
                morphology: Morphology::FetchError,
            },
        ];

        let summary = RunSummary::from_records(&records);

        assert_eq!(
            summary,
            RunSummary {
                total: 3,
                selected: 1,
                none_found: 0,
                fetch_errors: 2,
            }
        );
    }
}
