//! Analysis candidates and their weights.
//!
//! The analyser attaches a numeric `weight` to every parse it returns; lower
//! is better. Weights are normalized on ingestion into [`Weight`], which has a
//! total order: every finite number sorts before [`Weight::MISSING`]. Absent,
//! `null`, non-numeric and non-finite weights are all treated as missing.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Weight
// ---------------------------------------------------------------------------

/// Normalized candidate weight.
///
/// Holds either a finite `f64` or nothing. Construct with [`Weight::new`] or
/// [`Weight::from_json`]; both reject `NaN` and infinities, which is what
/// makes the `Ord` implementation total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight(Option<f64>);

impl Weight {
    /// The worst possible weight; loses to every numeric weight.
    pub const MISSING: Weight = Weight(None);

    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(Some(value))
        } else {
            Self::MISSING
        }
    }

    /// Normalize a raw JSON field. Only JSON numbers are accepted.
    pub fn from_json(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_f64)
            .map(Self::new)
            .unwrap_or(Self::MISSING)
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::MISSING
    }
}

impl Eq for Weight {}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_json(Some(&raw)))
    }
}

// ---------------------------------------------------------------------------
// CandidateError
// ---------------------------------------------------------------------------

/// A service entry that cannot be turned into a candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandidateError {
    #[error("analysis entry is not a JSON object")]
    NotAnObject,

    #[error("field `{0}` has an unexpected type")]
    BadField(&'static str),
}

// ---------------------------------------------------------------------------
// AnalysisCandidate
// ---------------------------------------------------------------------------

/// One possible morphological parse of a word.
///
/// `extra` carries every analyser field not lifted into the typed fields
/// (for the SMC analyser that is the `morphemes` array) and is written back
/// out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisCandidate {
    #[serde(default, skip_serializing_if = "Weight::is_missing")]
    pub weight: Weight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub part_of_speech: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisCandidate {
    /// Build a candidate from one raw entry of an analyser response.
    ///
    /// `root` and the POS tags are taken from the entry itself when present
    /// (`root`, `partOfSpeech` or `pos`); otherwise `root` comes from the
    /// first morpheme and the tags are every morpheme's `pos`, in order.
    pub fn from_service_entry(entry: Value) -> Result<Self, CandidateError> {
        let Value::Object(mut fields) = entry else {
            return Err(CandidateError::NotAnObject);
        };

        let weight = Weight::from_json(fields.remove("weight").as_ref());

        let root = match fields.remove("root") {
            Some(Value::String(root)) => Some(root),
            Some(Value::Null) | None => first_morpheme_root(&fields)?,
            Some(_) => return Err(CandidateError::BadField("root")),
        };

        let direct_pos = match fields.remove("partOfSpeech") {
            Some(value) => Some(value),
            None => fields.remove("pos"),
        };
        let part_of_speech = match direct_pos {
            Some(value) => string_list(&value, "partOfSpeech")?,
            None => morpheme_tags(&fields)?,
        };

        Ok(Self {
            weight,
            root,
            part_of_speech,
            extra: fields,
        })
    }
}

fn morphemes(fields: &Map<String, Value>) -> Result<&[Value], CandidateError> {
    match fields.get("morphemes") {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(CandidateError::BadField("morphemes")),
    }
}

fn first_morpheme_root(fields: &Map<String, Value>) -> Result<Option<String>, CandidateError> {
    match morphemes(fields)?.first() {
        None => Ok(None),
        Some(morpheme) => match morpheme.get("root") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(root)) => Ok(Some(root.clone())),
            Some(_) => Err(CandidateError::BadField("morphemes.root")),
        },
    }
}

fn morpheme_tags(fields: &Map<String, Value>) -> Result<Vec<String>, CandidateError> {
    let mut tags = Vec::new();
    for morpheme in morphemes(fields)? {
        if let Some(pos) = morpheme.get("pos") {
            tags.extend(string_list(pos, "morphemes.pos")?);
        }
    }
    Ok(tags)
}

fn string_list(value: &Value, field: &'static str) -> Result<Vec<String>, CandidateError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(single) => Ok(vec![single.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or(CandidateError::BadField(field))
            })
            .collect(),
        _ => Err(CandidateError::BadField(field)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
