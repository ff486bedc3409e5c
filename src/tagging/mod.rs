//! Layman grammatical categories.
//!
//! Maps the analyser's detailed POS tags (`"n"`, `"dative"`,
//! `"simple-perfect-aspect"`, …) to coarse categories a non-linguist can
//! filter on (`"Noun"`, `"Case Marker"`, `"Verb (Aspect)"`). Unknown tags
//! map to [`OTHER`]. Pure lookup; no state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::pipeline::{Morphology, WordRecord};

/// Category for tags missing from the table.
pub const OTHER: &str = "Other";

// ---------------------------------------------------------------------------
// Lookup table
// ---------------------------------------------------------------------------

/// Category for one detailed POS tag.
pub fn layman_category(tag: &str) -> &'static str {
    match tag {
        // nouns and nominal categories
        "n" | "np" | "n-v-compound" => "Noun",
        "masculine" | "feminine" | "neutral" | "pl" => "Noun Modifier",
        "ablative" | "accusative" | "dative" | "genitive" | "locative" | "allative"
        | "instrumental" | "perlative" | "vocative" | "sociative" => "Case Marker",
        "cardinal" | "ordinal" | "ones" | "tens" | "hundreds" | "thousands" | "lakhs"
        | "crores" | "half" | "zero" => "Numeral",
        "quantifier" => "Quantifier",
        "qn" => "Question",

        // pronouns
        "prn" => "Pronoun",
        "dem" => "Pronoun/Determiner",
        "interrogative" => "Interrogative",

        // verbs
        "v" => "Verb",
        "abilitative-mood" | "compulsive-mood" | "compulsive-mood-neg" | "conditional-mood"
        | "desiderative-mood" | "imperative-mood" | "optative-mood" | "permissive-mood"
        | "precative-mood" | "promissive-mood" | "purposive-mood" | "quotative-mood"
        | "satisfactive-mood" => "Verb (Mood)",
        "past" | "present" | "future" => "Verb (Tense)",
        "causative-voice" | "passive-voice" => "Verb (Voice)",
        "cont-perfect-aspect"
        | "cont-perfect-aspect-neg"
        | "simple-perfect-aspect"
        | "simple-perfect-aspect-neg"
        | "remote-perfect-aspect"
        | "remote-perfect-aspect-neg"
        | "iterative-aspect"
        | "iterative-future-aspect"
        | "iterative-past-aspect"
        | "iterative-present-aspect"
        | "emphatic-iterative-future-aspect"
        | "emphatic-iterative-past-aspect"
        | "habitual-aspect" => "Verb (Aspect)",
        "cvb-adv-part-absolute"
        | "cvb-adv-part-conditional"
        | "cvb-adv-part-future"
        | "cvb-adv-part-past"
        | "cvb-adv-part-past-simul"
        | "cvb-adv-part-simul" => "Verb (Adverbial Participle)",

        // adjectives and adverbs
        "adj" => "Adjective",
        "adv" => "Adverb",
        "adv-clause-rp-past"
        | "adv-clause-rp-past-neg"
        | "adv-clause-rp-present"
        | "adv-clause-rp-present-neg" => "Adverbial Clause",
        "indeclinable" => "Indeclinable",

        // function words
        "cnj" | "coordinative" | "concessive" => "Conjunction",
        "postp" => "Postposition",

        // misc
        "aff" => "Affirmative",
        "deriv" => "Derivative",
        "eng" => "English",
        "fw" => "Foreign/Language",
        "sanskrit" => "Sanskrit orig.",
        "neg" => "Negation",

        _ => OTHER,
    }
}

/// Unique categories for a set of tags, sorted.
pub fn classify<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .map(layman_category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// TaggedRecord
// ---------------------------------------------------------------------------

/// A [`WordRecord`] with its layman categories attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedRecord {
    #[serde(flatten)]
    pub record: WordRecord,
    pub layman: Vec<String>,
}

impl TaggedRecord {
    /// Words without a selected analysis get no categories.
    pub fn from_record(record: WordRecord) -> Self {
        let layman = match &record.morphology {
            Morphology::Selected(candidate) => {
                classify(candidate.part_of_speech.iter().map(String::as_str))
            }
            Morphology::NoneFound | Morphology::FetchError => Vec::new(),
        };
        Self { record, layman }
    }
}

pub fn tag_records(records: Vec<WordRecord>) -> Vec<TaggedRecord> {
    records.into_iter().map(TaggedRecord::from_record).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
