//! Picks the canonical analysis for a word.

use super::candidate::AnalysisCandidate;

/// Outcome of selecting from a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Selected(AnalysisCandidate),
    /// The analyser answered but had nothing for the word.
    NoneFound,
}

/// Return the candidate with the lowest [`Weight`](super::Weight).
///
/// Ties go to the earliest candidate in `candidates`. `Iterator::min_by`
/// would keep the *last* of equal elements, so the fold below only replaces
/// the current best on a strictly smaller weight.
pub fn select(candidates: Vec<AnalysisCandidate>) -> Selection {
    let best = candidates.into_iter().fold(None, |best, candidate| match best {
        Some(current) if candidate_is_worse_or_equal(&candidate, &current) => Some(current),
        _ => Some(candidate),
    });

    match best {
        Some(candidate) => Selection::Selected(candidate),
        None => Selection::NoneFound,
    }
}

fn candidate_is_worse_or_equal(candidate: &AnalysisCandidate, current: &AnalysisCandidate) -> bool {
    candidate.weight >= current.weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::Weight;
    use serde_json::{json, Map};

    fn candidate(weight: Option<f64>, root: &str) -> AnalysisCandidate {
        AnalysisCandidate {
            weight: weight.map(Weight::new).unwrap_or(Weight::MISSING),
            root: Some(root.into()),
            part_of_speech: Vec::new(),
            extra: Map::new(),
        }
    }

    fn selected_root(selection: &Selection) -> &str {
        match selection {
            Selection::Selected(c) => c.root.as_deref().unwrap(),
            Selection::NoneFound => panic!("expected a selection"),
        }
    }

    #[test]
    fn empty_list_is_none_found() {
        assert_eq!(select(Vec::new()), Selection::NoneFound);
    }

    #[test]
    fn single_candidate_is_selected() {
        let selection = select(vec![candidate(Some(5.0), "only")]);
        assert_eq!(selected_root(&selection), "only");
    }

    #[test]
    fn lowest_weight_wins() {
        let selection = select(vec![
            candidate(Some(2.0), "two"),
            candidate(Some(1.0), "one"),
            candidate(Some(3.0), "three"),
        ]);
        assert_eq!(selected_root(&selection), "one");
    }

    #[test]
    fn ties_go_to_first_seen() {
        let selection = select(vec![
            candidate(Some(4.0), "late"),
            candidate(Some(1.0), "first"),
            candidate(Some(1.0), "second"),
            candidate(Some(1.0), "third"),
        ]);
        assert_eq!(selected_root(&selection), "first");
    }

    #[test]
    fn missing_weights_lose_to_numeric_weights() {
        let selection = select(vec![
            candidate(None, "unweighted"),
            candidate(Some(1000.0), "heavy"),
        ]);
        assert_eq!(selected_root(&selection), "heavy");
    }

    #[test]
    fn all_missing_weights_keep_first() {
        let selection = select(vec![candidate(None, "a"), candidate(None, "b")]);
        assert_eq!(selected_root(&selection), "a");
    }

    #[test]
    fn negative_weights_beat_positive() {
        let selection = select(vec![
            candidate(Some(0.5), "pos"),
            candidate(Some(-0.5), "neg"),
        ]);
        assert_eq!(selected_root(&selection), "neg");
    }

    #[test]
    fn non_numeric_weight_from_service_loses() {
        let odd = AnalysisCandidate::from_service_entry(json!({ "weight": "1", "root": "odd" }))
            .unwrap();
        let selection = select(vec![odd, candidate(Some(9.0), "nine")]);
        assert_eq!(selected_root(&selection), "nine");
    }
}
