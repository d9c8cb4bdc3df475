//! Column-name based direction prediction.
//!
//! The default strategy scores every vocabulary term that occurs in the
//! column name by the length of the matched text. The longest match decides
//! the direction; when an ascending and a descending term of the same length
//! both match, ascending wins. Neutral-forced terms short-circuit before any
//! scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trendtab_model::Direction;

use crate::vocabulary::{ASCENDING_TERMS, DESCENDING_TERMS, NEUTRAL_TERMS};

/// Strategy for deciding a column's direction from its name.
pub trait DirectionClassifier {
    fn classify(&self, name: &str) -> Direction;
}

impl<F> DirectionClassifier for F
where
    F: Fn(&str) -> Direction,
{
    fn classify(&self, name: &str) -> Direction {
        self(name)
    }
}

/// A vocabulary term found in a column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMatch {
    pub term: String,
    /// Vocabulary the term belongs to.
    pub direction: Direction,
    /// Byte offset of the first occurrence in the lowercased name.
    pub position: usize,
    /// Matched text length, used as the match weight.
    pub weight: usize,
}

/// Substring matcher over weighted vocabularies.
#[derive(Debug, Clone)]
pub struct VocabularyClassifier {
    ascending: Vec<String>,
    descending: Vec<String>,
    neutral: Vec<String>,
}

impl Default for VocabularyClassifier {
    fn default() -> Self {
        Self {
            ascending: owned(ASCENDING_TERMS),
            descending: owned(DESCENDING_TERMS),
            neutral: owned(NEUTRAL_TERMS),
        }
    }
}

impl VocabularyClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier with no terms at all; everything is Neutral until extended.
    pub fn empty() -> Self {
        Self {
            ascending: Vec::new(),
            descending: Vec::new(),
            neutral: Vec::new(),
        }
    }

    /// Adds terms to the vocabulary for `direction`.
    ///
    /// Neutral terms join the neutral-forced set.
    #[must_use]
    pub fn with_terms<I, S>(mut self, direction: Direction, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let target = match direction {
            Direction::Ascending => &mut self.ascending,
            Direction::Descending => &mut self.descending,
            Direction::Neutral => &mut self.neutral,
        };
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !target.contains(&term) {
                target.push(term);
            }
        }
        self
    }

    /// Predicts the direction for a column name.
    pub fn predict(&self, name: &str) -> Direction {
        let lowered = name.to_lowercase();
        if self.neutral.iter().any(|term| lowered.contains(term.as_str())) {
            return Direction::Neutral;
        }
        let best_ascending = longest_match(&self.ascending, &lowered);
        let best_descending = longest_match(&self.descending, &lowered);
        match (best_ascending, best_descending) {
            (None, None) => Direction::Neutral,
            (Some(_), None) => Direction::Ascending,
            (None, Some(_)) => Direction::Descending,
            (Some(asc), Some(desc)) if desc > asc => Direction::Descending,
            (Some(_), Some(_)) => Direction::Ascending,
        }
    }

    /// Lists every vocabulary term found in `name`, longest first.
    pub fn explain(&self, name: &str) -> Vec<TermMatch> {
        let lowered = name.to_lowercase();
        let vocabularies = [
            (Direction::Neutral, &self.neutral),
            (Direction::Ascending, &self.ascending),
            (Direction::Descending, &self.descending),
        ];
        let mut matches: Vec<TermMatch> = vocabularies
            .into_iter()
            .flat_map(|(direction, terms)| {
                let lowered = &lowered;
                terms.iter().filter_map(move |term| {
                    lowered.find(term.as_str()).map(|position| TermMatch {
                        term: term.clone(),
                        direction,
                        position,
                        weight: term.len(),
                    })
                })
            })
            .collect();
        matches.sort_by(|a, b| b.weight.cmp(&a.weight).then(a.position.cmp(&b.position)));
        matches
    }
}

impl DirectionClassifier for VocabularyClassifier {
    fn classify(&self, name: &str) -> Direction {
        self.predict(name)
    }
}

/// Exact-name overrides on top of another classifier.
#[derive(Debug, Clone, Default)]
pub struct OverrideClassifier<C> {
    inner: C,
    overrides: BTreeMap<String, Direction>,
}

impl<C: DirectionClassifier> OverrideClassifier<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            overrides: BTreeMap::new(),
        }
    }

    /// Pins `name` to `direction`. Names are matched exactly.
    #[must_use]
    pub fn with_override(mut self, name: impl Into<String>, direction: Direction) -> Self {
        self.overrides.insert(name.into(), direction);
        self
    }

    pub fn extend<I, S>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (S, Direction)>,
        S: Into<String>,
    {
        for (name, direction) in overrides {
            self.overrides.insert(name.into(), direction);
        }
    }
}

impl<C: DirectionClassifier> DirectionClassifier for OverrideClassifier<C> {
    fn classify(&self, name: &str) -> Direction {
        match self.overrides.get(name) {
            Some(direction) => *direction,
            None => self.inner.classify(name),
        }
    }
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|term| (*term).to_string()).collect()
}

fn longest_match(terms: &[String], lowered: &str) -> Option<usize> {
    terms
        .iter()
        .filter(|term| lowered.contains(term.as_str()))
        .map(String::len)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_examples() {
        let classifier = VocabularyClassifier::new();
        assert_eq!(classifier.predict("Accuracy"), Direction::Ascending);
        assert_eq!(classifier.predict("Discriminator_loss"), Direction::Descending);
        assert_eq!(classifier.predict("dt"), Direction::Neutral);
        assert_eq!(classifier.predict("ROC-AUC"), Direction::Ascending);
    }

    #[test]
    fn test_longest_match_wins() {
        let classifier = VocabularyClassifier::new();
        // "mape" (descending) is longer than "map" (ascending)
        assert_eq!(classifier.predict("val_MAPE"), Direction::Descending);
        assert_eq!(classifier.predict("mAP@50"), Direction::Ascending);
    }

    #[test]
    fn test_equal_length_tie_prefers_ascending() {
        let classifier = VocabularyClassifier::empty()
            .with_terms(Direction::Ascending, ["good"])
            .with_terms(Direction::Descending, ["slow"]);
        assert_eq!(classifier.predict("slow_good"), Direction::Ascending);
        assert_eq!(classifier.predict("slowest"), Direction::Descending);
    }

    #[test]
    fn test_neutral_terms_short_circuit() {
        let classifier = VocabularyClassifier::new();
        // "time" alone is descending
        assert_eq!(classifier.predict("epoch_time"), Direction::Descending);
        assert_eq!(classifier.predict("datetime"), Direction::Neutral);
        assert_eq!(classifier.predict("timestamp_loss"), Direction::Neutral);
    }

    #[test]
    fn test_explain_orders_by_weight() {
        let classifier = VocabularyClassifier::new();
        let matches = classifier.explain("train_accuracy");
        assert_eq!(matches[0].term, "accuracy");
        assert_eq!(matches[0].direction, Direction::Ascending);
        assert_eq!(matches[0].weight, 8);
        assert_eq!(matches[0].position, 6);
        assert!(matches.iter().any(|m| m.term == "acc"));
    }

    #[test]
    fn test_override_classifier() {
        let classifier = OverrideClassifier::new(VocabularyClassifier::new())
            .with_override("lr", Direction::Descending);
        assert_eq!(classifier.classify("lr"), Direction::Descending);
        assert_eq!(classifier.classify("val_loss"), Direction::Descending);
        assert_eq!(classifier.classify("LR"), Direction::Neutral);
    }

    #[test]
    fn test_closure_classifier() {
        let always_up = |_: &str| Direction::Ascending;
        assert_eq!(always_up.classify("loss"), Direction::Ascending);
    }
}
