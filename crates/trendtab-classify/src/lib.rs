//! Direction prediction for metric columns.
//!
//! [`VocabularyClassifier`] guesses from the column name whether larger
//! values are better. It is a heuristic: a wrong guess only changes colors.
//! Any [`DirectionClassifier`] can replace it, and [`OverrideClassifier`]
//! pins individual columns.
//!
//! # Example
//!
//! ```
//! use trendtab_classify::{DirectionClassifier, VocabularyClassifier};
//! use trendtab_model::Direction;
//!
//! let classifier = VocabularyClassifier::new();
//! assert_eq!(classifier.classify("val_accuracy"), Direction::Ascending);
//! assert_eq!(classifier.classify("train_loss"), Direction::Descending);
//! ```

pub mod classifier;
pub mod vocabulary;

pub use classifier::{DirectionClassifier, OverrideClassifier, TermMatch, VocabularyClassifier};
