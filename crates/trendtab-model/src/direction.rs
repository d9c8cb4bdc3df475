use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Which way a column improves.
///
/// Fixed once per column from its name, or from an explicit override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Larger values are better (accuracy, score).
    Ascending,
    /// Smaller values are better (loss, error).
    Descending,
    /// No judgment on the trend.
    #[default]
    Neutral,
}

impl Direction {
    /// Maps a raw comparison of a value against its predecessor to a relation.
    ///
    /// Neutral columns keep the raw comparison as `Greater`/`Less`.
    pub fn judge(self, ordering: Ordering) -> OrderRelation {
        match (self, ordering) {
            (_, Ordering::Equal) => OrderRelation::Unchanged,
            (Direction::Ascending, Ordering::Greater) => OrderRelation::Improved,
            (Direction::Ascending, Ordering::Less) => OrderRelation::Worsened,
            (Direction::Descending, Ordering::Greater) => OrderRelation::Worsened,
            (Direction::Descending, Ordering::Less) => OrderRelation::Improved,
            (Direction::Neutral, Ordering::Greater) => OrderRelation::Greater,
            (Direction::Neutral, Ordering::Less) => OrderRelation::Less,
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Direction::Neutral
    }

    /// Short keyword form, accepted back by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
            Direction::Neutral => "none",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "max" | "higher" => Ok(Direction::Ascending),
            "desc" | "descending" | "min" | "lower" => Ok(Direction::Descending),
            "none" | "neutral" => Ok(Direction::Neutral),
            _ => Err(ModelError::UnknownDirection {
                keyword: s.to_string(),
            }),
        }
    }
}

/// Per-value relation to the previous numeric value of the same column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderRelation {
    Improved,
    Worsened,
    Unchanged,
    /// Raw increase in a neutral column.
    Greater,
    /// Raw decrease in a neutral column.
    Less,
    /// Non-numeric value, missing value, or no predecessor.
    Unknown,
}

impl OrderRelation {
    /// True when the relation carries a better/worse judgment.
    pub fn is_judged(self) -> bool {
        matches!(self, OrderRelation::Improved | OrderRelation::Worsened)
    }
}
