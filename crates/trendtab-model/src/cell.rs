use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// A stored column value.
///
/// Integers and floats both coerce to `f64`; they are kept apart so integer
/// counters display without decimals.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Composite value. Only single-element tuples take part in ordering.
    Tuple(Vec<f64>),
    Missing,
}

/// Why a cell did not coerce to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("value is missing")]
    Missing,
    #[error("value is not numeric")]
    NotNumeric,
    #[error("value is NaN")]
    NotANumber,
    #[error("composite value with {0} components")]
    Composite(usize),
}

/// Coarse kind of a cell, used by the per-column type tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Numeric,
    Text,
    Composite,
    Missing,
}

impl Cell {
    /// Coerces the cell to a scalar for ordering and extremum tracking.
    pub fn coerce(&self) -> Result<f64, CoercionError> {
        let value = match self {
            Cell::Integer(value) => *value as f64,
            Cell::Float(value) => *value,
            Cell::Tuple(values) if values.len() == 1 => values[0],
            Cell::Tuple(values) => return Err(CoercionError::Composite(values.len())),
            Cell::Text(_) => return Err(CoercionError::NotNumeric),
            Cell::Missing => return Err(CoercionError::Missing),
        };
        if value.is_nan() {
            return Err(CoercionError::NotANumber);
        }
        Ok(value)
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Integer(_) | Cell::Float(_) => CellKind::Numeric,
            Cell::Tuple(values) if values.len() == 1 => CellKind::Numeric,
            Cell::Tuple(_) => CellKind::Composite,
            Cell::Text(_) => CellKind::Text,
            Cell::Missing => CellKind::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric components of the cell, if any.
    pub fn components(&self) -> Option<Vec<f64>> {
        match self {
            Cell::Integer(value) => Some(vec![*value as f64]),
            Cell::Float(value) => Some(vec![*value]),
            Cell::Tuple(values) => Some(values.clone()),
            Cell::Text(_) | Cell::Missing => None,
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Cell::Missing,
            Value::Integer(value) => Cell::Integer(value),
            Value::Float(value) => Cell::Float(value),
            Value::Tuple(values) if values.is_empty() => Cell::Missing,
            Value::Tuple(values) => Cell::Tuple(values),
            Value::Text(text) => Cell::Text(text),
            other @ (Value::Bool(_) | Value::Map(_)) => Cell::Text(other.to_string()),
        }
    }
}

impl From<Option<Value>> for Cell {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Cell::Missing, Cell::from)
    }
}

impl fmt::Display for Cell {
    /// Raw (export) form: integers as integers, floats in shortest round-trip form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(value) => write!(f, "{value}"),
            Cell::Float(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
            Cell::Tuple(values) => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "({})", parts.join(", "))
            }
            Cell::Missing => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(Cell::Integer(3).coerce(), Ok(3.0));
        assert_eq!(Cell::Float(0.25).coerce(), Ok(0.25));
        assert_eq!(Cell::Tuple(vec![2.0]).coerce(), Ok(2.0));
    }

    #[test]
    fn test_coerce_failures() {
        assert_eq!(Cell::Missing.coerce(), Err(CoercionError::Missing));
        assert_eq!(
            Cell::Text("abc".to_string()).coerce(),
            Err(CoercionError::NotNumeric)
        );
        assert_eq!(
            Cell::Tuple(vec![1.0, 2.0]).coerce(),
            Err(CoercionError::Composite(2))
        );
        assert_eq!(Cell::Float(f64::NAN).coerce(), Err(CoercionError::NotANumber));
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Cell::from(Value::Null), Cell::Missing);
        assert_eq!(Cell::from(Value::Bool(true)), Cell::Text("true".to_string()));
        assert_eq!(Cell::from(Value::Tuple(vec![])), Cell::Missing);
        assert_eq!(Cell::from(None), Cell::Missing);
    }

    #[test]
    fn test_raw_display() {
        assert_eq!(Cell::Integer(1).to_string(), "1");
        assert_eq!(Cell::Float(0.5).to_string(), "0.5");
        assert_eq!(Cell::Float(2.0).to_string(), "2");
        assert_eq!(Cell::Missing.to_string(), "");
    }
}
