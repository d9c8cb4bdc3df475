//! Shared data model for trendtab.
//!
//! - [`Value`] and [`Record`]: incoming rows, possibly nested
//! - [`Cell`]: a stored column value with pure numeric coercion
//! - [`Direction`] and [`OrderRelation`]: column semantics and per-value trend
//! - [`CellFormat`]: per-column display formats

pub mod cell;
pub mod direction;
pub mod error;
pub mod format;
pub mod value;

pub use cell::{Cell, CellKind, CoercionError};
pub use direction::{Direction, OrderRelation};
pub use error::{ModelError, Result};
pub use format::{CellFormat, DEFAULT_FORMAT, FORMAT_SUFFIX_SEPARATOR, Spec, split_column_key};
pub use value::{Record, Value};
