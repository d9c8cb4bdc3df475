//! Growing metric tables with trend-aware highlighting.
//!
//! A [`Table`] ingests one [`Record`](trendtab_model::Record) per step. Each
//! column remembers its values, how every value relates to the previous one
//! under the column's [`Direction`](trendtab_model::Direction), and its
//! running extremes. Rendering paints improvements green and regressions red,
//! and marks the best and worst values with a background.
//!
//! ```
//! use trendtab_core::{Table, TableConfig};
//! use trendtab_model::Record;
//!
//! let mut table = Table::new(TableConfig::new().without_timestamp().with_colors(false))?;
//! table.add_row(Record::from([("m1", 1), ("m2", 1)]))?;
//! table.add_row(Record::from([("m1", 2), ("m2", 2)]))?;
//!
//! let mut csv = Vec::new();
//! table.write_csv(&mut csv)?;
//! assert_eq!(String::from_utf8_lossy(&csv), "m1,m2\n1,1\n2,2\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod average;
pub mod colorize;
pub mod config;
pub mod error;
mod export;
pub mod normalize;
mod render;
pub mod sequence;
pub mod table;

pub use average::{AVERAGE_SUFFIX, MovingAverage, average_column_name};
pub use colorize::{ColorOptions, DisplayCell, Highlight};
pub use config::{
    DEFAULT_AVERAGE_WINDOW, DEFAULT_TIMESTAMP_FORMAT, SchemaMode, TIMESTAMP_COLUMN, TableConfig,
    TableStyle,
};
pub use error::{Result, TableError};
pub use normalize::{KEY_SEPARATOR, flatten};
pub use sequence::{ColumnSequence, DeltaSign, Extremum, PercentDelta, TypeTally};
pub use table::{RowBuilder, Table};
