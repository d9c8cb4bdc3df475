//! Table configuration.
//!
//! [`TableConfig`] is plain data: it can be built in code with the `with_*`
//! methods or deserialized from TOML. Nothing is checked until
//! [`TableConfig::validate`], which [`crate::Table::new`] calls.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use trendtab_model::{CellFormat, Direction};

use crate::error::{Result, TableError};

/// Default strftime pattern of the synthetic timestamp column.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%b/%d/%Y %H:%M:%S";

/// Name of the synthetic timestamp column.
pub const TIMESTAMP_COLUMN: &str = "datetime";

/// Default moving-average window.
pub const DEFAULT_AVERAGE_WINDOW: usize = 10;

/// Border style of the rendered table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// Box drawing with rounded corners and a header separator only.
    #[default]
    Rounded,
    /// Box drawing with a separator between every row.
    Full,
    /// Box drawing with square corners and a header separator only.
    Condensed,
    Ascii,
    Markdown,
    /// No borders at all.
    Plain,
}

impl TableStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStyle::Rounded => "rounded",
            TableStyle::Full => "full",
            TableStyle::Condensed => "condensed",
            TableStyle::Ascii => "ascii",
            TableStyle::Markdown => "markdown",
            TableStyle::Plain => "plain",
        }
    }
}

/// How the table treats column keys it has not seen before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// New keys create new columns.
    #[default]
    Open,
    /// Rows must carry exactly the declared headers.
    Fixed,
}

/// Options for a [`crate::Table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub style: TableStyle,
    /// strftime pattern for the synthetic timestamp column. `None` or an
    /// empty pattern disables the column.
    pub auto_timestamp: Option<String>,
    pub show_percentage_delta: bool,
    /// Highlight both the running minimum and maximum.
    pub highlight_extremes: bool,
    /// Emit ANSI colors when rendering.
    pub colors: bool,
    /// Column name to format string, e.g. `loss = "{:.2e}"`.
    pub cell_formats: BTreeMap<String, String>,
    /// Column name to direction keyword, e.g. `lr = "desc"`.
    pub directions: BTreeMap<String, String>,
    /// Base columns that get a smoothed `<name>__avg` companion.
    pub moving_average_columns: Vec<String>,
    pub moving_average_window: usize,
    /// Columns known up front, in display order.
    pub headers: Vec<String>,
    pub schema: SchemaMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            auto_timestamp: Some(DEFAULT_TIMESTAMP_FORMAT.to_string()),
            show_percentage_delta: false,
            highlight_extremes: true,
            colors: true,
            cell_formats: BTreeMap::new(),
            directions: BTreeMap::new(),
            moving_average_columns: Vec::new(),
            moving_average_window: DEFAULT_AVERAGE_WINDOW,
            headers: Vec::new(),
            schema: SchemaMode::default(),
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| TableError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded table configuration");
        Ok(config)
    }

    #[must_use]
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_auto_timestamp(mut self, format: Option<impl Into<String>>) -> Self {
        self.auto_timestamp = format.map(Into::into);
        self
    }

    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.auto_timestamp = None;
        self
    }

    #[must_use]
    pub fn with_percentage_delta(mut self, enabled: bool) -> Self {
        self.show_percentage_delta = enabled;
        self
    }

    #[must_use]
    pub fn with_highlight_extremes(mut self, enabled: bool) -> Self {
        self.highlight_extremes = enabled;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    #[must_use]
    pub fn with_cell_format(mut self, column: impl Into<String>, format: impl Into<String>) -> Self {
        self.cell_formats.insert(column.into(), format.into());
        self
    }

    #[must_use]
    pub fn with_direction(mut self, column: impl Into<String>, keyword: impl Into<String>) -> Self {
        self.directions.insert(column.into(), keyword.into());
        self
    }

    #[must_use]
    pub fn with_moving_average(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        if !self.moving_average_columns.contains(&column) {
            self.moving_average_columns.push(column);
        }
        self
    }

    #[must_use]
    pub fn with_moving_average_window(mut self, window: usize) -> Self {
        self.moving_average_window = window;
        self
    }

    /// Declares the full column set; rows must match it exactly.
    #[must_use]
    pub fn with_fixed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self.schema = SchemaMode::Fixed;
        self
    }

    /// The timestamp pattern when the timestamp column is enabled.
    pub fn timestamp_format(&self) -> Option<&str> {
        self.auto_timestamp
            .as_deref()
            .filter(|format| !format.is_empty())
    }

    /// Checks every option that can be malformed.
    pub fn validate(&self) -> Result<()> {
        if let Some(format) = self.timestamp_format() {
            validate_timestamp_format(format)?;
        }
        if self.moving_average_window == 0 {
            return Err(TableError::InvalidWindow);
        }
        self.parsed_cell_formats()?;
        self.parsed_directions()?;
        Ok(())
    }

    /// Configured formats, parsed.
    pub fn parsed_cell_formats(&self) -> Result<BTreeMap<String, CellFormat>> {
        self.cell_formats
            .iter()
            .map(|(column, format)| -> Result<(String, CellFormat)> {
                Ok((column.clone(), CellFormat::parse(format)?))
            })
            .collect()
    }

    /// Configured direction overrides, parsed.
    pub fn parsed_directions(&self) -> Result<BTreeMap<String, Direction>> {
        self.directions
            .iter()
            .map(|(column, keyword)| -> Result<(String, Direction)> {
                Ok((column.clone(), keyword.parse::<Direction>()?))
            })
            .collect()
    }
}

fn validate_timestamp_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(TableError::InvalidTimestampFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}
