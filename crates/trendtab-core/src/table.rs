//! The growing metric table.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Local;
use tracing::{debug, trace};
use trendtab_classify::{DirectionClassifier, OverrideClassifier, VocabularyClassifier};
use trendtab_model::{Cell, CellFormat, Direction, Record, Value, split_column_key};

use crate::average::{MovingAverage, average_column_name};
use crate::colorize::ColorOptions;
use crate::config::{SchemaMode, TIMESTAMP_COLUMN, TableConfig};
use crate::error::{Result, TableError};
use crate::normalize::flatten;
use crate::render;
use crate::sequence::ColumnSequence;

/// Smoothed companion of a base column.
#[derive(Debug, Clone)]
struct AverageTrack {
    base: String,
    average: MovingAverage,
}

/// A table that grows one row at a time.
///
/// Columns appear in first-seen order. Every column always holds exactly
/// [`Table::row_count`] values; rows that omit a column contribute a missing
/// placeholder.
pub struct Table {
    config: TableConfig,
    classifier: Box<dyn DirectionClassifier>,
    formats: BTreeMap<String, CellFormat>,
    headers: Vec<String>,
    columns: BTreeMap<String, ColumnSequence>,
    averages: BTreeMap<String, AverageTrack>,
    row_count: usize,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("headers", &self.headers)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Creates a table that classifies columns with the built-in vocabulary.
    pub fn new(config: TableConfig) -> Result<Self> {
        Self::with_classifier(config, VocabularyClassifier::new())
    }

    /// Creates a table with a custom direction classifier.
    ///
    /// Directions configured per column still take precedence.
    pub fn with_classifier<C>(config: TableConfig, classifier: C) -> Result<Self>
    where
        C: DirectionClassifier + 'static,
    {
        config.validate()?;
        let mut classifier = OverrideClassifier::new(classifier);
        classifier.extend(config.parsed_directions()?);
        let formats = config.parsed_cell_formats()?;

        let mut table = Self {
            classifier: Box::new(classifier),
            formats,
            headers: Vec::new(),
            columns: BTreeMap::new(),
            averages: BTreeMap::new(),
            row_count: 0,
            config,
        };
        if !table.config.headers.is_empty() && table.config.timestamp_format().is_some() {
            table.create_column(TIMESTAMP_COLUMN.to_string(), None);
        }
        for header in table.config.headers.clone() {
            if !table.columns.contains_key(&header) {
                table.create_column(header, None);
            }
        }
        Ok(table)
    }

    /// Adds one row.
    ///
    /// Nested maps are flattened, the timestamp column is prepended when
    /// enabled, and unseen keys become new backfilled columns. On error the
    /// table is left unchanged.
    pub fn add_row(&mut self, record: Record) -> Result<()> {
        let mut row = Record::new();
        let mut row_formats = Vec::new();
        for (key, value) in flatten(record) {
            let (name, format) = split_column_key(&key)?;
            if let Some(format) = format {
                row_formats.push((name.to_string(), format));
            }
            row.insert(name, value);
        }

        if let Some(column) = row.keys().find(|key| self.is_average_column(key)) {
            return Err(TableError::ReservedColumn {
                column: column.to_string(),
            });
        }
        if self.config.schema == SchemaMode::Fixed {
            self.check_schema(&row)?;
        }

        if let Some(format) = self.config.timestamp_format() {
            let stamp = Local::now().format(format).to_string();
            row.insert_first(TIMESTAMP_COLUMN, stamp);
        }

        let unseen: Vec<String> = row
            .keys()
            .filter(|key| !self.columns.contains_key(*key))
            .map(str::to_string)
            .collect();
        for name in unseen {
            let format = row_formats
                .iter()
                .rev()
                .find(|(column, _)| *column == name)
                .map(|(_, format)| format.clone());
            self.create_column(name, format);
        }
        self.create_average_columns(&row);

        let average_inputs: BTreeMap<String, Option<f64>> = self
            .averages
            .iter()
            .map(|(name, track)| {
                let input = row
                    .get(&track.base)
                    .cloned()
                    .map(Cell::from)
                    .and_then(|cell| cell.coerce().ok());
                (name.clone(), input)
            })
            .collect();

        for header in &self.headers {
            let Some(column) = self.columns.get_mut(header) else {
                continue;
            };
            match self.averages.get_mut(header) {
                Some(track) => {
                    let input = average_inputs.get(header).copied().flatten();
                    match track.average.push(input) {
                        Some(mean) => column.append(Cell::Float(mean)),
                        None => column.append(Cell::Missing),
                    }
                }
                None => column.append(Cell::from(row.remove(header))),
            }
        }
        self.row_count += 1;
        trace!(row = self.row_count, columns = self.headers.len(), "added row");
        Ok(())
    }

    /// Adds rows in order, stopping at the first error.
    pub fn add_rows<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Record>,
    {
        for row in rows {
            self.add_row(row)?;
        }
        Ok(())
    }

    fn check_schema(&self, row: &Record) -> Result<()> {
        let expected = self.config.headers.len();
        if row.len() != expected {
            return Err(TableError::SchemaMismatch {
                expected,
                found: row.len(),
            });
        }
        if let Some(column) = row
            .keys()
            .find(|key| !self.config.headers.iter().any(|header| header == key))
        {
            return Err(TableError::UnknownColumn {
                column: column.to_string(),
            });
        }
        Ok(())
    }

    /// True when `name` is, or will become, a moving average column.
    fn is_average_column(&self, name: &str) -> bool {
        self.averages.contains_key(name)
            || self
                .config
                .moving_average_columns
                .iter()
                .any(|base| average_column_name(base) == name)
    }

    fn create_column(&mut self, name: String, row_format: Option<CellFormat>) {
        let direction = if name == TIMESTAMP_COLUMN {
            Direction::Neutral
        } else {
            self.classifier.classify(&name)
        };
        let format = row_format
            .or_else(|| self.formats.get(&name).cloned())
            .unwrap_or_default();
        let mut column = ColumnSequence::new(name.clone(), direction).with_format(format);
        column.backfill(self.row_count);
        debug!(
            column = %name,
            direction = %direction,
            backfilled = self.row_count,
            "created column"
        );
        self.columns.insert(name.clone(), column);
        self.headers.push(name);
    }

    fn create_average_columns(&mut self, row: &Record) {
        let window = self.config.moving_average_window;
        for base in &self.config.moving_average_columns {
            let name = average_column_name(base);
            if !row.contains_key(base) || self.columns.contains_key(&name) {
                continue;
            }
            let direction = self.classifier.classify(base);
            let mut column = ColumnSequence::new(name.clone(), direction).without_deltas();
            column.backfill(self.row_count);
            debug!(column = %name, base = %base, window, "created moving average column");
            self.columns.insert(name.clone(), column);
            self.averages.insert(
                name.clone(),
                AverageTrack {
                    base: base.clone(),
                    average: MovingAverage::new(window),
                },
            );
            self.headers.push(name);
        }
    }

    /// Column names in display order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSequence> {
        self.columns.get(name)
    }

    /// Columns in display order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnSequence> {
        self.headers
            .iter()
            .filter_map(|header| self.columns.get(header))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Options used by [`Table::render`].
    pub fn color_options(&self) -> ColorOptions {
        ColorOptions {
            show_percentage: self.config.show_percentage_delta,
            highlight_min: self.config.highlight_extremes,
            highlight_max: self.config.highlight_extremes,
            colors: self.config.colors,
        }
    }

    /// Renders the table with the configured style.
    ///
    /// An empty table renders as an empty string.
    pub fn render(&self) -> String {
        render::render(self, &self.color_options())
    }

    /// Number of lines of [`Table::render`].
    pub fn height(&self) -> usize {
        self.render().lines().count()
    }

    /// Starts a row assembled one metric at a time.
    pub fn row_builder() -> RowBuilder {
        RowBuilder::default()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Incrementally assembled row.
#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    record: Record,
}

impl RowBuilder {
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.insert(key, value);
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}
