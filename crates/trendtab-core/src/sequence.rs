//! Append-only column storage with incremental trend tracking.
//!
//! Every append records, aligned by index with the stored value:
//! - the order relation against the previous non-missing numeric value,
//! - the percentage change against that value,
//! - updates to the running minimum and maximum (first occurrence wins ties).

use std::cmp::Ordering;
use std::fmt;

use trendtab_model::{Cell, CellFormat, CellKind, Direction, OrderRelation};

/// A running extremum and the row index where it first occurred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub value: f64,
    pub index: usize,
}

/// Sign shown in front of a percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaSign {
    Increase,
    Decrease,
    Flat,
}

/// Relative change of a value against its numeric predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentDelta {
    pub sign: DeltaSign,
    /// Absolute change in percent, always non-negative.
    pub percent: f64,
}

impl PercentDelta {
    /// Computes the change from `previous` to `current`.
    ///
    /// Returns `None` when `previous` is zero or not finite, or when the
    /// ratio is not finite.
    pub fn between(previous: f64, current: f64) -> Option<Self> {
        if previous == 0.0 || !previous.is_finite() {
            return None;
        }
        let ratio = current / previous;
        if !ratio.is_finite() {
            return None;
        }
        let sign = match current.partial_cmp(&previous) {
            Some(Ordering::Greater) => DeltaSign::Increase,
            Some(Ordering::Less) => DeltaSign::Decrease,
            _ => DeltaSign::Flat,
        };
        let percent = (ratio - 1.0).abs() * 100.0;
        Some(Self { sign, percent })
    }
}

impl fmt::Display for PercentDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            DeltaSign::Increase => '+',
            DeltaSign::Decrease => '-',
            DeltaSign::Flat => '±',
        };
        write!(f, "{sign}{:.2}%", self.percent)
    }
}

/// Count of appended values per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTally {
    pub numeric: usize,
    pub text: usize,
    pub composite: usize,
    pub missing: usize,
}

impl TypeTally {
    fn record(&mut self, kind: CellKind) {
        match kind {
            CellKind::Numeric => self.numeric += 1,
            CellKind::Text => self.text += 1,
            CellKind::Composite => self.composite += 1,
            CellKind::Missing => self.missing += 1,
        }
    }
}

/// One table column over time.
#[derive(Debug, Clone)]
pub struct ColumnSequence {
    name: String,
    direction: Direction,
    format: CellFormat,
    values: Vec<Cell>,
    relations: Vec<OrderRelation>,
    deltas: Vec<Option<PercentDelta>>,
    min: Option<Extremum>,
    max: Option<Extremum>,
    last_numeric: Option<f64>,
    track_deltas: bool,
    tally: TypeTally,
}

impl ColumnSequence {
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            format: CellFormat::default(),
            values: Vec::new(),
            relations: Vec::new(),
            deltas: Vec::new(),
            min: None,
            max: None,
            last_numeric: None,
            track_deltas: true,
            tally: TypeTally::default(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }

    /// Stops recording percentage deltas; every delta stays `None`.
    #[must_use]
    pub fn without_deltas(mut self) -> Self {
        self.track_deltas = false;
        self
    }

    /// Appends a value and derives its relation, delta and extremum updates.
    pub fn append(&mut self, cell: impl Into<Cell>) {
        let cell = cell.into();
        let index = self.values.len();
        self.tally.record(cell.kind());

        let (relation, delta) = match cell.coerce() {
            Ok(value) => {
                let derived = match self.last_numeric {
                    Some(previous) => {
                        let relation = value
                            .partial_cmp(&previous)
                            .map_or(OrderRelation::Unknown, |ordering| {
                                self.direction.judge(ordering)
                            });
                        let delta = if self.track_deltas {
                            PercentDelta::between(previous, value)
                        } else {
                            None
                        };
                        (relation, delta)
                    }
                    None => (OrderRelation::Unknown, None),
                };
                self.track_extremes(value, index);
                self.last_numeric = Some(value);
                derived
            }
            Err(_) => (OrderRelation::Unknown, None),
        };

        self.values.push(cell);
        self.relations.push(relation);
        self.deltas.push(delta);
    }

    /// Appends `count` missing placeholders.
    pub fn backfill(&mut self, count: usize) {
        for _ in 0..count {
            self.append(Cell::Missing);
        }
    }

    fn track_extremes(&mut self, value: f64, index: usize) {
        if self.min.is_none_or(|min| value < min.value) {
            self.min = Some(Extremum { value, index });
        }
        if self.max.is_none_or(|max| value > max.value) {
            self.max = Some(Extremum { value, index });
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn format(&self) -> &CellFormat {
        &self.format
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    pub fn relations(&self) -> &[OrderRelation] {
        &self.relations
    }

    pub fn deltas(&self) -> &[Option<PercentDelta>] {
        &self.deltas
    }

    /// Deltas rendered as strings, e.g. `+300.00%`.
    pub fn delta_strings(&self) -> Vec<Option<String>> {
        self.deltas
            .iter()
            .map(|delta| delta.as_ref().map(ToString::to_string))
            .collect()
    }

    pub fn min(&self) -> Option<Extremum> {
        self.min
    }

    pub fn max(&self) -> Option<Extremum> {
        self.max
    }

    pub fn tally(&self) -> TypeTally {
        self.tally
    }

    /// True when trend colors apply to this column.
    ///
    /// Neutral columns and columns that ever received a text value are not
    /// colored.
    pub fn is_colorable(&self) -> bool {
        !self.direction.is_neutral() && self.tally.text == 0
    }

    /// True when every present value is numeric (or composite).
    pub fn is_numeric(&self) -> bool {
        self.tally.text == 0 && self.tally.numeric + self.tally.composite > 0
    }

    /// Display text of the value at `index`, without delta or color.
    pub fn display_text(&self, index: usize) -> String {
        match self.values.get(index) {
            Some(Cell::Integer(value)) if self.format.is_default() => value.to_string(),
            Some(Cell::Text(text)) => text.clone(),
            Some(cell) => cell
                .components()
                .map(|components| self.format.render(&components))
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    /// Export text of the value at `index`.
    ///
    /// Scalars are written raw; composite cells go through the column format.
    pub fn raw_text(&self, index: usize) -> String {
        match self.values.get(index) {
            Some(Cell::Tuple(values)) if values.len() == 1 => values[0].to_string(),
            Some(Cell::Tuple(values)) => self.format.render(values),
            Some(cell) => cell.to_string(),
            None => String::new(),
        }
    }

    /// All export texts in row order.
    pub fn raw_strings(&self) -> Vec<String> {
        (0..self.values.len())
            .map(|index| self.raw_text(index))
            .collect()
    }
}
