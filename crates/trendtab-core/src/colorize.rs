//! Per-cell highlight decisions.
//!
//! Backgrounds mark extremes by quality: green for the best value seen so far
//! and red for the worst. Under an ascending column the maximum is the best;
//! under a descending column it is the worst. Foregrounds mark the step from
//! the previous numeric value: green when it improved, red when it worsened.

use std::fmt;

use crossterm::style::Stylize;
use trendtab_model::OrderRelation;

use crate::sequence::{ColumnSequence, Extremum};

/// Switches consulted while colorizing a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOptions {
    /// Append ` (+12.34%)` after cells that carry a delta.
    pub show_percentage: bool,
    pub highlight_min: bool,
    pub highlight_max: bool,
    /// When false every cell comes back with [`Highlight::None`].
    pub colors: bool,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            show_percentage: false,
            highlight_min: true,
            highlight_max: true,
            colors: true,
        }
    }
}

/// Visual decision for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    None,
    /// Green text.
    Improved,
    /// Red text.
    Worsened,
    /// Green background.
    Best,
    /// Red background.
    Worst,
}

/// Display text of a cell and how to paint it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    pub text: String,
    pub highlight: Highlight,
}

impl DisplayCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: Highlight::None,
        }
    }
}

impl fmt::Display for DisplayCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.text.as_str();
        match self.highlight {
            Highlight::None => write!(f, "{text}"),
            Highlight::Improved => write!(f, "{}", text.dark_green()),
            Highlight::Worsened => write!(f, "{}", text.dark_red()),
            Highlight::Best => write!(f, "{}", text.on_green()),
            Highlight::Worst => write!(f, "{}", text.on_red()),
        }
    }
}

impl ColumnSequence {
    /// Builds the display cells for every stored value.
    pub fn colorize(&self, options: &ColorOptions) -> Vec<DisplayCell> {
        let colorable = options.colors && self.is_colorable();
        let ascending = self.direction() == trendtab_model::Direction::Ascending;
        let max_index = self.max().map(|Extremum { index, .. }| index);
        let min_index = self.min().map(|Extremum { index, .. }| index);

        (0..self.len())
            .map(|index| {
                let mut text = self.display_text(index);
                if options.show_percentage
                    && let Some(Some(delta)) = self.deltas().get(index)
                {
                    text.push_str(&format!(" ({delta})"));
                }
                if !colorable {
                    return DisplayCell::plain(text);
                }
                let highlight = if options.highlight_max && max_index == Some(index) {
                    if ascending {
                        Highlight::Best
                    } else {
                        Highlight::Worst
                    }
                } else if options.highlight_min && min_index == Some(index) {
                    if ascending {
                        Highlight::Worst
                    } else {
                        Highlight::Best
                    }
                } else {
                    match self.relations().get(index) {
                        Some(OrderRelation::Improved) => Highlight::Improved,
                        Some(OrderRelation::Worsened) => Highlight::Worsened,
                        _ => Highlight::None,
                    }
                };
                DisplayCell { text, highlight }
            })
            .collect()
    }
}

impl fmt::Display for ColumnSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.colorize(&ColorOptions::default());
        for (position, cell) in cells.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use trendtab_model::{Cell, Direction};

    use super::*;

    fn column(direction: Direction, values: &[f64]) -> ColumnSequence {
        let mut column = ColumnSequence::new("metric", direction);
        for value in values {
            column.append(Cell::Float(*value));
        }
        column
    }

    fn highlights(column: &ColumnSequence, options: &ColorOptions) -> Vec<Highlight> {
        column
            .colorize(options)
            .into_iter()
            .map(|cell| cell.highlight)
            .collect()
    }

    #[test]
    fn test_ascending_extremes_and_steps() {
        let column = column(Direction::Ascending, &[0.5, 0.4, 0.6, 0.55, 0.58]);
        assert_eq!(
            highlights(&column, &ColorOptions::default()),
            vec![
                Highlight::None,
                Highlight::Worst,
                Highlight::Best,
                Highlight::Worsened,
                Highlight::Improved
            ]
        );
    }

    #[test]
    fn test_descending_reverses_backgrounds() {
        let column = column(Direction::Descending, &[0.5, 0.9, 0.2, 0.3, 0.25]);
        assert_eq!(
            highlights(&column, &ColorOptions::default()),
            vec![
                Highlight::None,
                Highlight::Worst,
                Highlight::Best,
                Highlight::Worsened,
                Highlight::Improved
            ]
        );
    }

    #[test]
    fn test_max_takes_precedence_over_min() {
        let column = column(Direction::Ascending, &[1.0]);
        assert_eq!(
            highlights(&column, &ColorOptions::default()),
            vec![Highlight::Best]
        );
    }

    #[test]
    fn test_highlighting_switches() {
        let column = column(Direction::Ascending, &[1.0, 2.0, 0.5]);
        let options = ColorOptions {
            highlight_min: false,
            highlight_max: false,
            ..ColorOptions::default()
        };
        assert_eq!(
            highlights(&column, &options),
            vec![Highlight::None, Highlight::Improved, Highlight::Worsened]
        );
        let options = ColorOptions {
            colors: false,
            ..ColorOptions::default()
        };
        assert!(highlights(&column, &options)
            .iter()
            .all(|highlight| *highlight == Highlight::None));
    }

    #[test]
    fn test_neutral_column_has_no_color() {
        let column = column(Direction::Neutral, &[1.0, 2.0, 0.5]);
        assert!(highlights(&column, &ColorOptions::default())
            .iter()
            .all(|highlight| *highlight == Highlight::None));
    }

    #[test]
    fn test_unchanged_has_no_color() {
        let options = ColorOptions {
            highlight_min: false,
            highlight_max: false,
            ..ColorOptions::default()
        };
        let column = column(Direction::Ascending, &[1.0, 1.0]);
        assert_eq!(
            highlights(&column, &options),
            vec![Highlight::None, Highlight::None]
        );
    }

    #[test]
    fn test_text_value_suppresses_column_colors() {
        let mut column = column(Direction::Ascending, &[1.0, 2.0]);
        column.append(Cell::Text("diverged".to_string()));
        column.append(Cell::Float(3.0));
        let cells = column.colorize(&ColorOptions::default());
        assert!(cells.iter().all(|cell| cell.highlight == Highlight::None));
        assert_eq!(cells[2].text, "diverged");
    }

    #[test]
    fn test_tuple_does_not_suppress_colors() {
        let mut column = column(Direction::Ascending, &[1.0, 2.0]);
        column.append(Cell::Tuple(vec![0.5, 0.1]));
        let cells = column.colorize(&ColorOptions::default());
        assert_eq!(cells[1].highlight, Highlight::Best);
        assert_eq!(cells[2].highlight, Highlight::None);
        assert_eq!(cells[2].text, "0.5000±0.1000");
    }

    #[test]
    fn test_percentage_suffix() {
        let column = column(Direction::Descending, &[0.8, 0.2, 0.2]);
        let options = ColorOptions {
            show_percentage: true,
            ..ColorOptions::default()
        };
        let texts: Vec<String> = column
            .colorize(&options)
            .into_iter()
            .map(|cell| cell.text)
            .collect();
        assert_eq!(
            texts,
            vec!["0.8000", "0.2000 (-75.00%)", "0.2000 (±0.00%)"]
        );
    }

    #[test]
    fn test_plain_cell_display_is_text() {
        assert_eq!(DisplayCell::plain("0.5000").to_string(), "0.5000");
    }

    #[test]
    fn test_missing_renders_empty() {
        let mut column = ColumnSequence::new("acc", Direction::Ascending);
        column.backfill(2);
        column.append(Cell::Integer(3));
        let texts: Vec<String> = column
            .colorize(&ColorOptions::default())
            .into_iter()
            .map(|cell| cell.text)
            .collect();
        assert_eq!(texts, vec!["", "", "3"]);
    }
}
