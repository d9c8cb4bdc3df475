//! Tabular text layout through comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{
    ASCII_FULL_CONDENSED, ASCII_MARKDOWN, NOTHING, UTF8_FULL, UTF8_FULL_CONDENSED,
};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table as LayoutTable};

use crate::colorize::{ColorOptions, DisplayCell, Highlight};
use crate::config::TableStyle;
use crate::table::Table;

/// Lays out `table` with its configured style.
///
/// Styling is switched on or off explicitly so that the output never depends
/// on whether the process is attached to a terminal.
pub(crate) fn render(table: &Table, options: &ColorOptions) -> String {
    if table.is_empty() {
        return String::new();
    }
    let columns: Vec<_> = table.columns().collect();
    let mut layout = LayoutTable::new();
    apply_table_style(&mut layout, table.config().style);
    if options.colors {
        layout.enforce_styling();
    } else {
        layout.force_no_tty();
    }

    layout.set_header(
        columns
            .iter()
            .map(|column| header_cell(column.name(), options.colors))
            .collect::<Vec<_>>(),
    );

    let cells: Vec<Vec<DisplayCell>> = columns
        .iter()
        .map(|column| column.colorize(options))
        .collect();
    for row in 0..table.row_count() {
        layout.add_row(
            cells
                .iter()
                .map(|column| column.get(row).map_or_else(|| Cell::new(""), styled_cell))
                .collect::<Vec<_>>(),
        );
    }

    for (index, column) in columns.iter().enumerate() {
        if column.is_numeric() {
            align_column(&mut layout, index, CellAlignment::Right);
        }
    }
    layout.to_string()
}

fn apply_table_style(layout: &mut LayoutTable, style: TableStyle) {
    match style {
        TableStyle::Rounded => {
            layout
                .load_preset(UTF8_FULL_CONDENSED)
                .apply_modifier(UTF8_ROUND_CORNERS);
        }
        TableStyle::Full => {
            layout.load_preset(UTF8_FULL);
        }
        TableStyle::Condensed => {
            layout.load_preset(UTF8_FULL_CONDENSED);
        }
        TableStyle::Ascii => {
            layout.load_preset(ASCII_FULL_CONDENSED);
        }
        TableStyle::Markdown => {
            layout.load_preset(ASCII_MARKDOWN);
        }
        TableStyle::Plain => {
            layout.load_preset(NOTHING);
        }
    }
}

fn header_cell(label: &str, colors: bool) -> Cell {
    if colors {
        Cell::new(label)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(label)
    }
}

fn styled_cell(cell: &DisplayCell) -> Cell {
    let text = cell.text.as_str();
    match cell.highlight {
        Highlight::None => Cell::new(text),
        Highlight::Improved => Cell::new(text).fg(Color::DarkGreen),
        Highlight::Worsened => Cell::new(text).fg(Color::DarkRed),
        Highlight::Best => Cell::new(text).bg(Color::Green),
        Highlight::Worst => Cell::new(text).bg(Color::Red),
    }
}

fn align_column(layout: &mut LayoutTable, index: usize, alignment: CellAlignment) {
    if let Some(column) = layout.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use trendtab_model::Record;

    use super::*;
    use crate::config::TableConfig;

    fn filled(config: TableConfig) -> Table {
        let mut table = Table::new(config.without_timestamp()).expect("table");
        table
            .add_row(Record::from([("acc", 0.5), ("loss", 1.2)]))
            .expect("row");
        table
            .add_row(Record::from([("acc", 0.7), ("loss", 0.9)]))
            .expect("row");
        table
    }

    #[test]
    fn test_plain_render_without_colors_has_no_escapes() {
        let table = filled(TableConfig::new().with_colors(false));
        let rendered = table.render();
        assert!(!rendered.contains('\u{1b}'));
        assert!(rendered.contains("0.7000"));
    }

    #[test]
    fn test_every_style_renders_all_values() {
        for style in [
            TableStyle::Rounded,
            TableStyle::Full,
            TableStyle::Condensed,
            TableStyle::Ascii,
            TableStyle::Markdown,
            TableStyle::Plain,
        ] {
            let table = filled(TableConfig::new().with_colors(false).with_style(style));
            let rendered = table.render();
            for expected in ["acc", "loss", "0.5000", "1.2000", "0.7000", "0.9000"] {
                assert!(
                    rendered.contains(expected),
                    "{} missing {expected}",
                    style.as_str()
                );
            }
        }
    }

    #[test]
    fn test_rounded_style_uses_round_corners() {
        let table = filled(TableConfig::new().with_colors(false));
        let rendered = table.render();
        assert!(rendered.starts_with('╭'));
        assert!(rendered.trim_end().ends_with('╯'));
    }
}
