//! CSV and plain-text export.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::colorize::ColorOptions;
use crate::error::{Result, TableError};
use crate::render;
use crate::table::Table;

impl Table {
    /// Writes the raw values as CSV, header row first.
    ///
    /// Nothing at all is written for a table without columns.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        if self.headers().is_empty() {
            return Ok(());
        }
        csv_writer.write_record(self.headers())?;
        let columns: Vec<Vec<String>> = self
            .columns()
            .map(|column| column.raw_strings())
            .collect();
        for row in 0..self.row_count() {
            csv_writer.write_record(
                columns
                    .iter()
                    .map(|column| column.get(row).map_or("", String::as_str)),
            )?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the rendered table without colors or percentages.
    pub fn write_text<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let options = ColorOptions {
            show_percentage: false,
            colors: false,
            ..self.color_options()
        };
        let rendered = render::render(self, &options);
        if !rendered.is_empty() {
            writeln!(writer, "{rendered}")?;
        }
        writer.flush()
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_csv(BufWriter::new(file))
            .map_err(|source| TableError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), rows = self.row_count(), "exported CSV");
        Ok(())
    }

    pub fn export_text(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_text(BufWriter::new(file))
            .map_err(|source| TableError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), rows = self.row_count(), "exported text table");
        Ok(())
    }
}
