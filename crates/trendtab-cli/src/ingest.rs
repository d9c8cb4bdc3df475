//! JSON Lines input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use trendtab_core::Table;
use trendtab_model::Record;

use crate::surface::TerminalSurface;

/// Parses one line into a record.
///
/// Blank lines yield `Ok(None)`. Anything other than a JSON object is an
/// error.
pub fn parse_line(line: &str) -> Result<Option<Record>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(line).context("invalid JSON")?;
    match Record::from_json(value) {
        Some(record) => Ok(Some(record)),
        None => bail!("expected a JSON object"),
    }
}

/// A line that could not be turned into a record.
#[derive(Debug)]
pub struct SkippedLine {
    pub line_number: usize,
    pub error: anyhow::Error,
}

/// Iterates the records of a JSON Lines stream.
///
/// Read failures end the iteration with an error; malformed lines are
/// reported as [`SkippedLine`] so the caller can decide what to do.
pub fn records<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<std::result::Result<Record, SkippedLine>>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = match line {
                Ok(line) => line,
                Err(error) => return Some(Err(anyhow::Error::new(error).context("read input"))),
            };
            match parse_line(&line) {
                Ok(Some(record)) => Some(Ok(Ok(record))),
                Ok(None) => None,
                Err(error) => Some(Ok(Err(SkippedLine {
                    line_number: index + 1,
                    error,
                }))),
            }
        })
}

/// Counts from one pass over an input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub rows: usize,
    pub skipped: usize,
}

/// Adds every record of `reader` to `table`, presenting after each row.
///
/// Malformed lines and rows the table rejects are logged and skipped.
pub fn feed<R, W>(
    table: &mut Table,
    reader: R,
    surface: &mut TerminalSurface<W>,
) -> Result<FeedSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = FeedSummary::default();
    for item in records(reader) {
        match item? {
            Ok(record) => match table.add_row(record) {
                Ok(()) => {
                    summary.rows += 1;
                    surface.present(&table.render()).context("draw table")?;
                }
                Err(error) => {
                    warn!(row = summary.rows + 1, %error, "rejected row");
                    summary.skipped += 1;
                }
            },
            Err(SkippedLine { line_number, error }) => {
                warn!(line = line_number, error = %format!("{error:#}"), "skipping input line");
                summary.skipped += 1;
            }
        }
    }
    info!(
        rows = summary.rows,
        skipped = summary.skipped,
        columns = table.headers().len(),
        "input finished"
    );
    Ok(summary)
}
