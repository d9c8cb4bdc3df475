//! In-place terminal presentation of a rendered table.
//!
//! On an interactive terminal every [`TerminalSurface::present`] moves the
//! cursor back to the top of the previously drawn table, clears everything
//! below it and draws the new table. Anywhere else (pipes, files) only the
//! last presented table is written, by [`TerminalSurface::finish`].

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::cursor::{MoveTo, MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

/// Owns the output writer and the height of what it last drew.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    writer: W,
    interactive: bool,
    drawn_lines: u16,
    pending: Option<String>,
}

impl TerminalSurface<Stdout> {
    /// Surface on standard output, interactive when stdout is a terminal.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let interactive = stdout.is_terminal();
        Self::new(stdout, interactive)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, interactive: bool) -> Self {
        Self {
            writer,
            interactive,
            drawn_lines: 0,
            pending: None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Replaces the previously presented table with `table`.
    pub fn present(&mut self, table: &str) -> io::Result<()> {
        if !self.interactive {
            self.pending = Some(table.to_string());
            return Ok(());
        }
        if self.drawn_lines > 0 {
            queue!(
                self.writer,
                MoveUp(self.drawn_lines),
                MoveToColumn(0),
                Clear(ClearType::FromCursorDown)
            )?;
        }
        for line in table.lines() {
            queue!(self.writer, Print(line), Print("\r\n"))?;
        }
        self.drawn_lines = u16::try_from(table.lines().count()).unwrap_or(u16::MAX);
        self.writer.flush()
    }

    /// Clears the whole screen, then presents `table` at the top.
    pub fn clear_and_present(&mut self, table: &str) -> io::Result<()> {
        if self.interactive {
            queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
            self.drawn_lines = 0;
        }
        self.present(table)
    }

    /// Writes any deferred table and hands back the writer.
    ///
    /// The cursor is left on the line below the table.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(table) = self.pending.take()
            && !table.is_empty()
        {
            writeln!(self.writer, "{table}")?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_writes_only_last_table() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.present("first").expect("present");
        surface.present("second\nrow").expect("present");
        let output = surface.finish().expect("finish");
        assert_eq!(String::from_utf8(output).expect("utf8"), "second\nrow\n");
    }

    #[test]
    fn test_non_interactive_without_table_writes_nothing() {
        let surface = TerminalSurface::new(Vec::new(), false);
        assert!(surface.finish().expect("finish").is_empty());
    }

    #[test]
    fn test_interactive_redraw_moves_cursor_up() {
        let mut surface = TerminalSurface::new(Vec::new(), true);
        surface.present("a\nb").expect("present");
        surface.present("c\nd\ne").expect("present");
        let output = String::from_utf8(surface.finish().expect("finish")).expect("utf8");
        // CSI 2 A moves up over the two lines drawn first
        assert!(output.starts_with("a\r\nb\r\n\u{1b}[2A"));
        assert!(output.ends_with("c\r\nd\r\ne\r\n"));
    }

    #[test]
    fn test_clear_and_present_clears_screen() {
        let mut surface = TerminalSurface::new(Vec::new(), true);
        surface.clear_and_present("x").expect("present");
        let output = String::from_utf8(surface.finish().expect("finish")).expect("utf8");
        assert!(output.starts_with("\u{1b}[2J"));
        assert!(output.ends_with("x\r\n"));
    }
}
