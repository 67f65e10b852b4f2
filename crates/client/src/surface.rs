//! Display targets for the results view.
//!
//! A [`Surface`] is everything the view is allowed to touch: a status line,
//! a blocking alert, and the results table.

use std::io::Write;

use crate::format::{ResultRow, COLUMNS};

/// Output side of the results view.
pub trait Surface: Send {
    /// Replace the status line.
    fn set_status(&mut self, text: &str);

    /// Show a message the user must acknowledge.
    fn alert(&mut self, message: &str);

    /// Replace the table body with `rows` and make the table visible.
    fn show_rows(&mut self, rows: &[ResultRow]);

    /// Hide the table.
    fn hide_table(&mut self);
}

// ---------------------------------------------------------------------------
// RecordingSurface
// ---------------------------------------------------------------------------

/// In-memory surface that keeps the latest state plus every alert raised.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub status: String,
    pub alerts: Vec<String>,
    pub rows: Vec<ResultRow>,
    pub table_visible: bool,
}

impl Surface for RecordingSurface {
    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn show_rows(&mut self, rows: &[ResultRow]) {
        self.rows = rows.to_vec();
        self.table_visible = true;
    }

    fn hide_table(&mut self) {
        self.table_visible = false;
    }
}

// ---------------------------------------------------------------------------
// TerminalSurface
// ---------------------------------------------------------------------------

/// Surface that prints to a writer (stdout for the CLI).
pub struct TerminalSurface<W: Write + Send> {
    out: W,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the surface and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    fn set_status(&mut self, text: &str) {
        self.emit(&format!("[status] {text}"));
    }

    fn alert(&mut self, message: &str) {
        self.emit(&format!("[alert] {message}"));
    }

    fn show_rows(&mut self, rows: &[ResultRow]) {
        let table = render_table(rows);
        self.emit(&table);
    }

    fn hide_table(&mut self) {
        self.emit("(no historical results)");
    }
}

/// Render rows as an aligned text table with a header and separator.
///
/// The mode column is left-aligned, numeric columns right-aligned.
pub fn render_table(rows: &[ResultRow]) -> String {
    let mut widths = COLUMNS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: [&str; 8]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(index, (cell, width))| {
                if index == 2 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(COLUMNS));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        out.push(line(row.cells.each_ref().map(String::as_str)));
    }
    out.join("\n")
}
