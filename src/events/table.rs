//! Textual event tables as printed by the backend.

use tracing::trace;

use crate::error::{Result, ZkError};

/// Number of lines the backend prints before the first data row.
pub const HEADER_LINES: usize = 3;

/// A backend table split into its fixed header and its data rows.
///
/// Leading blank lines and trailing blank rows are ignored; everything
/// else is kept byte-for-byte. The first [`HEADER_LINES`] lines are treated
/// as header regardless of their content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTable<'a> {
    header: Vec<&'a str>,
    rows: Vec<&'a str>,
}

impl<'a> EventTable<'a> {
    /// Split a payload into header and rows.
    ///
    /// Fails with [`ZkError::MalformedEventTable`] when the payload has
    /// fewer than [`HEADER_LINES`] lines.
    pub fn parse(payload: &'a str) -> Result<Self> {
        let mut lines: Vec<&str> = payload
            .lines()
            .skip_while(|line| line.trim().is_empty())
            .collect();

        if lines.len() < HEADER_LINES {
            return Err(ZkError::MalformedEventTable { lines: lines.len() });
        }

        let mut rows = lines.split_off(HEADER_LINES);
        while rows.last().is_some_and(|row| row.trim().is_empty()) {
            rows.pop();
        }

        trace!(rows = rows.len(), "Parsed event table");
        Ok(Self {
            header: lines,
            rows,
        })
    }

    pub fn header(&self) -> &[&'a str] {
        &self.header
    }

    pub fn rows(&self) -> &[&'a str] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Keep the header and the last `count` rows, in their original order.
    ///
    /// A `count` of zero or less keeps no rows; a `count` larger than the
    /// table keeps all of them.
    #[must_use]
    pub fn tail(&self, count: i64) -> Self {
        let keep = usize::try_from(count).unwrap_or(0).min(self.rows.len());
        Self {
            header: self.header.clone(),
            rows: self.rows[self.rows.len() - keep..].to_vec(),
        }
    }

    /// Render back to text, one line per entry, each newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.header.iter().chain(&self.rows) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Tail-N slice of a raw backend payload.
pub fn tail_rows(payload: &str, count: i64) -> Result<String> {
    Ok(EventTable::parse(payload)?.tail(count).render())
}
