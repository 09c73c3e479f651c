//! Subcommand implementations and shared output helpers.

pub mod bookings;
pub mod listings;
pub mod lookups;
pub mod settings;
pub mod transactions;
pub mod users;

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use rentdesk_admin::api::ApiError;
use rentdesk_admin::config::ConfigError;
use rentdesk_core::Pagination;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The state machine forbids the requested move; the backend was not called.
    #[error("Cannot move {what} from {from} to {to}")]
    IllegalTransition {
        what: String,
        from: String,
        to: String,
    },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Plain-text table with left-aligned, padded columns.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub const fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table, one line per row, trailing spaces trimmed.
    #[must_use]
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let mut out = vec![render_line(self.headers.iter().copied(), &widths)];
        out.extend(
            self.rows
                .iter()
                .map(|row| render_line(row.iter().map(String::as_str), &widths)),
        );
        out.join("\n")
    }
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Write a table, or `empty` when it has no rows.
///
/// # Errors
///
/// Returns an IO error if stdout is closed.
pub fn print_table(table: &Table, empty: &str) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if table.is_empty() {
        writeln!(out, "{empty}")?;
    } else {
        writeln!(out, "{}", table.render())?;
    }
    Ok(())
}

/// Write a page footer such as `Page 2 of 5 (73 total)`.
///
/// # Errors
///
/// Returns an IO error if stdout is closed.
pub fn print_page_footer(pagination: &Pagination) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    writeln!(
        out,
        "\nPage {} of {} ({} total)",
        pagination.page,
        pagination.page_count().max(1),
        pagination.total
    )?;
    Ok(())
}

/// Write `label: value` lines with aligned values.
///
/// # Errors
///
/// Returns an IO error if stdout is closed.
pub fn print_details(fields: &[(&str, String)]) -> Result<(), CliError> {
    let width = fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut out = std::io::stdout().lock();
    for (label, value) in fields {
        writeln!(out, "{label:<width$}  {value}")?;
    }
    Ok(())
}

/// Write one line of text.
///
/// # Errors
///
/// Returns an IO error if stdout is closed.
pub fn print_line(text: &str) -> Result<(), CliError> {
    writeln!(std::io::stdout().lock(), "{text}")?;
    Ok(())
}

/// Pretty-print any serializable value as JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// `value` or `-` when absent or blank.
#[must_use]
pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| "-".to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_render_pads_columns() {
        let mut table = Table::new(vec!["ID", "Status"]);
        table.row(vec!["7".to_string(), "pending".to_string()]);
        table.row(vec!["1042".to_string(), "ok".to_string()]);
        assert_eq!(
            table.render(),
            "ID    Status\n7     pending\n1042  ok"
        );
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(vec!["ID"]);
        assert!(table.is_empty());
        assert_eq!(table.render(), "ID");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(Some("Lisbon")), "Lisbon");
    }

    #[test]
    fn test_illegal_transition_message() {
        let err = CliError::IllegalTransition {
            what: "booking #4".to_string(),
            from: "completed".to_string(),
            to: "pending".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot move booking #4 from completed to pending"
        );
    }
}
