//! Renders rectangular grids of text for fixed-width chat display.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::errors::RenderError;

/// How a grid is rendered for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Aligned monospace table.
    #[default]
    Table,
    /// Comma-separated values, CRLF rows, no padding.
    Csv,
    /// Tab-separated values, CRLF rows, no padding.
    Tsv,
}

impl TableFormat {
    pub const CHOICES: [&'static str; 3] = ["table", "csv", "tsv"];

    /// Forgiving parse for render call sites: anything unrecognized
    /// falls back to `table`.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
#[error("unknown format `{0}`, expected `table`, `csv` or `tsv`")]
pub struct UnknownFormat(String);

impl FromStr for TableFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}

/// Renders `rows` in the given format. Rows must be rectangular and
/// non-empty; a ragged or empty grid signals malformed input rather
/// than rendering something misleading.
pub fn render(format: TableFormat, rows: &[Vec<String>]) -> Result<String, RenderError> {
    let columns = rows.first().ok_or(RenderError::NoRows)?.len();

    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns {
            return Err(RenderError::Ragged {
                row: index,
                expected: columns,
                found: row.len(),
            });
        }
    }

    Ok(match format {
        TableFormat::Csv => delimited(rows, ","),
        TableFormat::Tsv => delimited(rows, "\t"),
        TableFormat::Table => framed(rows, columns),
    })
}

fn delimited(rows: &[Vec<String>], separator: &str) -> String {
    rows.iter()
        .map(|row| row.join(separator) + "\r\n")
        .collect()
}

/// Every cell is padded to the widest cell in the grid, centered with
/// the extra space on the right, and each row sits between rule lines.
fn framed(rows: &[Vec<String>], columns: usize) -> String {
    let widest = rows
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0);

    let rule = "-".repeat(columns * (widest + 3) + 1);
    let mut out = String::new();

    out.push_str(&rule);
    out.push_str("\r\n");

    for row in rows {
        out.push('|');
        for cell in row {
            out.push(' ');
            out.push_str(&pad_center(cell, widest));
            out.push_str(" |");
        }
        out.push_str("\r\n");
        out.push_str(&rule);
        out.push_str("\r\n");
    }

    out
}

fn pad_center(cell: &str, width: usize) -> String {
    let spaces = width.saturating_sub(cell.chars().count());
    let left = spaces / 2;
    let right = spaces - left;

    format!("{}{cell}{}", " ".repeat(left), " ".repeat(right))
}
