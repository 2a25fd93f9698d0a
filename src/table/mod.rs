// src/table/mod.rs
//! In-memory model of the participation table.
//!
//! This is what the page shows: a header row of (optionally sortable) columns and
//! a body of rows made of cells. The rows are long-lived: they are created once by
//! [`parse::parse_document`], keep their [`RowId`] for as long as the table lives,
//! and are only ever *moved* by the sorter, never rebuilt. Anything that keys
//! state off a row (selection, highlight) can rely on that id across reorders.
//!
//! Records for export/analysis are *not* stored here; they are extracted on demand
//! by `extract::extract`, so a sort or reload is always reflected.

pub mod parse;

use std::error::Error;

use crate::config::consts::{SORT_ASC_CLASS, SORT_DESC_CLASS};
use crate::core::net;
use crate::sort::Direction;

pub use parse::{parse_document, ParseError};

/// Stable identity of a body row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell {
    /// `data-column` identifier; `None` for non-sortable headers
    pub key: Option<String>,
    pub label: String,
    /// Current sort indicator for this column
    pub sort: Option<Direction>,
}

impl HeaderCell {
    pub fn css_class(&self) -> Option<&'static str> {
        match self.sort? {
            Direction::Ascending => Some(SORT_ASC_CLASS),
            Direction::Descending => Some(SORT_DESC_CLASS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Visible text, whitespace-normalized
    pub text: String,
    pub colspan: u32,
    /// Text of a nested `.status` element, if the cell has one
    pub status: Option<String>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), colspan: 1, status: None }
    }

    pub fn with_status(text: impl Into<String>, status: impl Into<String>) -> Self {
        Self { text: text.into(), colspan: 1, status: Some(status.into()) }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub cells: Vec<Cell>,
}

impl Row {
    /// Trimmed text of the cell at `ix` (empty if the row is short)
    pub fn cell_text(&self, ix: usize) -> &str {
        self.cells.get(ix).map(|c| c.text.trim()).unwrap_or("")
    }

    /// A lone cell spanning several columns: the "waiting for data" marker row.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.cells.as_slice(), [only] if only.colspan > 1)
    }
}

/// Rows are not `Clone`; the table owns them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WarTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Row>,
}

impl WarTable {
    /// Build a table from plain cell rows; ids are assigned in order.
    pub fn from_rows(headers: Vec<HeaderCell>, rows: Vec<Vec<Cell>>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| Row { id: RowId(i as u32), cells })
            .collect();
        Self { headers, rows }
    }

    pub fn ncols(&self) -> usize {
        self.headers.len()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Zero-based index of the first header whose identifier is `key`.
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.key.as_deref() == Some(key))
    }

    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Trimmed text of column `ix` for every row, in current order.
    pub fn column_texts(&self, ix: usize) -> Vec<&str> {
        self.rows.iter().map(|r| r.cell_text(ix)).collect()
    }
}

/// Load a table from a local file path or an `http(s)` URL.
pub fn load(source: &str) -> Result<WarTable, Box<dyn Error>> {
    let source = source.trim();
    let html = if net::is_url(source) {
        net::http_get(source)?
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| format!("Cannot read {}: {}", source, e))?
    };
    let table = parse_document(&html)?;
    logf!("Table: Loaded {} (cols={}, rows={})", source, table.ncols(), table.nrows());
    Ok(table)
}
