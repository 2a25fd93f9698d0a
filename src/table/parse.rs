// src/table/parse.rs
//
// HTML → WarTable.
//
// Where the ground truth lives:
// - body: `<tbody id="player-table-body">`, else the first `<table>` of the page
// - headers: every `<th>` of that table; `data-column` marks it sortable
// - status: a nested element whose class list contains `status`, inside any cell

use thiserror::Error;

use crate::config::consts::{SORT_ASC_CLASS, SORT_DESC_CLASS, STATUS_CLASS, TABLE_BODY_ID};
use crate::core::html::{attr_value, has_class, strip_tags, Doc, Span};
use crate::sort::Direction;

use super::{Cell, HeaderCell, WarTable};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("participation table not found (no #player-table-body and no <table>)")]
    TableNotFound,
}

pub fn parse_document(html: &str) -> Result<WarTable, ParseError> {
    let doc = Doc::new(html);

    let body = doc.find_with_attr("tbody", "id", TABLE_BODY_ID);
    let table = match body {
        // The table that encloses the body, for its headers
        Some(b) => enclosing_table(&doc, b),
        None => doc.next_element("table", 0),
    };
    if body.is_none() && table.is_none() {
        return Err(ParseError::TableNotFound);
    }

    let headers = match table {
        Some(t) => read_headers(&doc, t),
        None => Vec::new(),
    };

    // Rows come from the body when we have one; otherwise from the table itself,
    // descending into a plain <tbody> if present.
    let row_scope = body
        .or_else(|| table.and_then(|t| doc.elements("tbody", Some(t)).into_iter().next()))
        .or(table);

    let rows = row_scope
        .map(|scope| {
            doc.elements("tr", Some(scope))
                .into_iter()
                .map(|tr| read_cells(&doc, tr))
                .filter(|cells| !cells.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let table = WarTable::from_rows(headers, rows);
    logd!("Parse: headers={}, rows={}", table.ncols(), table.nrows());
    Ok(table)
}

/* ---------- helpers ---------- */

/// Last `<table>` opened before `inner` that also closes after it.
fn enclosing_table(doc: &Doc, inner: Span) -> Option<Span> {
    let mut best = None;
    let mut pos = 0;
    while let Some(t) = doc.next_element("table", pos) {
        if t.start > inner.start { break; }
        if t.end >= inner.end { best = Some(t); }
        pos = t.open_end;
    }
    best
}

fn read_headers(doc: &Doc, table: Span) -> Vec<HeaderCell> {
    // <th> may sit in <thead><tr> or directly in the first <tr>; scan the
    // whole table but stay out of the body rows.
    doc.elements("thead", Some(table))
        .first()
        .map(|thead| doc.elements("th", Some(*thead)))
        .unwrap_or_else(|| {
            doc.elements("tr", Some(table))
                .first()
                .map(|tr| doc.elements("th", Some(*tr)))
                .unwrap_or_default()
        })
        .into_iter()
        .map(|th| {
            let open = doc.open_tag(th);
            let sort = if has_class(open, SORT_ASC_CLASS) {
                Some(Direction::Ascending)
            } else if has_class(open, SORT_DESC_CLASS) {
                Some(Direction::Descending)
            } else {
                None
            };
            HeaderCell {
                key: attr_value(open, "data-column").map(|k| k.trim().to_string()).filter(|k| !k.is_empty()),
                label: strip_tags(doc.inner(th)),
                sort,
            }
        })
        .collect()
}

fn read_cells(doc: &Doc, tr: Span) -> Vec<Cell> {
    doc.elements("td", Some(tr))
        .into_iter()
        .map(|td| {
            let open = doc.open_tag(td);
            let colspan = attr_value(open, "colspan")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(1);
            Cell {
                text: strip_tags(doc.inner(td)),
                colspan,
                status: read_status(doc.inner(td)),
            }
        })
        .collect()
}

/// Text of the first element inside the cell carrying the `status` class, whatever its tag.
fn read_status(cell_html: &str) -> Option<String> {
    let cell = Doc::new(cell_html);
    cell.first_with_class(STATUS_CLASS).map(|el| strip_tags(cell.inner(el)))
}
