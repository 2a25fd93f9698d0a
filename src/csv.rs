// src/csv.rs
//
// CSV Formatter.
//
// Lossy on purpose: commas inside a field are stripped and nothing is quoted.
// Quotes and newlines pass through.

use thiserror::Error;

use crate::extract::{PlayerRecord, Schema};

pub const SEP: char = ',';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("Não há dados para exportar.")]
    NothingToExport,
}

/// Remove every separator from a field.
fn clean_field(field: &str) -> String {
    field.replace(SEP, "")
}

fn join_line<'a, I: IntoIterator<Item = &'a str>>(fields: I) -> String {
    fields
        .into_iter()
        .map(clean_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// Header labels are joined as given; only record fields are cleaned.
/// Header line + one line per record, `\n`-joined, no trailing newline.
/// An empty record set is signalled, not rendered as a header-only file.
pub fn to_csv(records: &[PlayerRecord], header_labels: &[&str], schema: Schema) -> Result<String, CsvError> {
    if records.is_empty() {
        return Err(CsvError::NothingToExport);
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header_labels.join(","));
    for r in records {
        lines.push(join_line(r.fields(schema)));
    }
    Ok(lines.join("\n"))
}
