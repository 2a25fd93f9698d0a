// src/extract.rs
//
// Row Extractor: current table state → typed player records.
// Pure; called fresh for every sort/export/analysis so edits are always seen.

use crate::config::consts::PLACEHOLDER_MARKER;
use crate::table::{Row, WarTable};

/// Table shape. The page comes in two variants across the call sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Schema {
    /// name / decks / status
    Compact,
    /// name / decks / fame / status
    Full,
}

impl Schema {
    pub fn width(self) -> usize {
        match self {
            Schema::Compact => 3,
            Schema::Full => 4,
        }
    }

    /// Default CSV header labels, in record field order.
    pub fn header_labels(self) -> &'static [&'static str] {
        match self {
            Schema::Compact => &["Nome do Jogador", "Decks Usados", "Status"],
            Schema::Full => &["Nome do Jogador", "Decks Usados", "Fama", "Status"],
        }
    }

    /// Four or more declared columns means the fame column is there.
    pub fn detect(table: &WarTable) -> Schema {
        let cols = if table.ncols() > 0 {
            table.ncols()
        } else {
            // No header row; trust the widest data row
            table.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
        };
        if cols >= Schema::Full.width() { Schema::Full } else { Schema::Compact }
    }

    pub fn parse(s: &str) -> Option<Schema> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "3" => Some(Schema::Compact),
            "full" | "4" => Some(Schema::Full),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
    pub name: String,
    pub decks_used: String,
    pub fame: String,
    pub status: String,
}

impl PlayerRecord {
    /// Field values in the schema's column order.
    pub fn fields(&self, schema: Schema) -> Vec<&str> {
        match schema {
            Schema::Compact => vec![self.name.as_str(), self.decks_used.as_str(), self.status.as_str()],
            Schema::Full => vec![self.name.as_str(), self.decks_used.as_str(), self.fame.as_str(), self.status.as_str()],
        }
    }

    /// Deck count as a number; empty or garbled text counts as zero.
    pub fn decks(&self) -> u32 {
        self.decks_used.trim().parse().unwrap_or(0)
    }
}

pub fn extract(table: &WarTable, schema: Schema) -> Vec<PlayerRecord> {
    table
        .rows
        .iter()
        .filter_map(|row| record_from_row(row, schema))
        .collect()
}

fn record_from_row(row: &Row, schema: Schema) -> Option<PlayerRecord> {
    if row.cells.len() != schema.width() || row.is_placeholder() {
        return None;
    }

    let name = row.cell_text(0);
    if name.is_empty() || name.contains(PLACEHOLDER_MARKER) {
        return None;
    }

    let status = row
        .cells
        .last()
        .and_then(|c| c.status.as_deref())
        .map(str::trim)
        .unwrap_or("");

    let fame = match schema {
        Schema::Full => s!(row.cell_text(2)),
        Schema::Compact => s!("0"),
    };

    Some(PlayerRecord {
        name: s!(name),
        decks_used: s!(row.cell_text(1)),
        fame,
        status: s!(status),
    })
}
