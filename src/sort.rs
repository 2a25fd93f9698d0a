// src/sort.rs
//
// Table Sorter.
//
// Two passes, so the algorithm never touches presentation:
// 1) plain key sequence (trimmed cell text per row) → permutation, stable sort
// 2) the live rows are moved into permutation order; RowIds travel with them
//
// Lookup miss on the column key is a no-op: rows and header classes stay put.

use std::cmp::Ordering;

use crate::collate::SortKey;
use crate::table::{Row, WarTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// Applies direction by negating the comparator result.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Ascending => "▲",
            Direction::Descending => "▼",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortOutcome {
    Sorted { column: usize, direction: Direction },
    UnknownColumn,
}

/// Header click toggle: same column flips, another column starts ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<(String, Direction)>,
}

impl SortState {
    pub fn click(&mut self, key: &str) -> Direction {
        let dir = match &self.current {
            Some((k, d)) if k == key => d.flipped(),
            _ => Direction::Ascending,
        };
        self.current = Some((s!(key), dir));
        dir
    }

    pub fn current(&self) -> Option<(&str, Direction)> {
        self.current.as_ref().map(|(k, d)| (k.as_str(), *d))
    }

    /// Seed from a table whose markup already shows a sorted column.
    pub fn from_table(table: &WarTable) -> Self {
        let current = table
            .headers
            .iter()
            .find_map(|h| Some((h.key.clone()?, h.sort?)));
        Self { current }
    }
}

/// Stable permutation that orders `keys`; `perm[i]` is the source index of the i-th row.
pub fn permutation(keys: &[&str], direction: Direction) -> Vec<usize> {
    let sort_keys: Vec<SortKey> = keys.iter().map(|k| SortKey::new(k.trim())).collect();
    let mut perm: Vec<usize> = (0..keys.len()).collect();
    // slice::sort_by is stable: ties keep source order in both directions
    perm.sort_by(|&a, &b| direction.apply(sort_keys[a].cmp(&sort_keys[b])));
    perm
}

/// Move rows into `perm` order without cloning them.
fn apply_permutation(rows: &mut Vec<Row>, perm: &[usize]) {
    debug_assert_eq!(rows.len(), perm.len());
    let mut slots: Vec<Option<Row>> = rows.drain(..).map(Some).collect();
    rows.extend(perm.iter().filter_map(|&i| slots[i].take()));
}

pub fn sort_by_column(table: &mut WarTable, column_key: &str, direction: Direction) -> SortOutcome {
    let Some(column) = table.column_index(column_key) else {
        logd!("Sort: unknown column {:?}, table left unchanged", column_key);
        return SortOutcome::UnknownColumn;
    };

    let perm = permutation(&table.column_texts(column), direction);
    apply_permutation(&mut table.rows, &perm);

    for (ix, h) in table.headers.iter_mut().enumerate() {
        h.sort = (ix == column).then_some(direction);
    }

    logd!("Sort: column={} ({}) dir={:?} rows={}", column_key, column, direction, table.nrows());
    SortOutcome::Sorted { column, direction }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, HeaderCell, RowId};

    fn table(col: &[&str]) -> WarTable {
        let headers = vec![
            HeaderCell { key: Some(s!("name")), label: s!("Nome"), sort: None },
            HeaderCell { key: Some(s!("decks")), label: s!("Decks"), sort: Some(Direction::Descending) },
        ];
        let rows = col
            .iter()
            .enumerate()
            .map(|(i, v)| vec![Cell::new(format!("P{i}")), Cell::new(*v)])
            .collect();
        WarTable::from_rows(headers, rows)
    }

    #[test]
    fn permutation_is_stable_for_ties() {
        assert_eq!(permutation(&["b", "a", "B", "a"], Direction::Ascending), vec![1, 3, 0, 2]);
        assert_eq!(permutation(&["b", "a", "B", "a"], Direction::Descending), vec![0, 2, 1, 3]);
    }

    #[test]
    fn sort_moves_rows_and_marks_header() {
        let mut t = table(&["9", "10", "2"]);
        let out = sort_by_column(&mut t, "decks", Direction::Ascending);
        assert_eq!(out, SortOutcome::Sorted { column: 1, direction: Direction::Ascending });
        assert_eq!(t.column_texts(1), vec!["2", "9", "10"]);
        assert_eq!(t.row_ids(), vec![RowId(2), RowId(0), RowId(1)]);
        assert_eq!(t.headers[1].css_class(), Some("sort-ascending"));
    }

    #[test]
    fn other_headers_lose_their_class() {
        let mut t = table(&["1", "2"]);
        sort_by_column(&mut t, "name", Direction::Descending);
        assert_eq!(t.headers[0].sort, Some(Direction::Descending));
        assert_eq!(t.headers[1].sort, None);
    }

    #[test]
    fn unknown_column_is_a_noop() {
        let mut t = table(&["3", "1"]);
        let before_ids = t.row_ids();
        let before_headers = t.headers.clone();
        assert_eq!(sort_by_column(&mut t, "fame", Direction::Ascending), SortOutcome::UnknownColumn);
        assert_eq!(t.row_ids(), before_ids);
        assert_eq!(t.headers, before_headers);
    }

    #[test]
    fn toggle_state() {
        let mut st = SortState::default();
        assert_eq!(st.click("decks"), Direction::Ascending);
        assert_eq!(st.click("decks"), Direction::Descending);
        assert_eq!(st.click("decks"), Direction::Ascending);
        assert_eq!(st.click("name"), Direction::Ascending);
        assert_eq!(st.current(), Some(("name", Direction::Ascending)));
    }

    #[test]
    fn state_seeds_from_markup() {
        let t = table(&[]);
        let mut st = SortState::from_table(&t);
        assert_eq!(st.current(), Some(("decks", Direction::Descending)));
        assert_eq!(st.click("decks"), Direction::Ascending);
    }
}
