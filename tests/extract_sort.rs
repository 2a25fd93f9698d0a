// tests/extract_sort.rs
//
// Extraction and sorting against a parsed page.
use war_report::extract::{extract, Schema};
use war_report::sort::{sort_by_column, Direction, SortOutcome};
use war_report::table::{parse_document, WarTable};

fn page() -> WarTable {
    parse_document(include_str!("fixtures/war_page.html")).unwrap()
}

fn names(t: &WarTable) -> Vec<String> {
    extract(t, Schema::Full).into_iter().map(|r| r.name).collect()
}

#[test]
fn page_parses_into_full_schema() {
    let t = page();
    assert_eq!(Schema::detect(&t), Schema::Full);
    let recs = extract(&t, Schema::Full);
    assert_eq!(recs.len(), 4);
    assert_eq!(recs[1].name, "bruno");
    assert_eq!(recs[1].status, "Crítico");
    assert_eq!(recs[0].fame, "2,400");
}

#[test]
fn extraction_is_deterministic() {
    let t = page();
    assert_eq!(extract(&t, Schema::Full), extract(&t, Schema::Full));
}

#[test]
fn numeric_column_sorts_by_value() {
    let mut t = page();
    let out = sort_by_column(&mut t, "decks", Direction::Ascending);
    assert_eq!(out, SortOutcome::Sorted { column: 1, direction: Direction::Ascending });
    let decks: Vec<String> = extract(&t, Schema::Full).into_iter().map(|r| r.decks_used).collect();
    assert_eq!(decks, ["2", "9", "9", "10"]);
    // ties keep page order
    assert_eq!(names(&t), ["bruno", "Ana, B", "Carlos", "Élodie"]);
}

#[test]
fn names_ignore_case_and_accents() {
    let mut t = page();
    sort_by_column(&mut t, "name", Direction::Ascending);
    assert_eq!(names(&t), ["Ana, B", "bruno", "Carlos", "Élodie"]);
}

#[test]
fn toggled_direction_reverses_distinct_keys() {
    let mut t = page();
    sort_by_column(&mut t, "name", Direction::Ascending);
    let asc = names(&t);
    sort_by_column(&mut t, "name", Direction::Descending);
    let mut desc = names(&t);
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn resorting_is_idempotent_and_keeps_row_ids() {
    let mut t = page();
    sort_by_column(&mut t, "decks", Direction::Descending);
    let ids = t.row_ids();
    sort_by_column(&mut t, "decks", Direction::Descending);
    assert_eq!(t.row_ids(), ids);
}

#[test]
fn unknown_column_is_a_no_op() {
    let mut t = page();
    let before = t.row_ids();
    assert_eq!(sort_by_column(&mut t, "trophies", Direction::Ascending), SortOutcome::UnknownColumn);
    assert_eq!(t.row_ids(), before);
    assert!(t.headers.iter().all(|h| h.sort.is_none()));
}

#[test]
fn header_marker_follows_sorted_column() {
    let mut t = page();
    sort_by_column(&mut t, "fame", Direction::Descending);
    assert_eq!(t.headers[2].sort, Some(Direction::Descending));
    assert_eq!(t.headers[2].css_class(), Some("sort-descending"));
    sort_by_column(&mut t, "name", Direction::Ascending);
    assert_eq!(t.headers[2].sort, None);
    assert_eq!(t.headers[0].sort, Some(Direction::Ascending));
}

#[test]
fn placeholder_only_table_extracts_nothing() {
    let t = parse_document(include_str!("fixtures/placeholder_page.html")).unwrap();
    assert_eq!(Schema::detect(&t), Schema::Compact);
    assert_eq!(t.nrows(), 1);
    assert!(extract(&t, Schema::Compact).is_empty());
}
