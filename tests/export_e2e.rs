// tests/export_e2e.rs
//
// Load -> sort -> export through the command layer, no UI.
use std::fs;
use std::path::PathBuf;

use war_report::commands::{Command, CommandError, CommandRegistry, Outcome};
use war_report::config::options::AppOptions;
use war_report::context::AppContext;
use war_report::credentials::MemoryStore;
use war_report::csv::{to_csv, CsvError};
use war_report::extract::{PlayerRecord, Schema};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("war_report_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    p
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn context(out: &PathBuf) -> AppContext {
    let mut opts = AppOptions::default();
    opts.export.set_out_dir(out.to_str().unwrap());
    AppContext::new(Box::new(MemoryStore::default()), opts)
}

#[test]
fn csv_matches_exact_text() {
    let rec = PlayerRecord {
        name: "Ana, B".into(),
        decks_used: "5".into(),
        fame: "100".into(),
        status: "OK".into(),
    };
    let out = to_csv(&[rec], &["Nome", "Decks", "Fama", "Status"], Schema::Full).unwrap();
    assert_eq!(out, "Nome,Decks,Fama,Status\nAna B,5,100,OK");
}

#[test]
fn sorted_page_exports_in_view_order() {
    let dir = tmp_dir("sorted");
    let mut ctx = context(&dir);
    let reg = CommandRegistry::default();

    let loaded = ctx.dispatch(reg.resolve("load-table", Some(fixture("war_page.html").as_str())).unwrap()).unwrap();
    assert_eq!(loaded, Outcome::Loaded { rows: 4, schema: Schema::Full });

    ctx.dispatch(reg.resolve("header-click", Some("decks")).unwrap()).unwrap();
    let Outcome::Exported(path) = ctx.dispatch(Command::ExportCsv).unwrap() else {
        panic!("expected an export");
    };

    assert!(path.starts_with(&dir));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("relatorio_guerra_") && name.ends_with(".csv"));

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Nome do Jogador,Decks Usados,Fama,Status");
    assert_eq!(lines[1], "bruno,2,500,Crítico");
    assert_eq!(lines[2], "Ana B,9,1800,Atenção");
    assert_eq!(lines[4], "Élodie,10,2400,OK");
    assert!(!text.ends_with('\n'));
}

#[test]
fn copy_and_export_agree() {
    let dir = tmp_dir("copy");
    let mut ctx = context(&dir);
    ctx.dispatch(Command::LoadTable(fixture("war_page.html"))).unwrap();

    let Outcome::Copied(copied) = ctx.dispatch(Command::CopyCsv).unwrap() else {
        panic!("expected copied text");
    };
    let Outcome::Exported(path) = ctx.dispatch(Command::ExportCsv).unwrap() else {
        panic!("expected an export");
    };
    assert_eq!(fs::read_to_string(path).unwrap(), copied);
}

#[test]
fn empty_table_writes_nothing() {
    let dir = tmp_dir("empty");
    let mut ctx = context(&dir);
    ctx.dispatch(Command::LoadTable(fixture("placeholder_page.html"))).unwrap();

    let err = ctx.dispatch(Command::ExportCsv).unwrap_err();
    assert!(matches!(err, CommandError::Csv(CsvError::NothingToExport)));
    assert_eq!(err.user_message(), "Não há dados para exportar.");
    assert!(!dir.exists());

    assert!(matches!(ctx.dispatch(Command::CopyCsv), Err(CommandError::Csv(_))));
}

#[test]
fn schema_override_beats_detection() {
    let dir = tmp_dir("override");
    let mut ctx = context(&dir);
    ctx.options.export.schema = Some(Schema::Compact);
    ctx.dispatch(Command::LoadTable(fixture("war_page.html"))).unwrap();
    // Four-cell rows do not fit the compact shape
    assert!(ctx.records().is_empty());
}

#[test]
fn missing_source_is_a_load_error() {
    let mut ctx = context(&tmp_dir("missing"));
    let err = ctx.dispatch(Command::LoadTable(fixture("does_not_exist.html"))).unwrap_err();
    assert!(matches!(err, CommandError::Load(_)));
}
