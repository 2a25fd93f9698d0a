// src/file.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::config::consts::EXPORT_PREFIX;

/// `relatorio_guerra_<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("{}{}.csv", EXPORT_PREFIX, date.format("%Y-%m-%d"))
}

/// Write the CSV text into `dir`, creating it if needed. Returns the final path.
/// Same-day exports overwrite each other, one report per day.
pub fn write_export(dir: &Path, date: NaiveDate, contents: &str) -> Result<PathBuf, Box<dyn Error>> {
    if !dir.as_os_str().is_empty() {
        ensure_directory(dir)?;
    }
    let path = dir.join(export_filename(date));
    fs::write(&path, contents.as_bytes())?;
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}
