// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::extract::Schema;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub export: ExportOptions,
    pub analysis: AnalysisOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    out_dir: PathBuf,
    /// Forces a schema variant instead of detecting it from the header.
    pub schema: Option<Schema>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            schema: None,
        }
    }
}

impl ExportOptions {
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Parse GUI/CLI text into the output directory. Empty text restores the default.
    pub fn set_out_dir(&mut self, text: &str) {
        let s = text.trim();
        self.out_dir = if s.is_empty() {
            PathBuf::from(DEFAULT_OUT_DIR)
        } else {
            PathBuf::from(crate::file::normalize_separators(s))
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub model: String,
    pub base_url: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            model: s!(GEMINI_MODEL),
            base_url: s!(GEMINI_BASE_URL),
        }
    }
}
