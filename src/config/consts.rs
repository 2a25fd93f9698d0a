// src/config/consts.rs

// Local store (log file lives here)
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Page contract
pub const TABLE_BODY_ID: &str = "player-table-body";
pub const STATUS_CLASS: &str = "status";
pub const PLACEHOLDER_MARKER: &str = "(Aguardando dados...)";
pub const SORT_ASC_CLASS: &str = "sort-ascending";
pub const SORT_DESC_CLASS: &str = "sort-descending";

// Net
pub const USER_AGENT: &str = concat!("war_report/", env!("CARGO_PKG_VERSION"));

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const EXPORT_PREFIX: &str = "relatorio_guerra_";
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

// Credentials
pub const KEYRING_SERVICE: &str = "war_report";
pub const KEYRING_USER: &str = "gemini_api_key";
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

// Gemini
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
