// src/commands.rs
//
// Named triggers -> Command -> AppContext::dispatch -> Outcome.
// The GUI and CLI never call the handlers directly.

use std::{collections::HashMap, path::PathBuf};

use thiserror::Error;

use crate::{
    analysis::AnalysisError,
    config::state::Tab,
    context::{AppContext, Readiness},
    credentials::CredentialError,
    csv::CsvError,
    extract::Schema,
    sort::SortOutcome,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    LoadTable(String),
    SortBy(String),
    ExportCsv,
    CopyCsv,
    Analyze,
    SaveApiKey(String),
    ClearApiKey,
    SwitchTab(Tab),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Loaded { rows: usize, schema: Schema },
    Sorted(SortOutcome),
    Exported(PathBuf),
    Copied(String),
    AnalysisStarted,
    KeySaved(Readiness),
    KeyCleared(Readiness),
    TabSwitched(Tab),
}

impl Outcome {
    /// Status-line text.
    pub fn message(&self) -> String {
        match self {
            Outcome::Loaded { rows, schema } => format!("Tabela carregada: {} linha(s), formato {:?}", rows, schema),
            Outcome::Sorted(SortOutcome::Sorted { direction, .. }) => format!("Ordenado {}", direction.arrow()),
            Outcome::Sorted(SortOutcome::UnknownColumn) => s!("Coluna desconhecida; nada foi alterado."),
            Outcome::Exported(p) => format!("CSV exportado: {}", p.display()),
            Outcome::Copied(_) => s!("CSV copiado para a área de transferência."),
            Outcome::AnalysisStarted => s!(crate::analysis::MSG_BUSY),
            Outcome::KeySaved(_) => s!("Chave da API salva."),
            Outcome::KeyCleared(_) => s!("Chave da API removida."),
            Outcome::TabSwitched(t) => s!(t.title()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown trigger: {0}")]
    UnknownTrigger(String),
    #[error("trigger {0} needs a value")]
    MissingPayload(&'static str),
    #[error("unknown tab: {0}")]
    UnknownTab(String),
    #[error("load failed: {0}")]
    Load(String),
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error("export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl CommandError {
    pub fn user_message(&self) -> String {
        match self {
            CommandError::Csv(e) => e.to_string(),
            CommandError::Analysis(e) => s!(e.user_message()),
            CommandError::Credential(CredentialError::Empty) => s!("Por favor, insira uma chave de API válida."),
            CommandError::Credential(e) => format!("Erro ao salvar a chave: {}", e),
            other => other.to_string(),
        }
    }
}

type Builder = fn(Option<&str>) -> Result<Command, CommandError>;

/// Trigger name -> command builder.
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Builder>,
}

fn payload(name: &'static str, v: Option<&str>) -> Result<String, CommandError> {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s!(s)),
        _ => Err(CommandError::MissingPayload(name)),
    }
}

fn tab_from(v: &str) -> Option<Tab> {
    match v.trim().to_ascii_lowercase().as_str() {
        "table" | "tabela" => Some(Tab::Table),
        "analysis" | "analise" | "análise" => Some(Tab::Analysis),
        "settings" | "config" => Some(Tab::Settings),
        _ => None,
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut r = Self { handlers: HashMap::new() };
        r.register("load-table", |v| Ok(Command::LoadTable(payload("load-table", v)?)));
        r.register("header-click", |v| Ok(Command::SortBy(payload("header-click", v)?)));
        r.register("export-csv-btn", |_| Ok(Command::ExportCsv));
        r.register("copy-csv-btn", |_| Ok(Command::CopyCsv));
        r.register("generate-ai-btn", |_| Ok(Command::Analyze));
        // Empty keys go through to the store, which rejects them with a message
        r.register("save-api-key", |v| Ok(Command::SaveApiKey(s!(v.unwrap_or("")))));
        r.register("clear-api-key", |_| Ok(Command::ClearApiKey));
        r.register("tab", |v| {
            let name = payload("tab", v)?;
            tab_from(&name).map(Command::SwitchTab).ok_or(CommandError::UnknownTab(name))
        });
        r
    }
}

impl CommandRegistry {
    pub fn register(&mut self, trigger: &'static str, build: Builder) {
        self.handlers.insert(trigger, build);
    }

    pub fn resolve(&self, trigger: &str, payload: Option<&str>) -> Result<Command, CommandError> {
        let build = self
            .handlers
            .get(trigger)
            .ok_or_else(|| CommandError::UnknownTrigger(s!(trigger)))?;
        build(payload)
    }
}

impl AppContext {
    pub fn dispatch(&mut self, cmd: Command) -> Result<Outcome, CommandError> {
        logd!("Command: {:?}", redact(&cmd));
        match cmd {
            Command::LoadTable(src) => {
                let rows = self.load_table(&src).map_err(|e| {
                    loge!("Load: {}", e);
                    CommandError::Load(e.to_string())
                })?;
                Ok(Outcome::Loaded { rows, schema: self.schema })
            }
            Command::SortBy(key) => Ok(Outcome::Sorted(self.sort_by(&key))),
            Command::ExportCsv => {
                // An empty table fails here, before the file system is touched
                let text = self.csv_text()?;
                let path = self.write_csv(&text, AppContext::export_date()).map_err(|e| {
                    loge!("Export: {}", e);
                    CommandError::Export(e.to_string())
                })?;
                Ok(Outcome::Exported(path))
            }
            Command::CopyCsv => Ok(Outcome::Copied(self.csv_text()?)),
            Command::Analyze => {
                self.start_analysis()?;
                Ok(Outcome::AnalysisStarted)
            }
            Command::SaveApiKey(key) => Ok(Outcome::KeySaved(self.save_api_key(&key)?)),
            Command::ClearApiKey => Ok(Outcome::KeyCleared(self.clear_api_key()?)),
            Command::SwitchTab(tab) => Ok(Outcome::TabSwitched(tab)),
        }
    }
}

/// Keeps keys out of the debug log.
fn redact(cmd: &Command) -> Command {
    match cmd {
        Command::SaveApiKey(_) => Command::SaveApiKey(s!("***")),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_routes_known_triggers() {
        let r = CommandRegistry::default();
        assert_eq!(r.resolve("header-click", Some("decks")).unwrap(), Command::SortBy(s!("decks")));
        assert_eq!(r.resolve("export-csv-btn", None).unwrap(), Command::ExportCsv);
        assert_eq!(r.resolve("generate-ai-btn", None).unwrap(), Command::Analyze);
        assert_eq!(r.resolve("tab", Some("Settings")).unwrap(), Command::SwitchTab(Tab::Settings));
        assert_eq!(r.resolve("save-api-key", None).unwrap(), Command::SaveApiKey(s!()));
    }

    #[test]
    fn registry_errors() {
        let r = CommandRegistry::default();
        assert!(matches!(r.resolve("nope", None), Err(CommandError::UnknownTrigger(_))));
        assert!(matches!(r.resolve("header-click", Some("  ")), Err(CommandError::MissingPayload("header-click"))));
        assert!(matches!(r.resolve("tab", Some("x")), Err(CommandError::UnknownTab(_))));
    }

    #[test]
    fn save_key_is_redacted() {
        assert_eq!(redact(&Command::SaveApiKey(s!("secret"))), Command::SaveApiKey(s!("***")));
    }
}
