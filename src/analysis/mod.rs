// src/analysis/mod.rs
//
// AI summary of the war table.
// State machine: Idle -> Pending -> Done(text) | Failed(msg).
// Only one request at a time; Pending always ends, whatever path the worker takes.

pub mod gemini;
pub mod prompt;

use std::sync::{Arc, Mutex};

use thiserror::Error;

pub use gemini::GeminiClient;
pub use prompt::{build_prompt, format_player_data};

pub const MSG_MISSING_KEY: &str =
    "A chave da API do Gemini não foi configurada. Não é possível gerar a análise.";
pub const MSG_NO_DATA: &str = "Não há dados na tabela para analisar.";
pub const MSG_FAILURE: &str =
    "Ocorreu um erro ao tentar gerar a análise. Verifique o log para mais detalhes.";
pub const MSG_BUSY: &str = "Análise em andamento...";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("no player rows to analyze")]
    NothingToAnalyze,
    #[error("an analysis is already running")]
    Busy,
    #[error("network error: {0}")]
    Network(String),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("response had no text")]
    EmptyResponse,
    #[error("analysis worker stopped without a result")]
    Abandoned,
}

impl AnalysisError {
    /// What the user sees. Transport and API details only go to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::MissingCredential => MSG_MISSING_KEY,
            AnalysisError::NothingToAnalyze => MSG_NO_DATA,
            AnalysisError::Busy => MSG_BUSY,
            _ => MSG_FAILURE,
        }
    }
}

/// Text generator behind the analysis. `GeminiClient` in production, fakes in tests.
pub trait Analyzer: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AnalysisState {
    #[default]
    Idle,
    Pending,
    Done(String),
    Failed(String),
}

impl AnalysisState {
    pub fn is_pending(&self) -> bool {
        matches!(self, AnalysisState::Pending)
    }

    /// Panel text for the current state.
    pub fn display_text(&self) -> &str {
        match self {
            AnalysisState::Idle => "",
            AnalysisState::Pending => MSG_BUSY,
            AnalysisState::Done(t) | AnalysisState::Failed(t) => t,
        }
    }
}

/// Shared handle to the analysis state. Cheap to clone into a worker thread.
#[derive(Clone, Default)]
pub struct AnalysisService {
    state: Arc<Mutex<AnalysisState>>,
}

impl AnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> AnalysisState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().map(|s| s.is_pending()).unwrap_or(false)
    }

    /// Enter Pending. Refused while another request is in flight.
    pub fn begin(&self) -> Result<PendingGuard, AnalysisError> {
        let mut st = self.state.lock().map_err(|_| AnalysisError::Abandoned)?;
        if st.is_pending() {
            return Err(AnalysisError::Busy);
        }
        *st = AnalysisState::Pending;
        Ok(PendingGuard { state: Arc::clone(&self.state), finished: false })
    }

    /// Show a precondition failure without touching a request in flight.
    pub fn reject(&self, err: &AnalysisError) {
        if let Ok(mut st) = self.state.lock() {
            if !st.is_pending() {
                *st = AnalysisState::Failed(s!(err.user_message()));
            }
        }
    }

    pub fn reset(&self) {
        if let Ok(mut st) = self.state.lock() {
            if !st.is_pending() {
                *st = AnalysisState::Idle;
            }
        }
    }

    /// Blocking: begin, generate, finish. The guard ends Pending even on panic.
    pub fn run(&self, analyzer: &dyn Analyzer, prompt: &str) -> Result<String, AnalysisError> {
        let guard = self.begin()?;
        let result = analyzer.generate(prompt);
        guard.finish(&result);
        result
    }
}

/// Holds the service in Pending. Dropping it without `finish` records a failure.
pub struct PendingGuard {
    state: Arc<Mutex<AnalysisState>>,
    finished: bool,
}

impl PendingGuard {
    pub fn finish(mut self, result: &Result<String, AnalysisError>) {
        let next = match result {
            Ok(text) => {
                logf!("Analysis: done ({} chars)", text.chars().count());
                AnalysisState::Done(text.clone())
            }
            Err(e) => {
                loge!("Analysis failed: {}", e);
                AnalysisState::Failed(s!(e.user_message()))
            }
        };
        self.set(next);
        self.finished = true;
    }

    fn set(&self, next: AnalysisState) {
        // A poisoned lock still holds our Pending; overwrite it anyway
        let mut st = match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *st = next;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if !self.finished {
            loge!("Analysis: {}", AnalysisError::Abandoned);
            self.set(AnalysisState::Failed(s!(MSG_FAILURE)));
        }
    }
}
