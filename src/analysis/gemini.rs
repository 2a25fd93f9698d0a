// src/analysis/gemini.rs
//
// Gemini `generateContent`, blocking, one request per analysis.
// No timeout, retry or cancellation: a failure is reported once.

use serde::{Deserialize, Serialize};

use super::{AnalysisError, Analyzer};
use crate::config::consts::USER_AGENT;
use crate::config::options::AnalysisOptions;

/* ---------------- Wire types ---------------- */

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if any.
    pub(crate) fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/* ---------------- Client ---------------- */

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(api_key: &str, opts: &AnalysisOptions) -> Result<Self, AnalysisError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AnalysisError::MissingCredential);
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None)
            .build()
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        Ok(Self {
            api_key: s!(api_key),
            model: opts.model.clone(),
            base_url: s!(opts.base_url.trim_end_matches('/')),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl Analyzer for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let body = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
        };

        logd!("Gemini: POST {} (prompt {} chars)", self.endpoint(), prompt.chars().count());
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(AnalysisError::Api { status: status.as_u16(), body: text });
        }

        let parsed: GenerateResponse = resp
            .json()
            .map_err(|e| AnalysisError::Decode(e.to_string()))?;
        parsed.text().ok_or(AnalysisError::EmptyResponse)
    }
}
