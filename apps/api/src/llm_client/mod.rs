/// Gemini client — the single point of entry for all generative calls.
///
/// ARCHITECTURAL RULE: no other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all analysis calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "models/gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini returned a malformed response envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("Gemini returned no candidates")]
    NoCandidates,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
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

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Seam between the analysis pipeline and the hosted model, so the pipeline
/// can be exercised with a stub provider in tests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends one prompt and returns the raw, unparsed text completion.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes exactly one call to the Gemini API and returns the raw completion.
    /// No retries: the request handler decides what to do with a failure.
    pub async fn generate(&self, prompt: &str, model: &str) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        // The provider takes the credential as a query parameter.
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent?key={}", self.api_key);

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Gemini API returned {status}: {body}");
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Gemini returned a malformed envelope: {e}; body: {body}");
            LlmError::Envelope(e)
        })?;

        match envelope.first_text() {
            Some(text) => {
                debug!("Gemini call succeeded: {} completion bytes", text.len());
                Ok(text.to_string())
            }
            None => {
                warn!("Gemini returned no candidates; body: {body}");
                Err(LlmError::NoCandidates)
            }
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate(prompt, MODEL).await
    }
}
