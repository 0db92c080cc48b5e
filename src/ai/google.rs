//! Google Gemini API client.
//!
//! Provides the Gemini-backed [`Advisor`] used for scene suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use scene_validator::ai::google::GeminiClient;
//! use scene_validator::ai::Advisor;
//!
//! let client = GeminiClient::with_key("my-key".to_string());
//! let text = client.advise(&serde_json::json!({"id": "s1"}))?;
//! println!("{}", text);
//! # Ok::<(), scene_validator::ai::AdvisoryError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY`: Required. Your Google API key with Gemini access.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::prompt::PromptBuilder;
use super::{Advisor, AdvisoryError};
use crate::config::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    base_url: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GeminiClient {
    /// Create a new Gemini client with a specific API key
    pub fn with_key(api_key: String) -> Self {
        GeminiClient {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            base_url: API_BASE_URL.to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum tokens for response
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Point the client at another host (proxies, local test servers)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt to the API and return the generated text
    pub fn send_message(&self, user_message: &str, system_prompt: Option<&str>) -> Result<String, AdvisoryError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_request_body(user_message, system_prompt);

        debug!("Sending Gemini request to model {}", self.model);
        let response = self
            .agent
            .post(&url)
            .set("x-goog-api-key", &self.api_key)
            .send_json(body);

        match response {
            Ok(response) => {
                let text = response.into_string().map_err(|e| AdvisoryError::RequestFailed {
                    message: format!("Failed to read response body: {}", e),
                })?;
                parse_success_response(&text)
            }
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                Err(parse_error_response(&text, status))
            }
            Err(ureq::Error::Transport(transport)) => Err(AdvisoryError::RequestFailed {
                message: transport.to_string(),
            }),
        }
    }

    fn build_request_body(&self, user_message: &str, system_prompt: Option<&str>) -> Value {
        let mut body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": user_message }]
                }
            ],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens
            }
        });

        if let Some(system) = system_prompt {
            body["system_instruction"] = json!({ "parts": [{ "text": system }] });
        }

        body
    }
}

impl Advisor for GeminiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn advise(&self, scene: &Value) -> Result<String, AdvisoryError> {
        let prompt = PromptBuilder::new().with_scene(scene).build();
        self.send_message(&prompt, Some(PromptBuilder::system_prompt()))
    }
}

/// Join the text parts of the first candidate
fn parse_success_response(body: &str) -> Result<String, AdvisoryError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| AdvisoryError::ParseError {
            message: e.to_string(),
        })?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AdvisoryError::EmptyResponse);
    }
    Ok(text)
}

fn parse_error_response(body: &str, status: u16) -> AdvisoryError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status));

    AdvisoryError::ApiError { status, message }
}
