//! AI integration layer for scene suggestions.
//!
//! The advisory pass is optional and strictly best-effort. The orchestrator
//! holds an `Option<Box<dyn Advisor>>`; when it is `None` the pass is skipped
//! without any finding.
//!
//! # Usage
//!
//! The Gemini client is feature-gated behind the "ai" feature flag (enabled
//! by default):
//! ```sh
//! cargo build --no-default-features   # rules-only build
//! ```
//!
//! # Supported Providers
//!
//! - Google (Gemini): Set GEMINI_API_KEY environment variable

pub mod prompt;

#[cfg(feature = "ai")]
pub mod google;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::config::AdvisoryConfig;

/// Environment variable holding the Gemini credential
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// A text-completion service that reviews a scene.
pub trait Advisor {
    /// Display name used in findings (e.g. "Gemini")
    fn name(&self) -> &str;

    /// Return the raw free-text review of a scene record
    fn advise(&self, scene: &Value) -> Result<String, AdvisoryError>;
}

/// Error types specific to advisory operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisoryError {
    /// Transport-level failure (DNS, connect, TLS, I/O)
    #[error("API request failed: {message}")]
    RequestFailed { message: String },
    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    /// Response parsing failed
    #[error("Failed to parse API response: {message}")]
    ParseError { message: String },
    /// Response contained no text
    #[error("API response contained no text")]
    EmptyResponse,
}

/// Get the API key from the environment, if set and non-empty
pub fn get_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Build the configured advisor, or `None` when disabled or unconfigured.
///
/// This is the only place the process environment is consulted.
pub fn advisor_from_config(config: &AdvisoryConfig) -> Option<Box<dyn Advisor>> {
    if !config.enabled {
        info!("Advisory suggestions disabled in configuration");
        return None;
    }

    let Some(api_key) = get_api_key() else {
        info!("{} not set; advisory suggestions will not be available", API_KEY_ENV_VAR);
        return None;
    };

    build_client(api_key, config)
}

#[cfg(feature = "ai")]
fn build_client(api_key: String, config: &AdvisoryConfig) -> Option<Box<dyn Advisor>> {
    let client = google::GeminiClient::with_key(api_key)
        .with_model(&config.model_name)
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_output_tokens);
    info!("Gemini advisory initialized with model {}", config.model_name);
    Some(Box::new(client))
}

#[cfg(not(feature = "ai"))]
fn build_client(_api_key: String, _config: &AdvisoryConfig) -> Option<Box<dyn Advisor>> {
    info!("AI feature not enabled; advisory suggestions will not be available");
    None
}

/// Extract suggestions from a free-text response.
///
/// A line is a suggestion when, after trimming, it starts with a bullet
/// (`•`, `-`, `*`) or an enumerator (`1.`, `12.`). The marker is removed and
/// lines left empty are dropped.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| strip_marker(line.trim()))
        .map(str::trim)
        .filter(|suggestion| !suggestion.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_marker(line: &str) -> Option<&str> {
    if let Some(rest) = ['•', '-', '*'].iter().find_map(|bullet| line.strip_prefix(*bullet)) {
        return Some(rest);
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.')
}
