//! scene-validator library
//!
//! Structural validation for media production scene descriptions.
//!
//! This library provides:
//! - A pure rule engine checking required fields, scene structure, and elements
//! - A validation orchestrator that loads scene files and collects findings
//! - Optional AI-assisted suggestions (Gemini, requires the "ai" feature)
//! - Terminal summaries and JSON / HTML report export
//!
//! # Example
//!
//! ```no_run
//! use scene_validator::{RuleConfig, SceneValidator};
//!
//! let validator = SceneValidator::new(RuleConfig::default(), None);
//! let outcome = validator.validate("scenes/intro.json");
//! println!("Valid: {}", outcome.is_valid());
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod engine;
pub mod scene;

// Re-exports for public API
pub use config::{RuleConfig, ValidatorConfig};
pub use engine::orchestrator::SceneValidator;
pub use engine::result::ValidationOutcome;

use thiserror::Error;

/// Result alias for fallible scene-validator operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Errors surfaced to callers outside the validation run itself.
///
/// Validation findings never use this type; they are recorded inside a
/// [`ValidationOutcome`]. These errors come from configuration loading and
/// report export, where the caller has to decide what to do.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// I/O error
    #[error("I/O error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    /// Malformed JSON document
    #[error("Parse error in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// Report destination has an extension other than .json or .html
    #[error("Unsupported report format for '{path}'. Use .json or .html")]
    UnsupportedFormat { path: String },
    /// Validation timestamp could not be rendered
    #[error("Failed to format validation time: {0}")]
    TimestampFormat(#[from] time::error::Format),
    /// Validation timestamp in a report could not be read back
    #[error("Failed to parse validation time: {0}")]
    TimestampParse(#[from] time::error::Parse),
}
