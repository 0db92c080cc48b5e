//! Validator configuration.
//!
//! Configuration is an optional JSON file. Every key is optional; missing keys
//! keep their built-in defaults and unknown keys are ignored. A file that
//! cannot be read or parsed is logged and replaced by the defaults, never
//! reported as a validation issue.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::args::ReportFormat;
use crate::{Result, ValidatorError};

pub const DEFAULT_REQUIRED_FIELDS: [&str; 4] = ["id", "name", "duration", "elements"];
pub const DEFAULT_ELEMENT_TYPES: [&str; 4] = ["character", "prop", "environment", "effect"];
pub const DEFAULT_MAX_ELEMENTS: usize = 50;
pub const DEFAULT_MIN_DURATION: f64 = 1.0;
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub validation_rules: RuleConfig,
    #[serde(alias = "gemini_api")]
    pub advisory: AdvisoryConfig,
    pub reporting: ReportingConfig,
}

/// Structural rules applied by the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Fields that must exist on every scene, checked in this order
    pub required_fields: Vec<String>,
    /// Accepted values for an element's `type`
    pub allowed_element_types: Vec<String>,
    /// Element count above which a warning is raised
    pub max_elements_per_scene: usize,
    /// Scene duration (seconds) below which a warning is raised.
    /// Kept as written in the config so findings print it unchanged.
    pub min_scene_duration: Number,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            required_fields: DEFAULT_REQUIRED_FIELDS.iter().map(|s| s.to_string()).collect(),
            allowed_element_types: DEFAULT_ELEMENT_TYPES.iter().map(|s| s.to_string()).collect(),
            max_elements_per_scene: DEFAULT_MAX_ELEMENTS,
            min_scene_duration: Number::from_f64(DEFAULT_MIN_DURATION).unwrap_or_else(|| Number::from(1)),
        }
    }
}

/// Settings for the optional AI suggestion pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    #[serde(alias = "use_gemini")]
    pub enabled: bool,
    pub model_name: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        AdvisoryConfig {
            enabled: true,
            model_name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Report format used when the command line does not choose one
    pub format: ReportFormat,
}

impl ValidatorConfig {
    /// Read a configuration file, failing on I/O or parse errors.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ValidatorError::Io {
            context: format!("reading config {}", path.display()),
            source: e,
        })?;
        Self::from_json(&content).map_err(|e| match e {
            ValidatorError::Json { source, .. } => ValidatorError::Json {
                context: format!("config {}", path.display()),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ValidatorError::Json {
            context: "config".to_string(),
            source: e,
        })
    }

    /// Load configuration, falling back to defaults on any failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("Using default configuration");
            return ValidatorConfig::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}", path.display(), e);
                info!("Using default configuration");
                ValidatorConfig::default()
            }
        }
    }
}
