//! Validation run orchestrator.
//!
//! Loads one scene, runs the rules, and applies the optional advisory pass.
//!
//! # Graceful Degradation
//!
//! This module handles errors gracefully:
//! - Missing or unreadable scene file: single issue, no rule checks
//! - Malformed JSON or non-object root: single issue, no rule checks
//! - Wrong field kinds and panics during the run: caught at the top level and
//!   recorded as a single "Unexpected error" issue
//! - Advisory failures: recorded as a single warning, validity untouched
//!
//! `validate` always returns an outcome. No function in this module returns
//! an error or lets a panic escape.

use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{error, info};

use crate::ai::{self, Advisor};
use crate::config::{RuleConfig, ValidatorConfig};
use crate::engine::result::ValidationOutcome;
use crate::engine::rules;
use crate::scene::{FieldTypeError, SceneRecord};

/// Validates scene files against a fixed rule configuration
pub struct SceneValidator {
    rules: RuleConfig,
    advisor: Option<Box<dyn Advisor>>,
}

impl SceneValidator {
    /// Create a validator with explicit rules and an optional advisor
    pub fn new(rules: RuleConfig, advisor: Option<Box<dyn Advisor>>) -> Self {
        SceneValidator { rules, advisor }
    }

    /// Create a validator from a loaded configuration.
    ///
    /// The advisor is created only when enabled in config and a credential
    /// is present in the environment.
    pub fn from_config(config: &ValidatorConfig) -> Self {
        let advisor = ai::advisor_from_config(&config.advisory);
        Self::new(config.validation_rules.clone(), advisor)
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    /// Validate the scene file at `scene_path`
    pub fn validate(&self, scene_path: impl AsRef<Path>) -> ValidationOutcome {
        let scene_path = scene_path.as_ref();
        let mut outcome = ValidationOutcome::new();

        let Some(value) = load_scene(scene_path, &mut outcome) else {
            return outcome;
        };

        self.validate_into(value, &mut outcome);
        info!(
            "Validation completed for {}. Valid: {}",
            scene_path.display(),
            outcome.is_valid()
        );
        outcome
    }

    /// Validate an already parsed scene document
    pub fn validate_value(&self, value: Value) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();
        self.validate_into(value, &mut outcome);
        outcome
    }

    fn validate_into(&self, value: Value, outcome: &mut ValidationOutcome) {
        let run = match SceneRecord::from_value(&value) {
            Ok(scene) => panic::catch_unwind(AssertUnwindSafe(|| self.run(scene, outcome))),
            Err(e) => {
                outcome.add_issue(e.to_string());
                return;
            }
        };

        // The parsed document itself is the snapshot; the run only borrowed it
        outcome.set_scene_data(value);

        let failure = match run {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };

        error!("Unexpected error during validation: {}", failure);
        outcome.add_issue(format!("Unexpected error during validation: {}", failure));
    }

    fn run(&self, scene: SceneRecord<'_>, outcome: &mut ValidationOutcome) -> Result<(), FieldTypeError> {
        rules::run_all(&scene, &self.rules, outcome)?;

        if let Some(ref advisor) = self.advisor {
            run_advisory(advisor.as_ref(), scene, outcome);
        }

        Ok(())
    }
}

impl fmt::Debug for SceneValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneValidator")
            .field("rules", &self.rules)
            .field("advisor", &self.advisor.as_ref().map(|a| a.name().to_string()))
            .finish()
    }
}

/// Read and parse a scene file, recording a single issue on failure
fn load_scene(path: &Path, outcome: &mut ValidationOutcome) -> Option<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            outcome.add_issue(format!("Scene file not found: {}", path.display()));
            return None;
        }
        Err(e) => {
            outcome.add_issue(format!("Could not read scene file {}: {}", path.display(), e));
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            outcome.add_issue(format!("Invalid JSON in scene file: {}", e));
            None
        }
    }
}

/// Ask the advisor for suggestions; failures become one warning
fn run_advisory(advisor: &dyn Advisor, scene: SceneRecord<'_>, outcome: &mut ValidationOutcome) {
    match advisor.advise(scene.as_value()) {
        Ok(text) => {
            for suggestion in ai::parse_suggestions(&text) {
                outcome.add_suggestion(suggestion);
            }
            info!("{} validation completed successfully", advisor.name());
        }
        Err(e) => {
            error!("Error during {} validation: {}", advisor.name(), e);
            outcome.add_warning(format!(
                "Could not perform {}-based validation: {}",
                advisor.name(),
                e
            ));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during validation".to_string()
    }
}
