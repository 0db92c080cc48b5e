//! Validation outcome accumulation.
//!
//! One [`ValidationOutcome`] is created per validation run and collects its
//! issues, warnings, and suggestions. The outcome is valid until the first
//! issue is recorded and stays invalid afterwards.

use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Findings of one validation run
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    valid: bool,
    issues: Vec<String>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
    scene_data: Option<Value>,
    validation_time: OffsetDateTime,
}

/// Finding counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeSummary {
    pub issues: usize,
    pub warnings: usize,
    pub suggestions: usize,
}

impl ValidationOutcome {
    /// Create a new empty outcome stamped with the current time
    pub fn new() -> Self {
        ValidationOutcome {
            valid: true,
            issues: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            scene_data: None,
            validation_time: OffsetDateTime::now_utc(),
        }
    }

    /// Rebuild an outcome from previously exported fields.
    ///
    /// Validity is derived from the issue list.
    pub fn from_parts(
        issues: Vec<String>,
        warnings: Vec<String>,
        suggestions: Vec<String>,
        scene_data: Option<Value>,
        validation_time: OffsetDateTime,
    ) -> Self {
        ValidationOutcome {
            valid: issues.is_empty(),
            issues,
            warnings,
            suggestions,
            scene_data,
            validation_time,
        }
    }

    /// Record a blocking finding
    pub fn add_issue(&mut self, issue: impl Into<String>) {
        let issue = issue.into();
        warn!("Validation issue: {}", issue);
        self.valid = false;
        self.issues.push(issue);
    }

    /// Record a non-blocking finding
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        info!("Validation warning: {}", warning);
        self.warnings.push(warning);
    }

    /// Record an advisory suggestion
    pub fn add_suggestion(&mut self, suggestion: impl Into<String>) {
        let suggestion = suggestion.into();
        debug!("Validation suggestion: {}", suggestion);
        self.suggestions.push(suggestion);
    }

    /// Store the scene record being validated
    pub fn set_scene_data(&mut self, scene: Value) {
        self.scene_data = Some(scene);
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn scene_data(&self) -> Option<&Value> {
        self.scene_data.as_ref()
    }

    pub fn validation_time(&self) -> OffsetDateTime {
        self.validation_time
    }

    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary {
            issues: self.issues.len(),
            warnings: self.warnings.len(),
            suggestions: self.suggestions.len(),
        }
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::new()
    }
}
