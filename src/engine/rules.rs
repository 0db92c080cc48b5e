//! Structural scene rules.
//!
//! Required fields, scene structure, and element checks. Every check is a
//! pure function of the scene and the rule configuration; findings are
//! written into the caller's [`ValidationOutcome`].
//!
//! Findings never abort a check. The only error path is a recognized field
//! holding the wrong JSON kind, which the orchestrator treats as an
//! unexpected failure.

use serde_json::Value;

use crate::config::RuleConfig;
use crate::engine::result::ValidationOutcome;
use crate::scene::{ElementShape, ElementsField, FieldTypeError, SceneRecord};

/// Run every rule in order: required fields, structure, elements.
pub fn run_all(
    scene: &SceneRecord,
    rules: &RuleConfig,
    outcome: &mut ValidationOutcome,
) -> Result<(), FieldTypeError> {
    check_required_fields(scene, rules, outcome);
    check_structure(scene, rules, outcome)?;
    check_elements(scene, rules, outcome);
    Ok(())
}

/// Record an issue for every configured field the scene lacks
pub fn check_required_fields(scene: &SceneRecord, rules: &RuleConfig, outcome: &mut ValidationOutcome) {
    for field in &rules.required_fields {
        if !scene.contains(field) {
            outcome.add_issue(format!("Missing required field: {}", field));
        }
    }
}

/// Check scene duration and name
pub fn check_structure(
    scene: &SceneRecord,
    rules: &RuleConfig,
    outcome: &mut ValidationOutcome,
) -> Result<(), FieldTypeError> {
    if let Some(duration) = scene.duration()? {
        let below_minimum = match (duration.seconds(), rules.min_scene_duration.as_f64()) {
            (Some(seconds), Some(minimum)) => seconds < minimum,
            _ => false,
        };
        if below_minimum {
            outcome.add_warning(format!(
                "Scene duration ({}s) is less than minimum recommended ({}s)",
                duration, rules.min_scene_duration
            ));
        }
    }

    if let Some(name) = scene.name()? {
        if name.trim().is_empty() {
            outcome.add_warning("Scene has an empty name");
        }
    }

    Ok(())
}

/// Check the element list and every element in it
pub fn check_elements(scene: &SceneRecord, rules: &RuleConfig, outcome: &mut ValidationOutcome) {
    let elements = match scene.elements() {
        // Covered by the required-fields check when required
        ElementsField::Absent => return,
        ElementsField::NotAList => {
            outcome.add_issue("Scene elements must be a list");
            return;
        }
        ElementsField::List(elements) => elements,
    };

    if elements.len() > rules.max_elements_per_scene {
        outcome.add_warning(format!(
            "Scene has {} elements, which exceeds the recommended maximum of {}",
            elements.len(),
            rules.max_elements_per_scene
        ));
    }

    for (i, element) in elements.iter().enumerate() {
        let record = match ElementShape::of(element) {
            ElementShape::Record(record) => record,
            ElementShape::NotARecord => {
                outcome.add_issue(format!("Element at index {} is not a valid object", i));
                continue;
            }
        };

        match record.element_type() {
            None => {
                outcome.add_issue(format!("Element at index {} is missing a type", i));
            }
            Some(element_type) if !is_allowed_type(element_type, rules) => {
                outcome.add_issue(format!(
                    "Element at index {} has invalid type: {}. Allowed types: {}",
                    i,
                    display_value(element_type),
                    rules.allowed_element_types.join(", ")
                ));
            }
            Some(_) => {}
        }

        if !record.has_id() {
            outcome.add_warning(format!("Element at index {} is missing an ID", i));
        }
    }
}

fn is_allowed_type(element_type: &Value, rules: &RuleConfig) -> bool {
    match element_type {
        Value::String(s) => rules.allowed_element_types.iter().any(|allowed| allowed == s),
        _ => false,
    }
}

/// Strings print raw; anything else prints as JSON text.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
