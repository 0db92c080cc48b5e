//! Output formatting tests.
//!
//! Tests for the terminal summary and the JSON / HTML report files.

use scene_validator::cli::output::{
    export_report, get_formatter, load_report, HtmlFormatter, JsonFormatter, ReportFormatter,
    TerminalFormatter,
};
use scene_validator::cli::args::ReportFormat;
use scene_validator::{ValidationOutcome, ValidatorError};
use serde_json::{json, Value};
use std::fs;

use crate::mocks::Workspace;

fn create_sample_outcome() -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();
    outcome.set_scene_data(json!({
        "id": "s1",
        "name": "Chase <night>",
        "duration": 0.5,
        "elements": [{"type": "vehicle"}]
    }));
    outcome.add_issue("Element at index 0 has invalid type: vehicle. Allowed types: character, prop, environment, effect");
    outcome.add_warning("Scene duration (0.5s) is less than minimum recommended (1.0s)");
    outcome.add_warning("Element at index 0 is missing an ID");
    outcome.add_suggestion("Use <b>wide</b> lenses & slow pans");
    outcome
}

// Terminal formatter tests

#[test]
fn test_terminal_summary_valid_empty() {
    let output = TerminalFormatter::new(false).format(&ValidationOutcome::new());
    assert_eq!(output, "Validation Status: VALID\n");
}

#[test]
fn test_terminal_summary_sections() {
    let output = TerminalFormatter::new(false).format(&create_sample_outcome());

    let expected = "Validation Status: INVALID\n\
        \nIssues:\n\
        1. Element at index 0 has invalid type: vehicle. Allowed types: character, prop, environment, effect\n\
        \nWarnings:\n\
        1. Scene duration (0.5s) is less than minimum recommended (1.0s)\n\
        2. Element at index 0 is missing an ID\n\
        \nSuggestions:\n\
        1. Use <b>wide</b> lenses & slow pans\n";
    assert_eq!(output, expected);
}

#[test]
fn test_terminal_summary_omits_empty_sections() {
    let mut outcome = ValidationOutcome::new();
    outcome.add_warning("Scene has an empty name");
    let output = TerminalFormatter::new(false).format(&outcome);

    assert!(output.starts_with("Validation Status: VALID\n"));
    assert!(output.contains("Warnings:\n1. Scene has an empty name\n"));
    assert!(!output.contains("Issues:"));
    assert!(!output.contains("Suggestions:"));
}

#[test]
fn test_terminal_color() {
    let output = TerminalFormatter::new(true).format(&create_sample_outcome());
    assert!(output.contains("\x1b[31mINVALID\x1b[0m"));

    let output = TerminalFormatter::new(false).format(&create_sample_outcome());
    assert!(!output.contains("\x1b["));
}

// JSON formatter tests

#[test]
fn test_json_report_fields() {
    let output = JsonFormatter::new(true).format(&create_sample_outcome()).unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["valid"], false);
    assert!(parsed["validation_time"].is_string());
    assert_eq!(parsed["issues"].as_array().map(Vec::len), Some(1));
    assert_eq!(parsed["warnings"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["suggestions"][0], "Use <b>wide</b> lenses & slow pans");
    assert_eq!(parsed["scene_data"]["name"], "Chase <night>");
}

#[test]
fn test_json_report_without_scene_data() {
    let mut outcome = ValidationOutcome::new();
    outcome.add_issue("Scene file not found: missing.json");

    let output = JsonFormatter::new(false).format(&outcome).unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();

    assert!(parsed["scene_data"].is_null());
    assert!(!output.contains('\n'));
}

#[test]
fn test_json_report_round_trip() {
    let ws = Workspace::new();
    let outcome = create_sample_outcome();
    let path = ws.path("report.json");

    let written = export_report(&outcome, &path).unwrap();
    assert_eq!(written, path);

    let loaded = load_report(&path).unwrap();
    assert_eq!(loaded.is_valid(), outcome.is_valid());
    assert_eq!(loaded.issues(), outcome.issues());
    assert_eq!(loaded.warnings(), outcome.warnings());
    assert_eq!(loaded.suggestions(), outcome.suggestions());
    assert_eq!(loaded.scene_data(), outcome.scene_data());
    assert_eq!(loaded.validation_time(), outcome.validation_time());
}

#[test]
fn test_round_trip_preserves_scene_key_order() {
    let ws = Workspace::new();
    let mut outcome = ValidationOutcome::new();
    outcome.set_scene_data(json!({"zeta": 1, "alpha": 2, "id": "s1"}));
    let path = ws.path("report.json");

    export_report(&outcome, &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();

    let zeta = content.find("\"zeta\"").unwrap();
    let alpha = content.find("\"alpha\"").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_load_report_rejects_malformed_json() {
    let ws = Workspace::new();
    let path = ws.write_raw("report.json", "{\"valid\": true");

    assert!(matches!(load_report(&path), Err(ValidatorError::Json { .. })));
}

// HTML formatter tests

#[test]
fn test_html_report_structure() {
    let output = HtmlFormatter.format(&create_sample_outcome()).unwrap();

    assert!(output.starts_with("<!DOCTYPE html>"));
    assert!(output.contains("<title>Scene Validation Report</title>"));
    assert!(output.contains("class=\"status invalid\">Status: INVALID"));
    assert!(output.contains("<h2>Issues</h2>"));
    assert!(output.contains("<h2>Warnings</h2>"));
    assert!(output.contains("<h2>Suggestions</h2>"));
    assert!(output.contains("<h2>Scene Data</h2>"));
    assert!(output.trim_end().ends_with("</html>"));
}

#[test]
fn test_html_report_escapes_markup() {
    let output = HtmlFormatter.format(&create_sample_outcome()).unwrap();

    assert!(output.contains("Use &lt;b&gt;wide&lt;/b&gt; lenses &amp; slow pans"));
    assert!(output.contains("Chase &lt;night&gt;"));
    assert!(!output.contains("<b>wide</b>"));
}

#[test]
fn test_html_report_omits_empty_sections() {
    let output = HtmlFormatter.format(&ValidationOutcome::new()).unwrap();

    assert!(output.contains("class=\"status valid\">Status: VALID"));
    assert!(!output.contains("<h2>Issues</h2>"));
    assert!(!output.contains("<h2>Scene Data</h2>"));
}

// Export tests

#[test]
fn test_export_html_by_extension() {
    let ws = Workspace::new();
    let path = ws.path("report.html");

    export_report(&create_sample_outcome(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_export_unsupported_format() {
    let ws = Workspace::new();
    let path = ws.path("report.xml");

    let result = export_report(&create_sample_outcome(), &path);

    assert!(matches!(result, Err(ValidatorError::UnsupportedFormat { .. })));
    assert!(!path.exists());
}

#[test]
fn test_get_formatter() {
    let outcome = create_sample_outcome();

    let json = get_formatter(ReportFormat::Json).format(&outcome).unwrap();
    assert!(json.trim_start().starts_with('{'));

    let html = get_formatter(ReportFormat::Html).format(&outcome).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
}
