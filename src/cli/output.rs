//! Output formatting for scene-validator.
//!
//! Provides the terminal summary plus JSON and HTML report formatters.
//!
//! # Graceful Degradation
//!
//! - Non-TTY output: the caller turns color off (NO_COLOR, --no-color, no TTY)
//! - Empty outcomes: Produce valid output with every section omitted
//! - Markup in findings or scene data: Escaped in HTML reports
//!
//! Only report export and loading return errors; formatting itself is total
//! apart from timestamp rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use crate::cli::args::ReportFormat;
use crate::engine::result::ValidationOutcome;
use crate::{Result, ValidatorError};

/// Serialized report layout shared by the JSON and HTML formats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub valid: bool,
    pub validation_time: String,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub scene_data: Option<Value>,
}

impl ReportDocument {
    pub fn from_outcome(outcome: &ValidationOutcome) -> Result<Self> {
        Ok(ReportDocument {
            valid: outcome.is_valid(),
            validation_time: outcome.validation_time().format(&Rfc3339)?,
            issues: outcome.issues().to_vec(),
            warnings: outcome.warnings().to_vec(),
            suggestions: outcome.suggestions().to_vec(),
            scene_data: outcome.scene_data().cloned(),
        })
    }

    pub fn into_outcome(self) -> Result<ValidationOutcome> {
        let validation_time = OffsetDateTime::parse(&self.validation_time, &Rfc3339)?;
        Ok(ValidationOutcome::from_parts(
            self.issues,
            self.warnings,
            self.suggestions,
            self.scene_data,
            validation_time,
        ))
    }
}

/// Trait for report formatters
pub trait ReportFormatter {
    /// Format a validation outcome into a report document
    fn format(&self, outcome: &ValidationOutcome) -> Result<String>;
}

/// Terminal (human-readable) summary
pub struct TerminalFormatter {
    color: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool) -> Self {
        TerminalFormatter { color }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    /// Status line followed by numbered sections; empty sections are omitted
    pub fn format(&self, outcome: &ValidationOutcome) -> String {
        let status = if outcome.is_valid() {
            self.colorize("VALID", "32")
        } else {
            self.colorize("INVALID", "31")
        };

        let mut output = format!("Validation Status: {}\n", status);

        let sections = [
            ("Issues", outcome.issues(), "31"),
            ("Warnings", outcome.warnings(), "33"),
            ("Suggestions", outcome.suggestions(), "36"),
        ];

        for (title, entries, color_code) in sections {
            if entries.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{}:\n", self.colorize(title, color_code)));
            for (i, entry) in entries.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, entry));
            }
        }

        output
    }
}

/// JSON report formatter
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, outcome: &ValidationOutcome) -> Result<String> {
        let document = ReportDocument::from_outcome(outcome)?;
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        rendered.map_err(|e| ValidatorError::Json {
            context: "rendering report".to_string(),
            source: e,
        })
    }
}

/// HTML report formatter
pub struct HtmlFormatter;

const HTML_STYLE: &str = r#"        body { font-family: Arial, sans-serif; line-height: 1.6; margin: 20px; }
        h1 { color: #333; }
        .report-header { display: flex; justify-content: space-between; }
        .status { padding: 10px; border-radius: 5px; font-weight: bold; }
        .valid { background-color: #dff0d8; color: #3c763d; }
        .invalid { background-color: #f2dede; color: #a94442; }
        .section { margin: 20px 0; }
        .issue { background-color: #f2dede; padding: 10px; margin: 5px 0; border-left: 4px solid #a94442; }
        .warning { background-color: #fcf8e3; padding: 10px; margin: 5px 0; border-left: 4px solid #8a6d3b; }
        .suggestion { background-color: #d9edf7; padding: 10px; margin: 5px 0; border-left: 4px solid #31708f; }
        pre { background-color: #f5f5f5; padding: 10px; overflow: auto; }
"#;

impl HtmlFormatter {
    fn escape_html(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&#39;"),
                c => result.push(c),
            }
        }
        result
    }

    fn push_section(html: &mut String, title: &str, class: &str, entries: &[String]) {
        if entries.is_empty() {
            return;
        }
        html.push_str("    <div class=\"section\">\n");
        html.push_str(&format!("        <h2>{}</h2>\n", title));
        for entry in entries {
            html.push_str(&format!(
                "        <div class=\"{}\">{}</div>\n",
                class,
                Self::escape_html(entry)
            ));
        }
        html.push_str("    </div>\n");
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format(&self, outcome: &ValidationOutcome) -> Result<String> {
        let document = ReportDocument::from_outcome(outcome)?;
        let (status_class, status_text) = if document.valid {
            ("valid", "VALID")
        } else {
            ("invalid", "INVALID")
        };

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("    <meta charset=\"utf-8\">\n");
        html.push_str("    <title>Scene Validation Report</title>\n");
        html.push_str("    <style>\n");
        html.push_str(HTML_STYLE);
        html.push_str("    </style>\n</head>\n<body>\n");
        html.push_str("    <h1>Scene Validation Report</h1>\n\n");
        html.push_str("    <div class=\"report-header\">\n");
        html.push_str(&format!(
            "        <div class=\"status {}\">Status: {}</div>\n",
            status_class, status_text
        ));
        html.push_str(&format!(
            "        <div class=\"timestamp\">Generated: {}</div>\n",
            Self::escape_html(&document.validation_time)
        ));
        html.push_str("    </div>\n\n");

        Self::push_section(&mut html, "Issues", "issue", &document.issues);
        Self::push_section(&mut html, "Warnings", "warning", &document.warnings);
        Self::push_section(&mut html, "Suggestions", "suggestion", &document.suggestions);

        if let Some(ref scene) = document.scene_data {
            let pretty = serde_json::to_string_pretty(scene).map_err(|e| ValidatorError::Json {
                context: "rendering scene data".to_string(),
                source: e,
            })?;
            html.push_str("    <div class=\"section\">\n");
            html.push_str("        <h2>Scene Data</h2>\n");
            html.push_str(&format!("        <pre>{}</pre>\n", Self::escape_html(&pretty)));
            html.push_str("    </div>\n");
        }

        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

/// Get the formatter for a report format
pub fn get_formatter(format: ReportFormat) -> Box<dyn ReportFormatter> {
    match format {
        ReportFormat::Json => Box::new(JsonFormatter::new(true)),
        ReportFormat::Html => Box::new(HtmlFormatter),
    }
}

/// Write a report, choosing the format from the destination's extension
pub fn export_report(outcome: &ValidationOutcome, path: &Path) -> Result<PathBuf> {
    let format = ReportFormat::from_path(path).ok_or_else(|| ValidatorError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;

    let content = get_formatter(format).format(outcome)?;
    fs::write(path, content).map_err(|e| ValidatorError::Io {
        context: format!("writing report {}", path.display()),
        source: e,
    })?;

    info!("Validation report exported to {}", path.display());
    Ok(path.to_path_buf())
}

/// Read a JSON report back into an outcome
pub fn load_report(path: &Path) -> Result<ValidationOutcome> {
    let content = fs::read_to_string(path).map_err(|e| ValidatorError::Io {
        context: format!("reading report {}", path.display()),
        source: e,
    })?;

    let document: ReportDocument = serde_json::from_str(&content).map_err(|e| ValidatorError::Json {
        context: format!("report {}", path.display()),
        source: e,
    })?;

    document.into_outcome()
}
