//! Command line arguments for scene-validator.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Report output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Machine-readable JSON
    Json,
    /// Self-contained styled HTML page
    #[default]
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
        }
    }

    /// Detect the format from a destination path's extension
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ReportFormat::Json),
            "html" => Some(ReportFormat::Html),
            _ => None,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Validate scene structure and continuity in media projects
#[derive(Parser, Debug, Clone)]
#[command(name = "scene-validator", version)]
#[command(about = "Validate scene structure and continuity in media projects")]
#[command(after_help = "EXIT CODES:\n    0   Scene is valid (warnings allowed)\n    1   Scene has issues\n    3   Runtime error\n\nENVIRONMENT:\n    GEMINI_API_KEY   Enables AI-generated suggestions\n    NO_COLOR         Disables colored output\n    RUST_LOG         Log filter (default: info)")]
pub struct Args {
    /// Path to the scene file to validate
    pub scene_path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to output validation report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for the report (default: from config, else html)
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolve the report destination, appending `.<format>` when missing
    pub fn report_path(&self, format: ReportFormat) -> Option<PathBuf> {
        let output = self.output.as_ref()?;
        if ReportFormat::from_path(output) == Some(format) {
            return Some(output.clone());
        }
        let mut path = output.clone().into_os_string();
        path.push(".");
        path.push(format.extension());
        Some(PathBuf::from(path))
    }
}
