//! scene-validator CLI entry point
//!
//! Validates a scene file, prints a summary, and optionally writes a report.

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use scene_validator::cli::args::Args;
use scene_validator::cli::output::{export_report, TerminalFormatter};
use scene_validator::{SceneValidator, ValidatorConfig};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(3);
        }
    };

    init_logging(args.verbose);

    let config = ValidatorConfig::load_or_default(args.config.as_deref());
    let validator = SceneValidator::from_config(&config);
    let outcome = validator.validate(&args.scene_path);

    let counts = outcome.summary();
    info!(
        "{} issues, {} warnings, {} suggestions",
        counts.issues, counts.warnings, counts.suggestions
    );

    let color = !args.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    println!("{}", TerminalFormatter::new(color).format(&outcome));

    let format = args.format.unwrap_or(config.reporting.format);
    if let Some(path) = args.report_path(format) {
        match export_report(&outcome, &path) {
            Ok(path) => println!("Validation report saved to {}", path.display()),
            Err(e) => {
                error!("Failed to write report: {}", e);
                eprintln!("Error: {}", e);
                return ExitCode::from(3);
            }
        }
    }

    if outcome.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Log to stderr so stdout carries only the summary
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
