//! Inspect command implementation.
//!
//! Prints the struct shapes extracted from a directory without generating
//! anything, which shows exactly what `generate` would wrap.

use super::common::resolve_config;
use crate::cli::SourceArgs;
use crate::formatters::format_output;
use anyhow::{Context, Result};
use testable_core::cli::{ExitCode, OutputFormat};
use testable_introspector::Introspector;

/// Runs the inspect command.
///
/// A directory without exported structs prints an empty list and still
/// succeeds.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input directory is
/// missing, or a source file cannot be parsed.
pub fn run(args: &SourceArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let config = resolve_config(args)?;
    config.validate_output()?;

    let mut introspector = Introspector::new(config.clone());
    let packages = introspector
        .discover(&config.input)
        .with_context(|| format!("failed to parse {}", config.input.display()))?;

    println!("{}", format_output(&packages, output_format)?);
    Ok(ExitCode::SUCCESS)
}
