//! Common utilities shared across CLI commands.
//!
//! Resolves the [`GeneratorConfig`] for a run from the configuration file
//! and the source selection flags.

use crate::cli::SourceArgs;
use anyhow::{Context, Result};
use testable_core::GeneratorConfig;

/// Builds the base configuration from `testable.toml` and `args`.
///
/// The file given by `--config` is loaded, else `./testable.toml` when
/// present, else the defaults. `--input`, `--recursive` and `--exclude`
/// then take precedence over the file. Exclude patterns from both sources
/// apply.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded, or
/// `testable_core::Error::InvalidArgument` if no input directory is known.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use testable_cli::SourceArgs;
/// use testable_cli::commands::common::resolve_config;
///
/// # let dir = tempfile::TempDir::new().unwrap();
/// # let config_file = dir.path().join("none.toml");
/// # std::fs::write(&config_file, "").unwrap();
/// let args = SourceArgs {
///     input: Some(PathBuf::from("src/api")),
///     config: Some(config_file),
///     recursive: true,
///     exclude: vec!["models.rs".to_string()],
/// };
///
/// let config = resolve_config(&args).unwrap();
/// assert_eq!(config.input, PathBuf::from("src/api"));
/// assert!(config.recursive);
/// assert!(config.is_excluded("models.rs"));
/// ```
pub fn resolve_config(args: &SourceArgs) -> Result<GeneratorConfig> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let mut config = GeneratorConfig::discover(args.config.as_deref(), &cwd)
        .context("failed to load configuration")?;

    if let Some(input) = &args.input {
        config.input.clone_from(input);
    }
    if args.recursive {
        config.recursive = true;
    }
    config.exclude.extend(args.exclude.iter().cloned());

    if config.input.as_os_str().is_empty() {
        return Err(testable_core::Error::InvalidArgument(
            "require a package directory: pass --input or set `input` in testable.toml"
                .to_string(),
        )
        .into());
    }

    Ok(config)
}
