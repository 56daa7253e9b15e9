//! Generate command implementation.
//!
//! Runs the whole pipeline:
//! 1. Resolves the configuration from `testable.toml` and the flags
//! 2. Discovers the exported structs of the input directory
//! 3. Renders the trait and wrapper modules
//! 4. Writes them below the output directory (unless `--dry-run`)

use super::common::resolve_config;
use crate::cli::GenerateArgs;
use crate::formatters::format_output;
use anyhow::{Context, Result};
use serde::Serialize;
use testable_codegen::CodeGenerator;
use testable_core::cli::{ExitCode, OutputFormat};
use testable_core::{GeneratorConfig, Layout, RustPath};
use testable_files::{ExportOptions, FilesBuilder};
use testable_introspector::{Introspector, PackageInfo};
use tracing::info;

/// Result of a generation run.
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    /// Source directory
    pub input: String,
    /// Output directory
    pub output: String,
    /// Whether writing was skipped
    pub dry_run: bool,
    /// Wrapped packages
    pub packages: Vec<PackageSummary>,
    /// Files written, or that would be written on a dry run
    pub files: Vec<String>,
    /// Existing files kept because overwriting is disabled
    pub skipped: Vec<String>,
}

/// Counts for one wrapped package.
#[derive(Debug, Serialize)]
pub struct PackageSummary {
    /// Package name
    pub name: String,
    /// Exported structs
    pub structs: usize,
    /// Forwarded methods
    pub methods: usize,
    /// Exported fields
    pub fields: usize,
}

impl From<&PackageInfo> for PackageSummary {
    fn from(package: &PackageInfo) -> Self {
        Self {
            name: package.name.to_string(),
            structs: package.structs.len(),
            methods: package.method_count(),
            fields: package.field_count(),
        }
    }
}

/// Builds the run configuration from the configuration file and `args`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, a path flag is
/// not a valid Rust path, or the result fails validation.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use testable_cli::{GenerateArgs, SourceArgs};
/// use testable_cli::commands::generate::build_config;
/// use testable_core::Layout;
///
/// # let dir = tempfile::TempDir::new().unwrap();
/// # let config_file = dir.path().join("empty.toml");
/// # std::fs::write(&config_file, "").unwrap();
/// let args = GenerateArgs {
///     source: SourceArgs {
///         input: Some(PathBuf::from("src/api")),
///         config: Some(config_file),
///         ..SourceArgs::default()
///     },
///     output: Some(PathBuf::from("src/mocks")),
///     crate_path: Some("crate::api".to_string()),
///     flat: true,
///     ..GenerateArgs::default()
/// };
///
/// let config = build_config(&args).unwrap();
/// assert_eq!(config.crate_path.as_str(), "crate::api");
/// assert_eq!(config.layout, Layout::Flat);
/// ```
pub fn build_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = resolve_config(&args.source)?;

    if let Some(output) = &args.output {
        config.output.clone_from(output);
    }
    if config.output.as_os_str().is_empty() {
        return Err(testable_core::Error::InvalidArgument(
            "require an output directory: pass --output or set `output` in testable.toml"
                .to_string(),
        )
        .into());
    }

    if let Some(path) = &args.crate_path {
        config.crate_path = RustPath::new(path.as_str()).context("invalid --crate-path")?;
    }
    if let Some(path) = &args.base_path {
        config.base_path = RustPath::new(path.as_str()).context("invalid --base-path")?;
    }
    if let Some(suffix) = &args.iface_suffix {
        config.iface_suffix.clone_from(suffix);
    }
    if args.flat {
        config.layout = Layout::Flat;
    }
    if args.no_index {
        config.emit_index = false;
    }
    if args.no_format {
        config.format = false;
    }
    if args.no_overwrite {
        config.overwrite = false;
    }

    config.validate()?;
    Ok(config)
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if:
/// - the configuration is invalid or no input directory is given
/// - the input directory holds no exported structs
/// - a source file cannot be parsed
/// - rendering or formatting fails
/// - the output cannot be written
pub fn run(args: &GenerateArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let config = build_config(args)?;
    info!(
        "Generating from {} into {}",
        config.input.display(),
        config.output.display()
    );

    let mut introspector = Introspector::new(config.clone());
    let packages = introspector
        .discover(&config.input)
        .with_context(|| format!("failed to parse {}", config.input.display()))?;
    if packages.is_empty() {
        return Err(testable_core::Error::ResourceNotFound {
            resource: format!("exported structs in {}", config.input.display()),
        }
        .into());
    }

    let generator = CodeGenerator::new(config.clone())?;
    let code = generator
        .generate(&packages)
        .context("failed to generate code")?;
    let fs = FilesBuilder::from_generated_code(code).build()?;

    let (files, skipped) = if args.dry_run {
        info!("Dry run, nothing written");
        let files = fs.files().map(|(path, _)| path.to_string()).collect();
        (files, Vec::new())
    } else {
        let summary = fs
            .export_to_filesystem_with_options(&config.output, &ExportOptions::from_config(&config))
            .with_context(|| format!("failed to write {}", config.output.display()))?;
        (display_all(&summary.written), display_all(&summary.skipped))
    };

    let report = GenerationReport {
        input: config.input.display().to_string(),
        output: config.output.display().to_string(),
        dry_run: args.dry_run,
        packages: packages.iter().map(PackageSummary::from).collect(),
        files,
        skipped,
    };

    println!("{}", format_output(&report, output_format)?);
    Ok(ExitCode::SUCCESS)
}

fn display_all(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}
