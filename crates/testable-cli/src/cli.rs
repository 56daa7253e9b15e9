//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands
//! - `SourceArgs`, `GenerateArgs` - Shared argument groups

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// testable - Generate traits and forwarding wrappers for Rust structs.
///
/// Reads the public structs of a directory of Rust modules and writes, per
/// module, a trait module and a wrapper module so callers can depend on
/// traits instead of concrete types.
#[derive(Parser, Debug)]
#[command(name = "testable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate trait and wrapper modules.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Wrap every module of src/api into src/api/testable
    /// testable generate --input src/api --output src/api/testable --crate-path crate::api
    ///
    /// # Show what would be written
    /// testable generate --input src/api --output src/mocks --dry-run
    /// ```
    Generate(GenerateArgs),

    /// Print the struct shapes found in a directory.
    ///
    /// # Examples
    ///
    /// ```bash
    /// testable --format json inspect --input src/api
    /// ```
    Inspect {
        /// Source selection
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Selects the source modules and the configuration file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Directory holding the source modules
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Configuration file (default: ./testable.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Walk subdirectories of the input directory
    #[arg(short, long)]
    pub recursive: bool,

    /// File name pattern to skip (repeatable)
    #[arg(long = "exclude", num_args = 1)]
    pub exclude: Vec<String>,
}

/// Arguments of `testable generate`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Source selection
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory the generated modules are written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rust path of the source modules' parent (default: crate)
    #[arg(long)]
    pub crate_path: Option<String>,

    /// Rust path of the generated modules' parent, seen from a generated
    /// module (default: super)
    #[arg(long)]
    pub base_path: Option<String>,

    /// Suffix of the trait modules (default: _iface)
    #[arg(long)]
    pub iface_suffix: Option<String>,

    /// Write `<name>.rs` files instead of `<name>/mod.rs`
    #[arg(long)]
    pub flat: bool,

    /// Do not write an index mod.rs
    #[arg(long)]
    pub no_index: bool,

    /// Do not pretty-print generated code
    #[arg(long)]
    pub no_format: bool,

    /// Keep files that already exist in the output directory
    #[arg(long)]
    pub no_overwrite: bool,

    /// Generate but do not write anything
    #[arg(long)]
    pub dry_run: bool,
}
