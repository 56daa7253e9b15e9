//! Command execution and runtime logic.
//!
//! Contains command routing, logging initialization and the mapping from
//! errors to process exit codes.

use anyhow::Result;
use testable_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Commands;
use crate::commands;

/// Initializes logging infrastructure.
///
/// Logs go to stderr so command output on stdout stays machine readable.
/// `--verbose` forces the debug level, otherwise `RUST_LOG` applies with
/// `info` as the fallback.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate(args) => commands::generate::run(&args, output_format),
        Commands::Inspect { source } => commands::inspect::run(&source, output_format),
        Commands::Completions { shell } => {
            use crate::cli::Cli;
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

/// Picks the exit code for a failed command.
///
/// Walks the error chain for a [`testable_core::Error`]; user errors exit
/// with 2, everything else with 1.
///
/// # Examples
///
/// ```
/// use testable_cli::exit_code_for;
/// use testable_core::cli::ExitCode;
///
/// let err = anyhow::Error::new(testable_core::Error::InvalidArgument("x".into()))
///     .context("while resolving arguments");
/// assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
///
/// let err = anyhow::anyhow!("unexpected");
/// assert_eq!(exit_code_for(&err), ExitCode::ERROR);
/// ```
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|e| e.downcast_ref::<testable_core::Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_for_user_error() {
        let result: std::result::Result<(), _> = Err(testable_core::Error::ResourceNotFound {
            resource: "src/missing".to_string(),
        });
        let err = result.context("discovering packages").unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
    }

    #[test]
    fn test_exit_code_for_io_error() {
        let err = anyhow::Error::new(testable_core::Error::IoError {
            path: PathBuf::from("out/mod.rs"),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(exit_code_for(&err), ExitCode::ERROR);
    }

    #[test]
    fn test_execute_completions() {
        let code = execute_command(
            Commands::Completions {
                shell: clap_complete::Shell::Bash,
            },
            OutputFormat::Pretty,
        )
        .unwrap();
        assert!(code.is_success());
    }
}
