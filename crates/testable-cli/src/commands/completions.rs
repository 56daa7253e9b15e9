//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io;
use testable_core::cli::ExitCode;
use tracing::info;

/// Writes the completion script for `shell` to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::Shell;
/// use testable_cli::commands::completions;
///
/// let mut cmd = Command::new("testable");
/// completions::generate_completions(Shell::Bash, &mut cmd);
/// ```
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    info!("Generating {} completions", shell);
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, &mut io::stdout());
}

/// Runs the completions command.
///
/// # Errors
///
/// Never fails; the `Result` keeps the signature in line with the other
/// commands.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    generate_completions(shell, cmd);
    Ok(ExitCode::SUCCESS)
}
