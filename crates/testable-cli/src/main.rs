//! `testable` command-line entry point.
//!
//! # Examples
//!
//! ```bash
//! # Generate trait and wrapper modules for src/api
//! testable generate --input src/api --output src/api/testable --crate-path crate::api
//!
//! # List the structs that would be wrapped
//! testable --format json inspect --input src/api
//! ```

use clap::Parser;
use testable_cli::{Cli, execute_command, exit_code_for, init_logging};
use testable_core::cli::{ExitCode, OutputFormat};

fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_logging(cli.verbose)?;

    let output_format = cli.format.parse::<OutputFormat>()?;

    execute_command(cli.command, output_format)
}
