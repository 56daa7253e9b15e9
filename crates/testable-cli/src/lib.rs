//! testable CLI library.
//!
//! Exposes the argument definitions, command handlers and formatters of the
//! `testable` binary so they can be tested without spawning a process.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use cli::{Cli, Commands, GenerateArgs, SourceArgs};
pub use runner::{execute_command, exit_code_for, init_logging};
