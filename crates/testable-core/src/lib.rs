//! Core types, configuration, and errors for testable.
//!
//! This crate provides the foundational types shared by every stage of the
//! generation pipeline:
//!
//! - Strong domain types (`ModuleName`, `RustPath`)
//! - Error hierarchy with contextual information
//! - Generator configuration (defaults, `testable.toml`, overrides)
//! - CLI value types (`OutputFormat`, `ExitCode`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;

pub use config::{DEFAULT_CONFIG_FILE, DEFAULT_HEADER, GeneratorConfig, GeneratorConfigBuilder, Layout};
pub use error::{Error, Result};
pub use types::{ModuleName, RustPath};
