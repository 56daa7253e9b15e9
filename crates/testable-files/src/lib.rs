//! In-memory file tree and filesystem export for testable.
//!
//! Generated modules are collected into a [`FileSystem`] keyed by validated
//! relative paths, then written below the output directory.
//!
//! # Examples
//!
//! ```
//! use testable_codegen::{GeneratedCode, GeneratedFile};
//! use testable_files::FilesBuilder;
//! # use tempfile::TempDir;
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile {
//!     path: "client/mod.rs".to_string(),
//!     content: "pub struct Client;".to_string(),
//! });
//!
//! let fs = FilesBuilder::from_generated_code(code).build().unwrap();
//!
//! # let temp = TempDir::new().unwrap();
//! fs.export_to_filesystem(temp.path()).unwrap();
//! assert!(temp.path().join("client/mod.rs").exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod filesystem;
pub mod types;
pub mod vfs;

pub use builder::FilesBuilder;
pub use filesystem::{ExportOptions, ExportSummary};
pub use types::{FilePath, FilesError, Result};
pub use vfs::FileSystem;
