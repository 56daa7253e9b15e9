//! Builder for constructing a [`FileSystem`].
//!
//! Errors from individual `add_file` calls are collected and the first one
//! is returned from [`FilesBuilder::build`], so calls can be chained.
//!
//! # Examples
//!
//! ```
//! use testable_files::FilesBuilder;
//!
//! let fs = FilesBuilder::new()
//!     .add_file("client/mod.rs", "pub struct Client;")
//!     .add_file("mod.rs", "pub mod client;")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fs.file_count(), 2);
//! ```

use crate::types::{FilesError, Result};
use crate::vfs::FileSystem;
use testable_codegen::GeneratedCode;

/// Fluent builder for [`FileSystem`].
#[derive(Debug, Default)]
pub struct FilesBuilder {
    fs: FileSystem,
    errors: Vec<FilesError>,
}

impl FilesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding every file of `code`.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_codegen::{GeneratedCode, GeneratedFile};
    /// use testable_files::FilesBuilder;
    ///
    /// let mut code = GeneratedCode::new();
    /// code.add_file(GeneratedFile {
    ///     path: "client_iface/mod.rs".to_string(),
    ///     content: "pub trait Client {}".to_string(),
    /// });
    ///
    /// let fs = FilesBuilder::from_generated_code(code).build().unwrap();
    /// assert!(fs.exists("client_iface/mod.rs"));
    /// ```
    #[must_use]
    pub fn from_generated_code(code: GeneratedCode) -> Self {
        code.files
            .into_iter()
            .fold(Self::new(), |builder, file| builder.add_file(file.path, file.content))
    }

    /// Adds a file.
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<str>, content: impl Into<String>) -> Self {
        if let Err(e) = self.fs.add_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several files.
    #[must_use]
    pub fn add_files<P, C>(self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<str>,
        C: Into<String>,
    {
        files
            .into_iter()
            .fold(self, |builder, (path, content)| builder.add_file(path, content))
    }

    /// Returns the number of files added so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.fs.file_count()
    }

    /// Finishes the file tree.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an `add_file` call.
    pub fn build(self) -> Result<FileSystem> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(self.fs)
    }
}
