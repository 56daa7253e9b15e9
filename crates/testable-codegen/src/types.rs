//! Types for code generation output.
//!
//! # Examples
//!
//! ```
//! use testable_codegen::{GeneratedCode, GeneratedFile};
//!
//! let file = GeneratedFile {
//!     path: "client/mod.rs".to_string(),
//!     content: "pub struct Client;".to_string(),
//! };
//!
//! let code = GeneratedCode {
//!     files: vec![file],
//! };
//!
//! assert_eq!(code.files.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Result of code generation containing all generated files.
///
/// This is the main output type returned by the code generator.
/// Contains a list of files that should be written to disk.
///
/// # Examples
///
/// ```
/// use testable_codegen::GeneratedCode;
///
/// let code = GeneratedCode {
///     files: vec![],
/// };
///
/// assert_eq!(code.file_count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// List of generated files with paths and contents
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates a new empty generated code container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file to the collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_codegen::{GeneratedCode, GeneratedFile};
    ///
    /// let mut code = GeneratedCode::new();
    /// code.add_file(GeneratedFile {
    ///     path: "mod.rs".to_string(),
    ///     content: "pub mod client;".to_string(),
    /// });
    ///
    /// assert_eq!(code.file_count(), 1);
    /// ```
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Finds a file by its relative path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// A single generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Relative path where the file should be written
    pub path: String,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
