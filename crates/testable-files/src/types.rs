//! Core types for the in-memory file tree.
//!
//! # Examples
//!
//! ```
//! use testable_files::FilePath;
//!
//! let path = FilePath::new("client_iface/mod.rs").unwrap();
//! assert_eq!(path.as_str(), "client_iface/mod.rs");
//! assert_eq!(path.parent(), Some("client_iface"));
//!
//! assert!(FilePath::new("../escape.rs").is_err());
//! assert!(FilePath::new("/absolute.rs").is_err());
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during file tree operations.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Path is empty, absolute, or escapes the output directory.
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The invalid path
        path: String,
    },

    /// File was not found in the tree or on disk.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// Creating a directory or writing a file failed.
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        /// Disk path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl FilesError {
    /// Returns `true` if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` if this is an invalid path error.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// Returns `true` if a disk write failed.
    #[must_use]
    pub const fn is_write_failed(&self) -> bool {
        matches!(self, Self::WriteFailed { .. })
    }
}

impl From<FilesError> for testable_core::Error {
    fn from(error: FilesError) -> Self {
        match error {
            FilesError::WriteFailed { path, source } => Self::IoError { path, source },
            FilesError::InvalidPath { path } => Self::IoError {
                path: PathBuf::from(&path),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid path"),
            },
            FilesError::FileNotFound { path } => Self::IoError {
                path: PathBuf::from(&path),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
        }
    }
}

/// Result type for file tree operations.
pub type Result<T> = std::result::Result<T, FilesError>;

/// A validated path relative to the output directory.
///
/// Paths use forward slashes on every platform, are non-empty, are not
/// absolute, and contain no `.` or `..` components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(String);

impl FilePath {
    /// Creates a validated file path.
    ///
    /// Backslashes are normalized to forward slashes.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidPath` if the path is empty, absolute, or
    /// has an empty, `.` or `..` component.
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let normalized = path.as_ref().replace('\\', "/");

        let invalid = normalized.is_empty()
            || normalized.starts_with('/')
            || normalized.contains(':')
            || normalized
                .split('/')
                .any(|part| part.is_empty() || part == "." || part == "..");

        if invalid {
            return Err(FilesError::InvalidPath { path: normalized });
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent directory, or `None` for top-level files.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.0.rfind('/').map(|pos| &self.0[..pos])
    }

    /// Returns the path split into its components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FilePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_valid() {
        for path in ["mod.rs", "client/mod.rs", "a/b/c.rs"] {
            assert_eq!(FilePath::new(path).unwrap().as_str(), path);
        }
    }

    #[test]
    fn test_file_path_normalizes_backslashes() {
        let path = FilePath::new("client\\mod.rs").unwrap();
        assert_eq!(path.as_str(), "client/mod.rs");
    }

    #[test]
    fn test_file_path_invalid() {
        for path in ["", "/mod.rs", "a//b.rs", "./a.rs", "a/../b.rs", "C:/a.rs", "a/"] {
            let err = FilePath::new(path).unwrap_err();
            assert!(err.is_invalid_path(), "{path}");
        }
    }

    #[test]
    fn test_file_path_parent() {
        assert_eq!(FilePath::new("a/b/c.rs").unwrap().parent(), Some("a/b"));
        assert_eq!(FilePath::new("mod.rs").unwrap().parent(), None);
    }

    #[test]
    fn test_file_path_ordering() {
        let mut paths = vec![
            FilePath::new("b.rs").unwrap(),
            FilePath::new("a/mod.rs").unwrap(),
        ];
        paths.sort();
        assert_eq!(paths[0].as_str(), "a/mod.rs");
    }

    #[test]
    fn test_error_conversion() {
        let err: testable_core::Error = FilesError::InvalidPath {
            path: "../x".to_string(),
        }
        .into();
        assert!(err.is_io_error());
        assert!(err.to_string().contains("../x"));
    }
}
