//! In-memory file tree.
//!
//! Holds generated files keyed by their relative path until they are
//! exported. Iteration is always in path order.
//!
//! # Examples
//!
//! ```
//! use testable_files::FileSystem;
//!
//! let mut fs = FileSystem::new();
//! fs.add_file("client/mod.rs", "pub struct Client;").unwrap();
//!
//! assert!(fs.exists("client/mod.rs"));
//! assert_eq!(fs.read_file("client/mod.rs").unwrap(), "pub struct Client;");
//! ```

use crate::types::{FilePath, FilesError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// An in-memory set of files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSystem {
    files: BTreeMap<FilePath, String>,
}

impl FileSystem {
    /// Creates an empty file tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Adds a file, replacing any file already at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidPath` if the path is not a valid
    /// relative path.
    pub fn add_file(&mut self, path: impl AsRef<str>, content: impl Into<String>) -> Result<()> {
        let path = FilePath::new(path)?;
        if self.files.insert(path.clone(), content.into()).is_some() {
            tracing::debug!("Replaced {}", path);
        }
        Ok(())
    }

    /// Reads the content of a file.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::FileNotFound` if no file exists at `path`.
    pub fn read_file(&self, path: impl AsRef<str>) -> Result<&str> {
        let path = FilePath::new(path)?;
        self.files
            .get(&path)
            .map(String::as_str)
            .ok_or_else(|| FilesError::FileNotFound {
                path: path.as_str().to_string(),
            })
    }

    /// Returns `true` if a file exists at `path`.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<str>) -> bool {
        FilePath::new(path).is_ok_and(|p| self.files.contains_key(&p))
    }

    /// Returns the number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the tree holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over `(path, content)` pairs in path order.
    pub fn files(&self) -> impl Iterator<Item = (&FilePath, &str)> {
        self.files.iter().map(|(path, content)| (path, content.as_str()))
    }

    /// Returns every directory that must exist to hold the files, parents
    /// before children.
    #[must_use]
    pub fn directories(&self) -> Vec<String> {
        let mut dirs = BTreeSet::new();
        for path in self.files.keys() {
            let mut current = path.parent();
            while let Some(dir) = current {
                if !dirs.insert(dir.to_string()) {
                    break;
                }
                current = dir.rfind('/').map(|pos| &dir[..pos]);
            }
        }
        dirs.into_iter().collect()
    }

    /// Removes a file, returning its content.
    pub fn remove_file(&mut self, path: impl AsRef<str>) -> Option<String> {
        FilePath::new(path).ok().and_then(|p| self.files.remove(&p))
    }

    /// Removes all files.
    pub fn clear(&mut self) {
        self.files.clear();
    }
}
