//! Filesystem export.
//!
//! Writes a [`FileSystem`] below a base directory in three phases: create
//! the base, create every directory, then write the files in path order.
//!
//! # Examples
//!
//! ```
//! use testable_files::FilesBuilder;
//! # use tempfile::TempDir;
//!
//! # let temp_dir = TempDir::new().unwrap();
//! # let output_dir = temp_dir.path().join("generated");
//! let fs = FilesBuilder::new()
//!     .add_file("client/mod.rs", "pub struct Client;")
//!     .add_file("client_iface/mod.rs", "pub trait Client {}")
//!     .build()
//!     .unwrap();
//!
//! // The output directory is created if missing
//! let summary = fs.export_to_filesystem(&output_dir).unwrap();
//!
//! assert_eq!(summary.written.len(), 2);
//! assert!(output_dir.join("client_iface/mod.rs").exists());
//! ```

use crate::types::{FilesError, Result};
use crate::vfs::FileSystem;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use testable_core::GeneratorConfig;

/// Options for filesystem export operations.
///
/// # Examples
///
/// ```
/// use testable_files::ExportOptions;
///
/// let options = ExportOptions::default()
///     .with_atomic_writes(true)
///     .with_overwrite(false);
/// assert!(!options.overwrite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Use atomic writes (write to temp file, then rename)
    pub atomic: bool,
    /// Overwrite existing files
    pub overwrite: bool,
}

impl ExportOptions {
    /// Creates new export options with defaults.
    ///
    /// Defaults:
    /// - atomic: true
    /// - overwrite: true
    #[must_use]
    pub const fn new() -> Self {
        Self {
            atomic: true,
            overwrite: true,
        }
    }

    /// Takes the write settings of a generator configuration.
    #[must_use]
    pub const fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            atomic: config.atomic,
            overwrite: config.overwrite,
        }
    }

    /// Sets whether to use atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Sets whether to overwrite existing files.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Files written to disk
    pub written: Vec<PathBuf>,
    /// Existing files left untouched because overwriting is disabled
    pub skipped: Vec<PathBuf>,
}

impl FileSystem {
    /// Exports all files below `base_path` with default options.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::WriteFailed` if a directory cannot be created or
    /// a file cannot be written.
    pub fn export_to_filesystem(&self, base_path: impl AsRef<Path>) -> Result<ExportSummary> {
        self.export_to_filesystem_with_options(base_path, &ExportOptions::default())
    }

    /// Exports all files below `base_path`.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::WriteFailed` if:
    /// - `base_path` cannot be created
    /// - a directory cannot be created
    /// - a file cannot be written or renamed into place
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_files::{ExportOptions, FilesBuilder};
    /// # use tempfile::TempDir;
    ///
    /// # let temp = TempDir::new().unwrap();
    /// # let base = temp.path();
    /// std::fs::write(base.join("mod.rs"), "// hand written").unwrap();
    ///
    /// let fs = FilesBuilder::new()
    ///     .add_file("mod.rs", "pub mod client;")
    ///     .build()
    ///     .unwrap();
    ///
    /// let options = ExportOptions::default().with_overwrite(false);
    /// let summary = fs.export_to_filesystem_with_options(base, &options).unwrap();
    ///
    /// assert_eq!(summary.skipped.len(), 1);
    /// assert_eq!(std::fs::read_to_string(base.join("mod.rs")).unwrap(), "// hand written");
    /// ```
    pub fn export_to_filesystem_with_options(
        &self,
        base_path: impl AsRef<Path>,
        options: &ExportOptions,
    ) -> Result<ExportSummary> {
        let base = base_path.as_ref();

        // Phase 1: Base directory
        fs::create_dir_all(base).map_err(|source| FilesError::WriteFailed {
            path: base.to_path_buf(),
            source,
        })?;

        // Phase 2: All directories, parents first
        for dir in self.directories() {
            let path = to_disk_path(&dir, base);
            fs::create_dir_all(&path).map_err(|source| FilesError::WriteFailed { path, source })?;
        }

        // Phase 3: Files
        let mut summary = ExportSummary::default();
        for (file_path, content) in self.files() {
            let path = to_disk_path(file_path.as_str(), base);
            if !options.overwrite && path.exists() {
                tracing::info!("Keeping existing {}", path.display());
                summary.skipped.push(path);
                continue;
            }

            write_file(&path, content, options.atomic)?;
            tracing::debug!("Wrote {}", path.display());
            summary.written.push(path);
        }

        tracing::info!(
            "Exported {} files to {} ({} skipped)",
            summary.written.len(),
            base.display(),
            summary.skipped.len()
        );
        Ok(summary)
    }
}

/// Joins a forward-slash relative path onto `base`.
fn to_disk_path(relative: &str, base: &Path) -> PathBuf {
    relative
        .split('/')
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

/// Writes `content` to `path`, through a sibling temp file if `atomic`.
///
/// A failed atomic write removes its temp file.
fn write_file(path: &Path, content: &str, atomic: bool) -> Result<()> {
    if !atomic {
        return fs::write(path, content).map_err(failed(path));
    }

    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let result = write_synced(&temp_path, content)
        .and_then(|()| fs::rename(&temp_path, path).map_err(failed(path)));
    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            tracing::warn!("Could not remove {}: {e}", temp_path.display());
        }
    }
    result
}

fn write_synced(path: &Path, content: &str) -> Result<()> {
    let mut file = fs::File::create(path).map_err(failed(path))?;
    file.write_all(content.as_bytes()).map_err(failed(path))?;
    file.sync_all().map_err(failed(path))
}

fn failed(path: &Path) -> impl FnOnce(std::io::Error) -> FilesError {
    let path = path.to_path_buf();
    move |source| FilesError::WriteFailed { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilesBuilder;
    use tempfile::TempDir;

    #[test]
    fn test_export_single_file() {
        let temp = TempDir::new().unwrap();
        let fs = FilesBuilder::new()
            .add_file("mod.rs", "pub mod client;")
            .build()
            .unwrap();

        let summary = fs.export_to_filesystem(temp.path()).unwrap();

        assert_eq!(summary.written, vec![temp.path().join("mod.rs")]);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("mod.rs")).unwrap(),
            "pub mod client;"
        );
    }

    #[test]
    fn test_export_creates_missing_base() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("src/generated");
        let fs = FilesBuilder::new()
            .add_file("client/mod.rs", "pub struct Client;")
            .build()
            .unwrap();

        fs.export_to_filesystem(&base).unwrap();

        assert!(base.join("client/mod.rs").exists());
    }

    #[test]
    fn test_export_deep_nesting() {
        let temp = TempDir::new().unwrap();
        let fs = FilesBuilder::new()
            .add_file("a/b/c/d/deep.rs", "")
            .build()
            .unwrap();

        fs.export_to_filesystem(temp.path()).unwrap();

        assert!(temp.path().join("a/b/c/d/deep.rs").exists());
    }

    #[test]
    fn test_export_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mod.rs");
        std::fs::write(&path, "old content").unwrap();

        let fs = FilesBuilder::new()
            .add_file("mod.rs", "new content")
            .build()
            .unwrap();
        fs.export_to_filesystem(temp.path()).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "new content");
    }

    #[test]
    fn test_export_no_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mod.rs");
        std::fs::write(&path, "old content").unwrap();

        let fs = FilesBuilder::new()
            .add_file("mod.rs", "new content")
            .add_file("client.rs", "pub struct Client;")
            .build()
            .unwrap();
        let options = ExportOptions::default().with_overwrite(false);
        let summary = fs
            .export_to_filesystem_with_options(temp.path(), &options)
            .unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "old content");
        assert_eq!(summary.written.len(), 1);
        assert_eq!(summary.skipped.len(), 1);
    }

    #[test]
    fn test_export_atomic_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let fs = FilesBuilder::new()
            .add_file("client.rs", "atomic content")
            .build()
            .unwrap();

        fs.export_to_filesystem(temp.path()).unwrap();

        assert!(temp.path().join("client.rs").exists());
        assert!(!temp.path().join("client.rs.tmp").exists());
    }

    #[test]
    fn test_export_atomic_failure_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let occupied = temp.path().join("client.rs");
        std::fs::create_dir(&occupied).unwrap();
        std::fs::write(occupied.join("keep.rs"), "").unwrap();

        let fs = FilesBuilder::new()
            .add_file("client.rs", "pub struct Client;")
            .build()
            .unwrap();
        let err = fs.export_to_filesystem(temp.path()).unwrap_err();

        assert!(err.is_write_failed());
        assert!(!temp.path().join("client.rs.tmp").exists());
        assert!(occupied.join("keep.rs").exists());
    }

    #[test]
    fn test_export_non_atomic_writes() {
        let temp = TempDir::new().unwrap();
        let fs = FilesBuilder::new()
            .add_file("client.rs", "direct content")
            .build()
            .unwrap();

        let options = ExportOptions::default().with_atomic_writes(false);
        fs.export_to_filesystem_with_options(temp.path(), &options)
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("client.rs")).unwrap(),
            "direct content"
        );
    }

    #[test]
    fn test_export_base_is_a_file() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("occupied");
        std::fs::write(&base, "").unwrap();

        let fs = FilesBuilder::new().add_file("a.rs", "").build().unwrap();
        let err = fs.export_to_filesystem(&base).unwrap_err();
        assert!(err.is_write_failed());
    }

    #[test]
    fn test_export_options_from_config() {
        let config = GeneratorConfig::builder()
            .atomic(false)
            .overwrite(false)
            .build();
        let options = ExportOptions::from_config(&config);
        assert!(!options.atomic);
        assert!(!options.overwrite);
        assert_eq!(ExportOptions::default(), ExportOptions::new());
    }
}
