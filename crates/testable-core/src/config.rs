//! Generator configuration.
//!
//! Configuration is layered: built-in defaults, then an optional
//! `testable.toml`, then whatever the caller (usually the CLI) overrides.
//! Every field has a default, so a config file only needs the keys it
//! changes.
//!
//! # Examples
//!
//! ```
//! use testable_core::{GeneratorConfig, Layout};
//!
//! // Use default configuration
//! let config = GeneratorConfig::default();
//! assert_eq!(config.crate_path.as_str(), "crate");
//! assert_eq!(config.layout, Layout::Nested);
//!
//! // Build a custom configuration
//! let config = GeneratorConfig::builder()
//!     .input("src/api")
//!     .output("src/testable")
//!     .layout(Layout::Flat)
//!     .build();
//! assert!(config.validate().is_ok());
//! ```

use crate::{Error, ModuleName, Result, RustPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "testable.toml";

/// Header comment placed at the top of every generated file.
pub const DEFAULT_HEADER: &str = "Auto generated code DO NOT EDIT";

/// File layout of the generated modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `<name>/mod.rs` and `<name>_iface/mod.rs`
    #[default]
    Nested,
    /// `<name>.rs` and `<name>_iface.rs`
    Flat,
}

impl Layout {
    /// Returns the relative file path for a generated module.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_core::{Layout, ModuleName};
    ///
    /// let name = ModuleName::new("client").unwrap();
    /// assert_eq!(Layout::Nested.module_file(&name), "client/mod.rs");
    /// assert_eq!(Layout::Flat.module_file(&name), "client.rs");
    /// ```
    #[must_use]
    pub fn module_file(self, module: &ModuleName) -> String {
        match self {
            Self::Nested => format!("{module}/mod.rs"),
            Self::Flat => format!("{module}.rs"),
        }
    }
}

/// Configuration for one generation run.
///
/// # Examples
///
/// ```
/// use testable_core::GeneratorConfig;
///
/// let config = GeneratorConfig::from_toml_str(r#"
///     input = "src/api"
///     output = "src/mocks"
///     crate_path = "crate::api"
///     exclude = ["generated_*.rs"]
/// "#).unwrap();
///
/// assert_eq!(config.crate_path.as_str(), "crate::api");
/// assert!(config.is_excluded("generated_models.rs"));
/// assert!(config.emit_index);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding the source modules to wrap.
    pub input: PathBuf,

    /// Directory the generated modules are written to.
    pub output: PathBuf,

    /// Rust path under which the source modules are reachable.
    ///
    /// The original of module `client` is `<crate_path>::client`.
    /// Default: `crate`
    pub crate_path: RustPath,

    /// Rust path of the module that contains the generated modules, as seen
    /// from inside a generated module.
    ///
    /// The trait module of `client` is `<base_path>::client_iface`.
    /// Default: `super`
    pub base_path: RustPath,

    /// Suffix appended to a module name to form its trait module.
    /// Default: `_iface`
    pub iface_suffix: String,

    /// File layout of the output.
    pub layout: Layout,

    /// Emit an index `mod.rs` declaring all generated modules.
    /// Default: true
    pub emit_index: bool,

    /// Pretty-print generated code.
    ///
    /// Generated code is always parsed for validity; this only controls
    /// whether the pretty-printed text replaces the raw template output.
    /// Default: true
    pub format: bool,

    /// Walk subdirectories of `input`.
    /// Default: false
    pub recursive: bool,

    /// Glob patterns matched against file names to skip.
    pub exclude: Vec<String>,

    /// Header comment for generated files (without the `//` prefix).
    pub header: String,

    /// Overwrite files that already exist in `output`.
    /// Default: true
    pub overwrite: bool,

    /// Write through a temp file and rename.
    /// Default: true
    pub atomic: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            crate_path: RustPath::trusted("crate"),
            base_path: RustPath::trusted("super"),
            iface_suffix: "_iface".to_string(),
            layout: Layout::Nested,
            emit_index: true,
            format: true,
            recursive: false,
            exclude: Vec::new(),
            header: DEFAULT_HEADER.to_string(),
            overwrite: true,
            atomic: true,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the text is not valid TOML or contains
    /// unknown keys or invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::ConfigError {
            message: format!("invalid configuration: {e}"),
        })
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::IoError` if the file cannot be read and
    /// `Error::ConfigError` if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|e| Error::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolves the base configuration for a run.
    ///
    /// An explicit path must exist. Without one, `testable.toml` in `dir` is
    /// used when present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn discover(explicit: Option<&Path>, dir: impl AsRef<Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if:
    /// - `input` or `output` is empty
    /// - `iface_suffix` is empty or would not form an identifier
    /// - an `exclude` entry is not a valid glob pattern
    /// - the header spans multiple lines
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "input directory is required".to_string(),
            });
        }

        if self.output.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "output directory is required".to_string(),
            });
        }

        self.validate_output()
    }

    /// Validates the settings that shape generated code.
    ///
    /// This is the subset of [`validate`](Self::validate) that does not
    /// involve the filesystem, used by generators fed with in-memory
    /// packages.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if:
    /// - `iface_suffix` is empty or would not form an identifier
    /// - an `exclude` entry is not a valid glob pattern
    /// - the header spans multiple lines
    pub fn validate_output(&self) -> Result<()> {
        if self.iface_suffix.is_empty() {
            return Err(Error::ConfigError {
                message: "iface_suffix cannot be empty".to_string(),
            });
        }

        if ModuleName::new(format!("m{}", self.iface_suffix)).is_err() {
            return Err(Error::ConfigError {
                message: format!(
                    "iface_suffix '{}' must only contain identifier characters",
                    self.iface_suffix
                ),
            });
        }

        for pattern in &self.exclude {
            glob::Pattern::new(pattern).map_err(|e| Error::ConfigError {
                message: format!("invalid exclude pattern '{pattern}': {e}"),
            })?;
        }

        if self.header.contains('\n') {
            return Err(Error::ConfigError {
                message: "header must be a single line".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `true` if a source file should be skipped.
    ///
    /// Files whose name contains `test` are always skipped, as are files
    /// matching one of the `exclude` patterns.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_core::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::default();
    /// assert!(config.is_excluded("client_test.rs"));
    /// assert!(config.is_excluded("tests.rs"));
    /// assert!(!config.is_excluded("client.rs"));
    /// ```
    #[must_use]
    pub fn is_excluded(&self, file_name: &str) -> bool {
        if file_name.contains("test") {
            return true;
        }

        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(file_name))
                .unwrap_or(false)
        })
    }

    /// Returns the trait module name for a source module.
    #[must_use]
    pub fn iface_module(&self, module: &ModuleName) -> ModuleName {
        module.with_suffix(&self.iface_suffix)
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder starting from an existing configuration.
    #[must_use]
    pub const fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Sets the input directory.
    #[must_use]
    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.config.input = input.into();
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = output.into();
        self
    }

    /// Sets the Rust path of the source modules.
    #[must_use]
    pub fn crate_path(mut self, path: RustPath) -> Self {
        self.config.crate_path = path;
        self
    }

    /// Sets the Rust path of the output module.
    #[must_use]
    pub fn base_path(mut self, path: RustPath) -> Self {
        self.config.base_path = path;
        self
    }

    /// Sets the trait module suffix.
    #[must_use]
    pub fn iface_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.iface_suffix = suffix.into();
        self
    }

    /// Sets the output layout.
    #[must_use]
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Enables or disables the index module.
    #[must_use]
    pub const fn emit_index(mut self, emit: bool) -> Self {
        self.config.emit_index = emit;
        self
    }

    /// Enables or disables pretty-printing.
    #[must_use]
    pub const fn format(mut self, format: bool) -> Self {
        self.config.format = format;
        self
    }

    /// Enables or disables recursive discovery.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    /// Adds an exclude pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.config.exclude.push(pattern.into());
        self
    }

    /// Sets the header comment.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.config.header = header.into();
        self
    }

    /// Sets whether existing files are overwritten.
    #[must_use]
    pub const fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Sets whether writes are atomic.
    #[must_use]
    pub const fn atomic(mut self, atomic: bool) -> Self {
        self.config.atomic = atomic;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
