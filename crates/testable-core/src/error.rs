//! Error types for testable.
//!
//! Every stage of the pipeline (parse, extract, render, format, write)
//! reports failures through this single hierarchy. The first error stops the
//! run and is surfaced verbatim by the CLI.
//!
//! # Examples
//!
//! ```
//! use testable_core::{Error, Result};
//!
//! fn check_suffix(suffix: &str) -> Result<()> {
//!     if suffix.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "iface suffix cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_suffix("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for testable.
///
/// All errors in the system use this type, providing consistent error handling
/// across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// A source file could not be parsed.
    ///
    /// Raised by the source parser when `syn` rejects a file. The message
    /// includes the line and column reported by the parser.
    #[error("Failed to parse {}: {message}", path.display())]
    ParseError {
        /// Path of the file that failed to parse
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    IoError {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template registration or rendering failed.
    #[error("Template '{template}' failed: {message}")]
    TemplateError {
        /// Name of the template
        template: String,
        /// Description of the failure
        message: String,
    },

    /// Rendered text is not valid Rust source.
    ///
    /// Equivalent to a formatter rejecting generated code. This always
    /// indicates a bug in a template or an unsupported source construct.
    #[error("Generated code for module '{module}' is not valid Rust: {message}")]
    FormatError {
        /// Name of the generated module
        module: String,
        /// Parser diagnostic for the generated text
        message: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or contains contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Resource not found error.
    ///
    /// Occurs when the input directory does not exist or contains nothing
    /// that can be processed.
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if this is a parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_core::Error;
    ///
    /// let err = Error::ParseError {
    ///     path: "src/client.rs".into(),
    ///     message: "expected `;`".to_string(),
    /// };
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    /// Returns `true` if this is a template error.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_core::Error;
    ///
    /// let err = Error::TemplateError {
    ///     template: "interface/trait".to_string(),
    ///     message: "missing field".to_string(),
    /// };
    /// assert!(err.is_template_error());
    /// assert!(!err.is_parse_error());
    /// ```
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is a format error.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::FormatError { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "output directory is empty".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a resource not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns `true` if the error was caused by user input rather than by
    /// the environment or a generator bug.
    ///
    /// The CLI uses this to pick an exit code.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError { .. }
                | Self::InvalidArgument(_)
                | Self::ResourceNotFound { .. }
                | Self::ParseError { .. }
        )
    }
}

/// Result type alias for testable operations.
///
/// # Examples
///
/// ```
/// use testable_core::{Result, Error};
///
/// fn non_empty(value: &str) -> Result<&str> {
///     if value.is_empty() {
///         return Err(Error::InvalidArgument("empty value".to_string()));
///     }
///     Ok(value)
/// }
///
/// assert!(non_empty("client").is_ok());
/// assert!(non_empty("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
