//! Domain types for testable.
//!
//! This module implements the newtype pattern to provide type safety for
//! the identifiers that end up in generated source: module names and Rust
//! paths. Both are validated with `syn`, so anything that constructs
//! successfully is guaranteed to be accepted by the Rust parser.
//!
//! # Examples
//!
//! ```
//! use testable_core::{ModuleName, RustPath};
//!
//! let name = ModuleName::new("billing_client").unwrap();
//! assert_eq!(name.as_str(), "billing_client");
//!
//! let path = RustPath::new("crate::api").unwrap().join(name.as_str()).unwrap();
//! assert_eq!(path.as_str(), "crate::api::billing_client");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated Rust module name.
///
/// A module name is a single non-keyword Rust identifier. It names both the
/// source package and the generated modules derived from it.
///
/// # Examples
///
/// ```
/// use testable_core::ModuleName;
///
/// let name = ModuleName::new("client").unwrap();
/// assert_eq!(name.with_suffix("_iface").as_str(), "client_iface");
///
/// assert!(ModuleName::new("type").is_err());
/// assert!(ModuleName::new("9lives").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleName(String);

impl ModuleName {
    /// Creates a new module name.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the name is not a valid
    /// non-keyword Rust identifier.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if syn::parse_str::<syn::Ident>(&name).is_err() {
            return Err(Error::InvalidArgument(format!(
                "'{name}' is not a valid Rust module name"
            )));
        }
        Ok(Self(name))
    }

    /// Creates a module name from a file stem or directory name.
    ///
    /// Dashes and dots are replaced with underscores and the result is
    /// lower-cased, so `billing-client` becomes `billing_client`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the normalized name is still not
    /// a valid identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_core::ModuleName;
    ///
    /// let name = ModuleName::from_file_stem("Billing-Client").unwrap();
    /// assert_eq!(name.as_str(), "billing_client");
    /// ```
    pub fn from_file_stem(stem: &str) -> Result<Self> {
        let normalized: String = stem
            .chars()
            .map(|c| match c {
                '-' | '.' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        Self::new(normalized)
    }

    /// Returns the name with a suffix appended.
    ///
    /// The suffix is validated when the configuration is loaded, so the
    /// combination of a valid name and a valid suffix is always an
    /// identifier.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{suffix}", self.0))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ModuleName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ModuleName> for String {
    fn from(name: ModuleName) -> Self {
        name.0
    }
}

/// Validated Rust path such as `crate::api` or `super`.
///
/// Used for the location of the original modules and of the generated
/// output module.
///
/// # Examples
///
/// ```
/// use testable_core::RustPath;
///
/// assert!(RustPath::new("super").is_ok());
/// assert!(RustPath::new("::sdk::v1").is_ok());
/// assert!(RustPath::new("crate::").is_err());
/// assert!(RustPath::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RustPath(String);

impl RustPath {
    /// Creates a new Rust path.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the string does not parse as a
    /// simple path (no generic arguments).
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let trimmed = path.trim();
        let parsed = syn::parse_str::<syn::Path>(trimmed).map_err(|e| {
            Error::InvalidArgument(format!("'{path}' is not a valid Rust path: {e}"))
        })?;
        if parsed
            .segments
            .iter()
            .any(|segment| !segment.arguments.is_none())
        {
            return Err(Error::InvalidArgument(format!(
                "'{path}' must not contain generic arguments"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wraps a path known to be valid.
    pub(crate) fn trusted(path: &str) -> Self {
        Self(path.to_string())
    }

    /// Appends a `::`-separated suffix to the path.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the result is not a valid path.
    pub fn join(&self, suffix: &str) -> Result<Self> {
        Self::new(format!("{}::{suffix}", self.0))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RustPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RustPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RustPath> for String {
    fn from(path: RustPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // ModuleName
    // ========================================================================

    #[test]
    fn test_module_name_valid() {
        let name = ModuleName::new("client").unwrap();
        assert_eq!(name.as_str(), "client");
        assert_eq!(name.to_string(), "client");
    }

    #[test]
    fn test_module_name_rejects_keyword() {
        assert!(ModuleName::new("impl").is_err());
        assert!(ModuleName::new("mod").is_err());
    }

    #[test]
    fn test_module_name_rejects_invalid_identifier() {
        assert!(ModuleName::new("").is_err());
        assert!(ModuleName::new("3d").is_err());
        assert!(ModuleName::new("a-b").is_err());
    }

    #[test]
    fn test_module_name_from_file_stem_normalizes() {
        let name = ModuleName::from_file_stem("Storage-API.v2").unwrap();
        assert_eq!(name.as_str(), "storage_api_v2");
    }

    #[test]
    fn test_module_name_with_suffix() {
        let name = ModuleName::new("storage").unwrap();
        assert_eq!(name.with_suffix("_iface").as_str(), "storage_iface");
    }

    #[test]
    fn test_module_name_serde_roundtrip_validates() {
        let name: ModuleName = serde_json::from_str("\"client\"").unwrap();
        assert_eq!(name.as_str(), "client");

        let invalid: std::result::Result<ModuleName, _> = serde_json::from_str("\"fn\"");
        assert!(invalid.is_err());
    }

    // ========================================================================
    // RustPath
    // ========================================================================

    #[test]
    fn test_rust_path_accepts_common_roots() {
        for path in ["crate", "super", "self", "crate::api", "::sdk::v1", "super::super"] {
            assert!(RustPath::new(path).is_ok(), "rejected {path}");
        }
    }

    #[test]
    fn test_rust_path_rejects_invalid() {
        assert!(RustPath::new("").is_err());
        assert!(RustPath::new("crate::").is_err());
        assert!(RustPath::new("a b").is_err());
        assert!(RustPath::new("Vec<u8>").is_err());
    }

    #[test]
    fn test_rust_path_join() {
        let path = RustPath::new("crate").unwrap();
        assert_eq!(path.join("client").unwrap().as_str(), "crate::client");
        assert_eq!(path.join("a::b").unwrap().as_str(), "crate::a::b");
    }

    #[test]
    fn test_rust_path_trims_whitespace() {
        let path = RustPath::new("  crate::api ").unwrap();
        assert_eq!(path.as_str(), "crate::api");
    }
}
