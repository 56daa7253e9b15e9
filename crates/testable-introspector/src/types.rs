//! Extracted shape types.
//!
//! These are plain data: every type is kept as Rust source text so the
//! shapes can be inspected, serialized, and rendered without holding on to
//! the syntax tree they came from.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use testable_core::{ModuleName, Result, RustPath};

/// An exported field of a struct.
///
/// # Examples
///
/// ```
/// use testable_introspector::FieldInfo;
///
/// let field = FieldInfo::new("endpoint", "String");
/// assert_eq!(field.name, "endpoint");
/// assert!(field.docs.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Field type as source text
    pub ty: String,
    /// Doc comment lines, without the `///` prefix
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    /// `#[cfg(..)]` attributes as source text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cfgs: Vec<String>,
}

impl FieldInfo {
    /// Creates a field without docs or cfg attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            docs: Vec::new(),
            cfgs: Vec::new(),
        }
    }
}

/// A method parameter (the receiver is not a parameter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInfo {
    /// Binding name used for forwarding
    pub name: String,
    /// Parameter type as source text
    pub ty: String,
}

impl ParamInfo {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// The `self` receiver of a method.
///
/// `mut self` is recorded as [`Receiver::Value`]: the binding mode is local
/// to the original body and not part of the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Receiver {
    /// `&self` or `&'a self`
    Ref {
        /// Explicit lifetime, such as `'a`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lifetime: Option<String>,
    },
    /// `&mut self` or `&'a mut self`
    RefMut {
        /// Explicit lifetime, such as `'a`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lifetime: Option<String>,
    },
    /// `self` or `mut self`
    Value,
}

impl Receiver {
    /// Returns the receiver as it appears in a signature.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_introspector::Receiver;
    ///
    /// assert_eq!(Receiver::Ref { lifetime: None }.as_source(), "&self");
    /// assert_eq!(
    ///     Receiver::RefMut { lifetime: Some("'a".to_string()) }.as_source(),
    ///     "&'a mut self"
    /// );
    /// assert_eq!(Receiver::Value.as_source(), "self");
    /// ```
    #[must_use]
    pub fn as_source(&self) -> String {
        match self {
            Self::Ref { lifetime: None } => "&self".to_string(),
            Self::Ref {
                lifetime: Some(lt),
            } => format!("&{lt} self"),
            Self::RefMut { lifetime: None } => "&mut self".to_string(),
            Self::RefMut {
                lifetime: Some(lt),
            } => format!("&{lt} mut self"),
            Self::Value => "self".to_string(),
        }
    }

    /// Returns `true` for receivers that take ownership of `self`.
    #[must_use]
    pub const fn is_by_value(&self) -> bool {
        matches!(self, Self::Value)
    }
}

/// An exported method of a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Receiver form
    pub receiver: Receiver,
    /// Generic parameter list including angle brackets, or empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub generics: String,
    /// Where clause including the `where` keyword, or empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub where_clause: String,
    /// Parameters in declaration order
    pub params: Vec<ParamInfo>,
    /// Return type, `None` for `()`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Declared `async`
    #[serde(default)]
    pub is_async: bool,
    /// Declared `unsafe`
    #[serde(default)]
    pub is_unsafe: bool,
    /// Doc comment lines, without the `///` prefix
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    /// `#[cfg(..)]` attributes of the method and its `impl` block
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cfgs: Vec<String>,
}

impl MethodInfo {
    /// Creates a synchronous, non-generic method taking `&self`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: Receiver::Ref { lifetime: None },
            generics: String::new(),
            where_clause: String::new(),
            params: Vec::new(),
            output: None,
            is_async: false,
            is_unsafe: false,
            docs: Vec::new(),
            cfgs: Vec::new(),
        }
    }
}

/// The extracted shape of one exported struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructInfo {
    /// Struct name
    pub name: String,
    /// Doc comment lines, without the `///` prefix
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    /// `#[cfg(..)]` attributes of the struct
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cfgs: Vec<String>,
    /// Exported fields in declaration order
    pub fields: Vec<FieldInfo>,
    /// Exported methods in source order
    pub methods: Vec<MethodInfo>,
}

impl StructInfo {
    /// Creates a struct shape with no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: Vec::new(),
            cfgs: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Returns `true` if a method with the given name exists.
    #[must_use]
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }
}

/// A `use` declaration of the source module.
///
/// Generated modules repeat these so that types written relative to the
/// source module's imports still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportInfo {
    /// First path segment, such as `std` or `crate`
    pub root: String,
    /// Full declaration without visibility, e.g. `use std::fmt;`
    pub source: String,
}

/// The extracted shapes of one source module.
///
/// # Examples
///
/// ```
/// use testable_core::{ModuleName, RustPath};
/// use testable_introspector::{PackageInfo, StructInfo};
///
/// let mut package = PackageInfo::new(ModuleName::new("client").unwrap(), vec!["client".to_string()]);
/// package.structs.push(StructInfo::new("Client"));
///
/// assert!(package.contains_struct("Client"));
/// let crate_path = RustPath::new("crate::api").unwrap();
/// assert_eq!(package.original_path(&crate_path).unwrap().as_str(), "crate::api::client");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Module name used for the generated modules
    pub name: ModuleName,
    /// Module path segments relative to the configured crate path
    ///
    /// Empty when the package is the crate path itself (`lib.rs`, `mod.rs`).
    pub module_path: Vec<String>,
    /// File the package was read from
    #[serde(default)]
    pub source_file: PathBuf,
    /// Top-level `use` declarations not relative to the module itself
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ImportInfo>,
    /// Exported structs in declaration order
    pub structs: Vec<StructInfo>,
}

impl PackageInfo {
    /// Creates an empty package.
    #[must_use]
    pub const fn new(name: ModuleName, module_path: Vec<String>) -> Self {
        Self {
            name,
            module_path,
            source_file: PathBuf::new(),
            imports: Vec::new(),
            structs: Vec::new(),
        }
    }

    /// Returns the names of all structs in declaration order.
    pub fn struct_names(&self) -> impl Iterator<Item = &str> {
        self.structs.iter().map(|s| s.name.as_str())
    }

    /// Returns `true` if the package declares a struct with this name.
    #[must_use]
    pub fn contains_struct(&self, name: &str) -> bool {
        self.structs.iter().any(|s| s.name == name)
    }

    /// Returns the total number of extracted methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.structs.iter().map(|s| s.methods.len()).sum()
    }

    /// Returns the total number of extracted fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.structs.iter().map(|s| s.fields.len()).sum()
    }

    /// Returns the Rust path of the original module.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined path is not a valid Rust path.
    pub fn original_path(&self, crate_path: &RustPath) -> Result<RustPath> {
        if self.module_path.is_empty() {
            Ok(crate_path.clone())
        } else {
            crate_path.join(&self.module_path.join("::"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> PackageInfo {
        let mut package = PackageInfo::new(
            ModuleName::new("storage").unwrap(),
            vec!["storage".to_string()],
        );
        let mut bucket = StructInfo::new("Bucket");
        bucket.fields.push(FieldInfo::new("name", "String"));
        bucket.methods.push(MethodInfo::new("list"));
        bucket.methods.push(MethodInfo::new("delete"));
        package.structs.push(bucket);
        package.structs.push(StructInfo::new("Object"));
        package
    }

    #[test]
    fn test_package_counts() {
        let package = package();
        assert_eq!(package.method_count(), 2);
        assert_eq!(package.field_count(), 1);
        assert_eq!(
            package.struct_names().collect::<Vec<_>>(),
            vec!["Bucket", "Object"]
        );
    }

    #[test]
    fn test_contains_struct() {
        let package = package();
        assert!(package.contains_struct("Object"));
        assert!(!package.contains_struct("Missing"));
    }

    #[test]
    fn test_original_path_for_root_module() {
        let package = PackageInfo::new(ModuleName::new("api").unwrap(), Vec::new());
        let crate_path = RustPath::new("crate::api").unwrap();
        assert_eq!(
            package.original_path(&crate_path).unwrap().as_str(),
            "crate::api"
        );
    }

    #[test]
    fn test_original_path_for_nested_module() {
        let package = PackageInfo::new(
            ModuleName::new("v1_users").unwrap(),
            vec!["v1".to_string(), "users".to_string()],
        );
        let crate_path = RustPath::new("crate").unwrap();
        assert_eq!(
            package.original_path(&crate_path).unwrap().as_str(),
            "crate::v1::users"
        );
    }

    #[test]
    fn test_has_method() {
        let package = package();
        assert!(package.structs[0].has_method("list"));
        assert!(!package.structs[0].has_method("name"));
    }

    #[test]
    fn test_receiver_source() {
        assert_eq!(Receiver::Ref { lifetime: None }.as_source(), "&self");
        assert_eq!(
            Receiver::Ref {
                lifetime: Some("'a".to_string())
            }
            .as_source(),
            "&'a self"
        );
        assert_eq!(Receiver::RefMut { lifetime: None }.as_source(), "&mut self");
        assert!(Receiver::Value.is_by_value());
        assert!(!Receiver::RefMut { lifetime: None }.is_by_value());
    }
}
