//! Rust source introspection.
//!
//! Parses the modules of a source directory and extracts the shape of every
//! exported struct: its public fields and the public methods of its
//! inherent `impl` blocks. The result feeds the code generator.
//!
//! # Examples
//!
//! ```
//! use testable_introspector::{extract_package, parse_source};
//!
//! let package = parse_source("client", r#"
//!     pub struct Client {
//!         pub endpoint: String,
//!     }
//!
//!     impl Client {
//!         pub fn get(&self, key: &str) -> Option<String> {
//!             None
//!         }
//!     }
//! "#).unwrap();
//!
//! let info = extract_package(&package).unwrap();
//! assert_eq!(info.structs.len(), 1);
//! assert_eq!(info.structs[0].fields[0].ty, "String");
//! assert_eq!(info.structs[0].methods[0].name, "get");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod discovery;
pub mod extractor;
pub mod parser;
pub mod render;
pub mod types;

pub use discovery::Introspector;
pub use extractor::{extract_all, extract_package};
pub use parser::{SourcePackage, parse_package_dir, parse_source};
pub use types::{FieldInfo, ImportInfo, MethodInfo, PackageInfo, ParamInfo, Receiver, StructInfo};
