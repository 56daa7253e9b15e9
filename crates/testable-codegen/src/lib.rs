//! Code generation for testable.
//!
//! Turns extracted package shapes into two Rust modules per package using
//! Handlebars templates:
//!
//! - `<name>_iface`: one trait per struct
//! - `<name>`: one forwarding wrapper per struct implementing that trait
//!
//! All output is validated with `syn` and pretty-printed with
//! `prettyplease`.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod context;
pub mod format;
pub mod generator;
pub mod implementation;
pub mod interface;
pub mod qualify;
pub mod template_engine;
pub mod types;

pub use generator::CodeGenerator;
pub use implementation::ImplementationRenderer;
pub use interface::InterfaceRenderer;
pub use template_engine::TemplateEngine;
pub use types::{GeneratedCode, GeneratedFile};
