//! Trait module rendering.
//!
//! Produces `<name>_iface`: one `pub trait` per struct listing its field
//! accessors and method signatures.

use crate::context::PackageContext;
use crate::format::finish_module;
use crate::template_engine::TemplateEngine;
use crate::types::GeneratedFile;
use serde::Serialize;
use testable_core::{GeneratorConfig, Result};
use testable_introspector::PackageInfo;

#[derive(Serialize)]
struct ModuleContext<'a> {
    has_async: bool,
    original_path: &'a str,
    imports: &'a [String],
    items: Vec<String>,
}

/// Renders trait modules.
///
/// # Examples
///
/// ```
/// use testable_codegen::{InterfaceRenderer, template_engine::TemplateEngine};
/// use testable_core::GeneratorConfig;
/// use testable_introspector::{extract_package, parse_source};
///
/// let package = parse_source("counter", r#"
///     pub struct Counter { pub step: u32 }
///     impl Counter {
///         pub fn bump(&mut self) -> u32 { self.step }
///     }
/// "#).unwrap();
/// let info = extract_package(&package).unwrap();
///
/// let engine = TemplateEngine::new().unwrap();
/// let file = InterfaceRenderer::new(&engine)
///     .render(&info, &GeneratorConfig::default())
///     .unwrap();
///
/// assert_eq!(file.path, "counter_iface/mod.rs");
/// assert!(file.content.contains("pub trait Counter {"));
/// assert!(file.content.contains("fn step(&self) -> &u32;"));
/// assert!(file.content.contains("fn bump(&mut self) -> u32;"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InterfaceRenderer<'a> {
    engine: &'a TemplateEngine,
}

impl<'a> InterfaceRenderer<'a> {
    /// Creates a renderer using `engine`.
    #[must_use]
    pub const fn new(engine: &'a TemplateEngine) -> Self {
        Self { engine }
    }

    /// Renders the trait module of `package`.
    ///
    /// # Errors
    ///
    /// Returns an error if a type cannot be qualified, a template fails, or
    /// the output is not valid Rust.
    pub fn render(&self, package: &PackageInfo, config: &GeneratorConfig) -> Result<GeneratedFile> {
        let context = PackageContext::build(package, config)?;
        self.render_context(package, &context, config)
    }

    pub(crate) fn render_context(
        &self,
        package: &PackageInfo,
        context: &PackageContext,
        config: &GeneratorConfig,
    ) -> Result<GeneratedFile> {
        let module = config.iface_module(&package.name);
        tracing::debug!("Rendering trait module '{}'", module);

        let items = context
            .structs
            .iter()
            .map(|s| self.engine.render("interface/trait", s))
            .collect::<Result<Vec<_>>>()?;

        let source = self.engine.render(
            "interface/module",
            &ModuleContext {
                has_async: context.has_async,
                original_path: &context.original_path,
                imports: &context.imports,
                items,
            },
        )?;

        Ok(GeneratedFile {
            path: config.layout.module_file(&module),
            content: finish_module(module.as_str(), &source, config)?,
        })
    }
}
