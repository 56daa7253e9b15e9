//! Wrapper module rendering.
//!
//! Produces `<name>`: one wrapper struct per source struct that owns the
//! original value and implements the generated trait by forwarding.

use crate::context::PackageContext;
use crate::format::finish_module;
use crate::template_engine::TemplateEngine;
use crate::types::GeneratedFile;
use serde::Serialize;
use testable_core::{GeneratorConfig, Result};
use testable_introspector::PackageInfo;

#[derive(Serialize)]
struct ModuleContext<'a> {
    original_path: &'a str,
    iface_path: &'a str,
    imports: &'a [String],
    items: Vec<String>,
}

/// Renders wrapper modules.
#[derive(Debug, Clone, Copy)]
pub struct ImplementationRenderer<'a> {
    engine: &'a TemplateEngine,
}

impl<'a> ImplementationRenderer<'a> {
    /// Creates a renderer using `engine`.
    #[must_use]
    pub const fn new(engine: &'a TemplateEngine) -> Self {
        Self { engine }
    }

    /// Renders the wrapper module of `package`.
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
        tracing::debug!("Rendering wrapper module '{}'", package.name);

        let items = context
            .structs
            .iter()
            .map(|s| self.engine.render("implementation/wrapper", s))
            .collect::<Result<Vec<_>>>()?;

        let source = self.engine.render(
            "implementation/module",
            &ModuleContext {
                original_path: &context.original_path,
                iface_path: &context.iface_path,
                imports: &context.imports,
                items,
            },
        )?;

        Ok(GeneratedFile {
            path: config.layout.module_file(&package.name),
            content: finish_module(package.name.as_str(), &source, config)?,
        })
    }
}
