//! Code generator driving both renderers.
//!
//! # Examples
//!
//! ```
//! use testable_codegen::CodeGenerator;
//! use testable_core::GeneratorConfig;
//! use testable_introspector::{extract_package, parse_source};
//!
//! let package = parse_source("client", r#"
//!     pub struct Client { pub base_url: String }
//!     impl Client {
//!         pub fn get(&self, path: &str) -> String { format!("{}{path}", self.base_url) }
//!     }
//! "#).unwrap();
//! let info = extract_package(&package).unwrap();
//!
//! let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();
//! let code = generator.generate(&[info]).unwrap();
//!
//! let paths: Vec<_> = code.files().map(|f| f.path()).collect();
//! assert_eq!(paths, ["client_iface/mod.rs", "client/mod.rs", "mod.rs"]);
//! ```

use crate::context::PackageContext;
use crate::format::finish_module;
use crate::implementation::ImplementationRenderer;
use crate::interface::InterfaceRenderer;
use crate::template_engine::TemplateEngine;
use crate::types::{GeneratedCode, GeneratedFile};
use serde::Serialize;
use std::collections::BTreeSet;
use testable_core::{Error, GeneratorConfig, ModuleName, Result};
use testable_introspector::PackageInfo;

/// Name of the index module file.
pub const INDEX_FILE: &str = "mod.rs";

#[derive(Serialize)]
struct IndexContext {
    modules: Vec<String>,
}

/// Generates trait and wrapper modules for extracted packages.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing safe use across threads.
#[derive(Debug)]
pub struct CodeGenerator {
    engine: TemplateEngine,
    config: GeneratorConfig,
}

impl CodeGenerator {
    /// Creates a generator for `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or template
    /// registration fails.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate_output()?;
        let engine = TemplateEngine::new()?;
        Ok(Self { engine, config })
    }

    /// Creates a generator with a caller-supplied template engine.
    ///
    /// Lets callers override built-in templates through
    /// [`TemplateEngine::register_template_string`].
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn with_engine(config: GeneratorConfig, engine: TemplateEngine) -> Result<Self> {
        config.validate_output()?;
        Ok(Self { engine, config })
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates all files for `packages`.
    ///
    /// For each package the trait module comes first, then the wrapper
    /// module. The index module, if enabled, is last.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Two packages produce the same module name
    /// - Type qualification fails
    /// - Template rendering fails
    /// - Generated code is not valid Rust
    pub fn generate(&self, packages: &[PackageInfo]) -> Result<GeneratedCode> {
        tracing::info!("Generating code for {} packages", packages.len());

        let modules = self.module_names(packages)?;
        let interface = InterfaceRenderer::new(&self.engine);
        let implementation = ImplementationRenderer::new(&self.engine);

        let mut code = GeneratedCode::new();
        for package in packages {
            let context = PackageContext::build(package, &self.config)?;

            let iface_file = interface.render_context(package, &context, &self.config)?;
            tracing::debug!("Generated {}", iface_file.path);
            code.add_file(iface_file);

            let impl_file = implementation.render_context(package, &context, &self.config)?;
            tracing::debug!("Generated {}", impl_file.path);
            code.add_file(impl_file);
        }

        if self.config.emit_index && !packages.is_empty() {
            code.add_file(self.render_index(modules)?);
            tracing::debug!("Generated {INDEX_FILE}");
        }

        tracing::info!("Successfully generated {} files", code.file_count());
        Ok(code)
    }

    /// Collects every generated module name, rejecting collisions.
    fn module_names(&self, packages: &[PackageInfo]) -> Result<BTreeSet<String>> {
        let mut modules = BTreeSet::new();
        for package in packages {
            let names: [ModuleName; 2] = [
                package.name.clone(),
                self.config.iface_module(&package.name),
            ];
            for name in names {
                if !modules.insert(name.as_str().to_string()) {
                    return Err(Error::ConfigError {
                        message: format!(
                            "module '{name}' would be generated twice (from {})",
                            package.source_file.display()
                        ),
                    });
                }
            }
        }
        Ok(modules)
    }

    fn render_index(&self, modules: BTreeSet<String>) -> Result<GeneratedFile> {
        let source = self.engine.render(
            "index/module",
            &IndexContext {
                modules: modules.into_iter().collect(),
            },
        )?;
        Ok(GeneratedFile {
            path: INDEX_FILE.to_string(),
            content: finish_module("mod", &source, &self.config)?,
        })
    }
}
