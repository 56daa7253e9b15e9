//! Template engine for code generation using Handlebars.
//!
//! Provides a wrapper around Handlebars with the built-in Rust templates
//! registered. Escaping is disabled: the output is Rust source, not HTML.
//!
//! # Examples
//!
//! ```
//! use testable_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let context = json!({"modules": ["client", "client_iface"]});
//! let result = engine.render("index/module", &context).unwrap();
//! assert!(result.contains("pub mod client_iface;"));
//! ```

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;
use testable_core::{Error, Result};

/// Built-in templates as `(name, source)` pairs.
const BUILTIN_TEMPLATES: [(&str, &str); 5] = [
    (
        "interface/module",
        include_str!("../templates/interface/module.rs.hbs"),
    ),
    (
        "interface/trait",
        include_str!("../templates/interface/trait.rs.hbs"),
    ),
    (
        "implementation/module",
        include_str!("../templates/implementation/module.rs.hbs"),
    ),
    (
        "implementation/wrapper",
        include_str!("../templates/implementation/wrapper.rs.hbs"),
    ),
    ("index/module", include_str!("../templates/index/module.rs.hbs")),
];

/// Template engine for code generation.
///
/// Wraps Handlebars and provides pre-registered templates for generating
/// trait modules, wrapper modules, and the index module.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("param_list", Box::new(param_list_helper));
        handlebars.register_helper("arg_list", Box::new(arg_list_helper));

        for (name, source) in BUILTIN_TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    template: name.to_string(),
                    message: format!("failed to register: {e}"),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A variable used by the template is missing from the context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                template: template_name.to_string(),
                message: e.to_string(),
            })
    }

    /// Registers a custom template, replacing a built-in one of the same
    /// name.
    ///
    /// # Errors
    ///
    /// Returns error if template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use testable_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register_template_string(
    ///     "custom",
    ///     "// Custom template: {{name}}"
    /// ).unwrap();
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                template: name.to_string(),
                message: format!("failed to register: {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

/// Collects `(name, ty)` pairs from a parameter array.
fn params<'a>(h: &'a Helper<'_>) -> Vec<(&'a str, &'a str)> {
    h.param(0)
        .and_then(|v| v.value().as_array())
        .map(|params| {
            params
                .iter()
                .filter_map(|p| Some((p.get("name")?.as_str()?, p.get("ty")?.as_str()?)))
                .collect()
        })
        .unwrap_or_default()
}

/// `{{param_list params}}` renders `a: u8, b: &str`.
fn param_list_helper(
    h: &Helper<'_>,
    _: &Handlebars<'_>,
    _: &Context,
    _: &mut RenderContext<'_, '_>,
    out: &mut dyn Output,
) -> HelperResult {
    let list = params(h)
        .into_iter()
        .map(|(name, ty)| format!("{name}: {ty}"))
        .collect::<Vec<_>>()
        .join(", ");
    out.write(&list)?;
    Ok(())
}

/// `{{arg_list params}}` renders `a, b`.
fn arg_list_helper(
    h: &Helper<'_>,
    _: &Handlebars<'_>,
    _: &Context,
    _: &mut RenderContext<'_, '_>,
    out: &mut dyn Output,
) -> HelperResult {
    let list = params(h)
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ");
    out.write(&list)?;
    Ok(())
}
