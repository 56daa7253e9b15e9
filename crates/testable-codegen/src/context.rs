//! Template contexts.
//!
//! Both renderers share one context per package: types are qualified once
//! so the trait and its implementation always agree on signatures.

use crate::qualify::Qualifier;
use serde::Serialize;
use syn::visit::Visit;
use testable_core::{GeneratorConfig, Result};
use testable_introspector::{MethodInfo, PackageInfo, ParamInfo, StructInfo};

/// Context shared by the module templates.
#[derive(Debug, Clone, Serialize)]
pub struct PackageContext {
    /// Path of the source module, aliased as `original`
    pub original_path: String,
    /// Path of the trait module, aliased as `iface`
    pub iface_path: String,
    /// Repeated `use` declarations of the source module
    pub imports: Vec<String>,
    /// Any method is `async`
    pub has_async: bool,
    /// One entry per struct
    pub structs: Vec<StructContext>,
}

/// Context of the trait and wrapper templates.
#[derive(Debug, Clone, Serialize)]
pub struct StructContext {
    /// Struct, trait, and wrapper name
    pub name: String,
    /// Doc lines
    pub docs: Vec<String>,
    /// `#[cfg]` attributes
    pub cfgs: Vec<String>,
    /// Field accessors
    pub fields: Vec<FieldContext>,
    /// Forwarded methods
    pub methods: Vec<MethodContext>,
}

/// A field accessor.
#[derive(Debug, Clone, Serialize)]
pub struct FieldContext {
    /// Field and accessor name
    pub name: String,
    /// Qualified field type
    pub ty: String,
    /// Doc lines
    pub docs: Vec<String>,
    /// `#[cfg]` attributes
    pub cfgs: Vec<String>,
}

/// A forwarded method.
#[derive(Debug, Clone, Serialize)]
pub struct MethodContext {
    /// Method name
    pub name: String,
    /// Doc lines
    pub docs: Vec<String>,
    /// `#[cfg]` attributes
    pub cfgs: Vec<String>,
    /// Declared `async`
    pub is_async: bool,
    /// Declared `unsafe`
    pub is_unsafe: bool,
    /// Qualified generic parameters
    pub generics: String,
    /// Receiver source
    pub receiver: String,
    /// Parameters with qualified types
    pub params: Vec<ParamInfo>,
    /// Qualified return type, empty for `()`
    pub output: String,
    /// Where clause of the wrapper method
    pub where_clause: String,
    /// Where clause of the trait method
    pub trait_where_clause: String,
}

impl PackageContext {
    /// Builds the context of `package`.
    ///
    /// # Errors
    ///
    /// Returns an error if a module path cannot be formed or a type of the
    /// package does not parse.
    pub fn build(package: &PackageInfo, config: &GeneratorConfig) -> Result<Self> {
        let original_path = package.original_path(&config.crate_path)?;
        let iface_path = config
            .base_path
            .join(config.iface_module(&package.name).as_str())?;

        let external = config.crate_path.as_str().split("::").next() != Some("crate");
        let imports = package
            .imports
            .iter()
            .filter(|import| !(external && import.root == "crate"))
            .map(|import| import.source.clone())
            .collect();

        let qualifier = Qualifier::new(package.name.as_str(), package.struct_names());
        let structs = package
            .structs
            .iter()
            .map(|info| build_struct(info, &qualifier))
            .collect::<Result<Vec<_>>>()?;

        let has_async = structs
            .iter()
            .any(|s| s.methods.iter().any(|m| m.is_async));

        Ok(Self {
            original_path: original_path.to_string(),
            iface_path: iface_path.to_string(),
            imports,
            has_async,
            structs,
        })
    }
}

fn build_struct(info: &StructInfo, qualifier: &Qualifier) -> Result<StructContext> {
    let mut fields = Vec::with_capacity(info.fields.len());
    for field in &info.fields {
        if info.has_method(&field.name) {
            tracing::warn!(
                "Skipping accessor for field '{}::{}': a method of the same name exists",
                info.name,
                field.name
            );
            continue;
        }
        fields.push(FieldContext {
            name: field.name.clone(),
            ty: qualifier.qualify_type(&field.ty, &info.name)?,
            docs: field.docs.clone(),
            cfgs: field.cfgs.clone(),
        });
    }

    let methods = info
        .methods
        .iter()
        .map(|method| build_method(method, &info.name, qualifier))
        .collect::<Result<Vec<_>>>()?;

    Ok(StructContext {
        name: info.name.clone(),
        docs: info.docs.clone(),
        cfgs: info.cfgs.clone(),
        fields,
        methods,
    })
}

fn build_method(method: &MethodInfo, self_name: &str, qualifier: &Qualifier) -> Result<MethodContext> {
    let (generics, where_clause) =
        qualifier.qualify_generics(&method.generics, &method.where_clause, self_name)?;

    let params = method
        .params
        .iter()
        .map(|param| {
            Ok(ParamInfo::new(
                param.name.clone(),
                qualifier.qualify_type(&param.ty, self_name)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let output = method
        .output
        .as_deref()
        .map(|ty| qualifier.qualify_type(ty, self_name))
        .transpose()?
        .unwrap_or_default();

    let trait_where_clause = if needs_sized_bound(method) {
        if where_clause.is_empty() {
            "where Self: Sized".to_string()
        } else {
            format!("{where_clause}, Self: Sized")
        }
    } else {
        where_clause.clone()
    };

    Ok(MethodContext {
        name: method.name.clone(),
        docs: method.docs.clone(),
        cfgs: method.cfgs.clone(),
        is_async: method.is_async,
        is_unsafe: method.is_unsafe,
        generics,
        receiver: method.receiver.as_source(),
        params,
        output,
        where_clause,
        trait_where_clause,
    })
}

/// Methods kept out of the vtable so the trait stays dyn-compatible.
///
/// Covers by-value receivers, explicit type or const parameters, implicit
/// ones (`impl Trait` arguments), `impl Trait` returns and `async fn`.
fn needs_sized_bound(method: &MethodInfo) -> bool {
    method.receiver.is_by_value()
        || method.is_async
        || has_type_params(&method.generics)
        || method.params.iter().any(|param| mentions_impl_trait(&param.ty))
        || method.output.as_deref().is_some_and(mentions_impl_trait)
}

fn mentions_impl_trait(ty: &str) -> bool {
    syn::parse_str::<syn::Type>(ty).is_ok_and(|ty| {
        let mut finder = ImplTraitFinder { found: false };
        finder.visit_type(&ty);
        finder.found
    })
}

struct ImplTraitFinder {
    found: bool,
}

impl<'ast> Visit<'ast> for ImplTraitFinder {
    fn visit_type_impl_trait(&mut self, _: &'ast syn::TypeImplTrait) {
        self.found = true;
    }
}

fn has_type_params(generics: &str) -> bool {
    syn::parse_str::<syn::Generics>(generics).is_ok_and(|g| {
        g.params
            .iter()
            .any(|p| !matches!(p, syn::GenericParam::Lifetime(_)))
    })
}
