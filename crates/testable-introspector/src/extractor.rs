//! Struct shape extraction.
//!
//! Walks the top-level items of a parsed package. Exported structs are
//! collected first so that `impl` blocks may appear before or after the
//! struct they belong to; methods are then gathered from inherent `impl`
//! blocks in source order.

use crate::parser::SourcePackage;
use crate::render::{cfg_attrs, doc_lines, generics_to_strings, type_to_string, use_to_string};
use crate::types::{FieldInfo, ImportInfo, MethodInfo, PackageInfo, ParamInfo, Receiver, StructInfo};
use std::collections::{HashMap, HashSet};
use testable_core::Result;

/// Extracts the exported struct shapes of one package.
///
/// # Errors
///
/// Does not fail for a package produced by the parser. Items it cannot
/// describe, such as generic structs, are logged and skipped.
///
/// # Examples
///
/// ```
/// use testable_introspector::{Receiver, extract_package, parse_source};
///
/// let package = parse_source("queue", r#"
///     pub struct Queue { pub capacity: usize, len: usize }
///
///     impl Queue {
///         pub fn push(&mut self, item: String) -> bool { true }
///         pub fn with_capacity(capacity: usize) -> Self { todo!() }
///         fn internal(&self) {}
///     }
/// "#).unwrap();
///
/// let info = extract_package(&package).unwrap();
/// let queue = &info.structs[0];
/// assert_eq!(queue.fields.len(), 1);
/// assert_eq!(queue.methods.len(), 1);
/// assert_eq!(queue.methods[0].receiver, Receiver::RefMut { lifetime: None });
/// ```
pub fn extract_package(package: &SourcePackage) -> Result<PackageInfo> {
    let mut info = PackageInfo::new(package.name.clone(), package.module_path.clone());
    info.source_file.clone_from(&package.path);

    info.imports = extract_imports(&package.file);

    let mut index = HashMap::new();
    let mut generic_structs = HashSet::new();

    for item in &package.file.items {
        let syn::Item::Struct(item) = item else {
            continue;
        };
        if !is_public(&item.vis) {
            continue;
        }

        let name = item.ident.to_string();
        if !item.generics.params.is_empty() {
            tracing::warn!(
                "Skipping generic struct '{}' in package '{}'",
                name,
                package.name
            );
            generic_structs.insert(name);
            continue;
        }

        tracing::debug!("Found struct '{}' in package '{}'", name, package.name);
        index.insert(name, info.structs.len());
        info.structs.push(extract_struct(item));
    }

    for item in &package.file.items {
        let syn::Item::Impl(block) = item else {
            continue;
        };
        if block.trait_.is_some() {
            continue;
        }
        let Some(self_name) = self_type_name(&block.self_ty) else {
            continue;
        };
        if generic_structs.contains(&self_name) {
            continue;
        }
        let Some(&position) = index.get(&self_name) else {
            continue;
        };
        if !block.generics.params.is_empty() {
            tracing::warn!(
                "Skipping generic impl block for '{}' in package '{}'",
                self_name,
                package.name
            );
            continue;
        }

        let impl_cfgs = cfg_attrs(&block.attrs);
        for impl_item in &block.items {
            let syn::ImplItem::Fn(method) = impl_item else {
                continue;
            };
            if !is_public(&method.vis) {
                continue;
            }
            if let Some(mut info_method) = extract_method(&self_name, method) {
                let mut cfgs = impl_cfgs.clone();
                cfgs.append(&mut info_method.cfgs);
                info_method.cfgs = cfgs;
                info.structs[position].methods.push(info_method);
            }
        }
    }

    tracing::debug!(
        "Extracted {} structs, {} fields, {} methods from '{}'",
        info.structs.len(),
        info.field_count(),
        info.method_count(),
        package.name
    );
    Ok(info)
}

/// Extracts every package, dropping those without exported structs.
///
/// # Errors
///
/// Returns the first extraction error.
pub fn extract_all(packages: &[SourcePackage]) -> Result<Vec<PackageInfo>> {
    let mut infos = Vec::with_capacity(packages.len());
    for package in packages {
        let info = extract_package(package)?;
        if info.structs.is_empty() {
            tracing::info!("Package '{}' has no exported structs, skipping", package.name);
            continue;
        }
        infos.push(info);
    }
    Ok(infos)
}

/// Collects `use` items that resolve the same way from another module.
///
/// Paths starting at `self`, `super`, or a child module of the file are
/// relative to the original module and are left out.
fn extract_imports(file: &syn::File) -> Vec<ImportInfo> {
    let local_modules: HashSet<String> = file
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Mod(module) => Some(module.ident.to_string()),
            _ => None,
        })
        .collect();

    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Use(item) => Some(item),
            _ => None,
        })
        .filter_map(|item| {
            let root = use_root(&item.tree)?;
            if root == "self" || root == "super" || local_modules.contains(&root) {
                tracing::debug!("Not repeating relative import rooted at '{root}'");
                return None;
            }
            Some(ImportInfo {
                root,
                source: use_to_string(item),
            })
        })
        .collect()
}

fn use_root(tree: &syn::UseTree) -> Option<String> {
    match tree {
        syn::UseTree::Path(path) => Some(path.ident.to_string()),
        syn::UseTree::Name(name) => Some(name.ident.to_string()),
        syn::UseTree::Rename(rename) => Some(rename.ident.to_string()),
        syn::UseTree::Glob(_) | syn::UseTree::Group(_) => None,
    }
}

const fn is_public(vis: &syn::Visibility) -> bool {
    matches!(vis, syn::Visibility::Public(_))
}

fn self_type_name(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(path) if path.qself.is_none() => {
            path.path.get_ident().map(ToString::to_string)
        }
        _ => None,
    }
}

fn extract_struct(item: &syn::ItemStruct) -> StructInfo {
    let mut info = StructInfo::new(item.ident.to_string());
    info.docs = doc_lines(&item.attrs);
    info.cfgs = cfg_attrs(&item.attrs);

    if let syn::Fields::Named(fields) = &item.fields {
        info.fields = fields
            .named
            .iter()
            .filter(|field| is_public(&field.vis))
            .filter_map(|field| {
                field.ident.as_ref().map(|ident| FieldInfo {
                    name: ident.to_string(),
                    ty: type_to_string(&field.ty),
                    docs: doc_lines(&field.attrs),
                    cfgs: cfg_attrs(&field.attrs),
                })
            })
            .collect();
    }

    info
}

fn extract_method(struct_name: &str, method: &syn::ImplItemFn) -> Option<MethodInfo> {
    let sig = &method.sig;
    let name = sig.ident.to_string();

    if sig.abi.is_some() {
        tracing::warn!("Skipping extern method '{struct_name}::{name}'");
        return None;
    }
    if sig.variadic.is_some() {
        tracing::warn!("Skipping variadic method '{struct_name}::{name}'");
        return None;
    }

    let Some(receiver) = sig.receiver() else {
        tracing::debug!("Skipping associated function '{struct_name}::{name}'");
        return None;
    };
    if receiver.colon_token.is_some() {
        tracing::warn!("Skipping method '{struct_name}::{name}' with a typed receiver");
        return None;
    }

    let receiver = match &receiver.reference {
        Some((_, lifetime)) => {
            let lifetime = lifetime.as_ref().map(ToString::to_string);
            if receiver.mutability.is_some() {
                Receiver::RefMut { lifetime }
            } else {
                Receiver::Ref { lifetime }
            }
        }
        None => Receiver::Value,
    };

    if sig.constness.is_some() {
        tracing::debug!("Dropping const qualifier of '{struct_name}::{name}'");
    }

    let (generics, where_clause) = generics_to_strings(&sig.generics);
    let output = match &sig.output {
        syn::ReturnType::Default => None,
        syn::ReturnType::Type(_, ty) => match ty.as_ref() {
            syn::Type::Tuple(tuple) if tuple.elems.is_empty() => None,
            ty => Some(type_to_string(ty)),
        },
    };

    Some(MethodInfo {
        name,
        receiver,
        generics,
        where_clause,
        params: extract_params(sig),
        output,
        is_async: sig.asyncness.is_some(),
        is_unsafe: sig.unsafety.is_some(),
        docs: doc_lines(&method.attrs),
        cfgs: cfg_attrs(&method.attrs),
    })
}

/// Collects parameters, naming non-identifier patterns `argN`.
fn extract_params(sig: &syn::Signature) -> Vec<ParamInfo> {
    let typed: Vec<&syn::PatType> = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            syn::FnArg::Typed(pat_type) => Some(pat_type),
            syn::FnArg::Receiver(_) => None,
        })
        .collect();

    let mut taken: HashSet<String> = typed
        .iter()
        .filter_map(|pat_type| simple_binding(&pat_type.pat))
        .collect();

    typed
        .iter()
        .enumerate()
        .map(|(position, pat_type)| {
            let name = simple_binding(&pat_type.pat).unwrap_or_else(|| {
                let mut candidate = format!("arg{position}");
                while taken.contains(&candidate) {
                    candidate.push('_');
                }
                taken.insert(candidate.clone());
                candidate
            });
            ParamInfo::new(name, type_to_string(&pat_type.ty))
        })
        .collect()
}

fn simple_binding(pat: &syn::Pat) -> Option<String> {
    match pat {
        syn::Pat::Ident(ident) if ident.subpat.is_none() => Some(ident.ident.to_string()),
        _ => None,
    }
}
