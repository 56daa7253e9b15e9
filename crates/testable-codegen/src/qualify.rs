//! Type qualification for generated signatures.
//!
//! Inside a generated module, `Client` names the generated trait or
//! wrapper, not the original struct. Every type that refers to a struct of
//! the source package, and every `Self`, is rewritten to
//! `original::<Struct>`.

use proc_macro2::Span;
use std::collections::HashSet;
use syn::visit_mut::{self, VisitMut};
use testable_core::{Error, Result};
use testable_introspector::render::{generics_to_strings, type_to_string};

/// Alias of the source module in generated code.
pub const ORIGINAL_ALIAS: &str = "original";

/// Rewrites type text for one package.
///
/// # Examples
///
/// ```
/// use testable_codegen::qualify::Qualifier;
///
/// let qualifier = Qualifier::new("client", ["Client", "Response"]);
/// assert_eq!(
///     qualifier.qualify_type("Result<Response, Error>", "Client").unwrap(),
///     "Result<original::Response, Error>"
/// );
/// assert_eq!(qualifier.qualify_type("&Self", "Client").unwrap(), "&original::Client");
/// ```
#[derive(Debug, Clone)]
pub struct Qualifier {
    module: String,
    structs: HashSet<String>,
}

impl Qualifier {
    /// Creates a qualifier for the structs of module `module`.
    pub fn new<I, S>(module: &str, structs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module: module.to_string(),
            structs: structs.into_iter().map(Into::into).collect(),
        }
    }

    /// Qualifies a type written inside an `impl` of `self_name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::FormatError` if the text is not a Rust type.
    pub fn qualify_type(&self, ty: &str, self_name: &str) -> Result<String> {
        let mut parsed: syn::Type = syn::parse_str(ty).map_err(|e| self.error(ty, &e))?;
        self.rewriter(self_name)?.visit_type_mut(&mut parsed);
        Ok(type_to_string(&parsed))
    }

    /// Qualifies a generic parameter list and where clause.
    ///
    /// Either input may be empty. Returns the rewritten pair in the same
    /// form.
    ///
    /// # Errors
    ///
    /// Returns `Error::FormatError` if either part does not parse.
    pub fn qualify_generics(
        &self,
        params: &str,
        where_clause: &str,
        self_name: &str,
    ) -> Result<(String, String)> {
        if params.is_empty() && where_clause.is_empty() {
            return Ok((String::new(), String::new()));
        }

        let mut generics: syn::Generics = if params.is_empty() {
            syn::Generics::default()
        } else {
            syn::parse_str(params).map_err(|e| self.error(params, &e))?
        };
        if !where_clause.is_empty() {
            let clause: syn::WhereClause =
                syn::parse_str(where_clause).map_err(|e| self.error(where_clause, &e))?;
            generics.where_clause = Some(clause);
        }

        self.rewriter(self_name)?.visit_generics_mut(&mut generics);
        Ok(generics_to_strings(&generics))
    }

    fn rewriter(&self, self_name: &str) -> Result<Rewriter<'_>> {
        let alias = syn::Ident::new(ORIGINAL_ALIAS, Span::call_site());
        let self_ident: syn::Ident =
            syn::parse_str(self_name).map_err(|e| self.error(self_name, &e))?;
        Ok(Rewriter {
            structs: &self.structs,
            alias,
            self_ident,
        })
    }

    fn error(&self, text: &str, e: &syn::Error) -> Error {
        Error::FormatError {
            module: self.module.clone(),
            message: format!("cannot parse `{text}`: {e}"),
        }
    }
}

struct Rewriter<'a> {
    structs: &'a HashSet<String>,
    alias: syn::Ident,
    self_ident: syn::Ident,
}

impl VisitMut for Rewriter<'_> {
    fn visit_type_path_mut(&mut self, node: &mut syn::TypePath) {
        visit_mut::visit_type_path_mut(self, node);

        if node.qself.is_some() || node.path.leading_colon.is_some() || node.path.segments.len() != 1
        {
            return;
        }

        let segment = &node.path.segments[0];
        let target = if segment.ident == "Self" {
            self.self_ident.clone()
        } else if self.structs.contains(&segment.ident.to_string()) {
            segment.ident.clone()
        } else {
            return;
        };

        let arguments = segment.arguments.clone();
        let mut path = syn::Path {
            leading_colon: None,
            segments: syn::punctuated::Punctuated::new(),
        };
        path.segments.push(syn::PathSegment::from(self.alias.clone()));
        path.segments.push(syn::PathSegment {
            ident: target,
            arguments,
        });
        node.path = path;
    }

    /// `Self::LEN` and `Store::LEN` inside types such as `[u8; Self::LEN]`.
    fn visit_expr_path_mut(&mut self, node: &mut syn::ExprPath) {
        visit_mut::visit_expr_path_mut(self, node);

        if node.qself.is_some() || node.path.leading_colon.is_some() || node.path.segments.len() < 2
        {
            return;
        }

        let first = &node.path.segments[0];
        let target = if first.ident == "Self" {
            self.self_ident.clone()
        } else if self.structs.contains(&first.ident.to_string()) {
            first.ident.clone()
        } else {
            return;
        };

        let rest: Vec<syn::PathSegment> = node.path.segments.iter().skip(1).cloned().collect();
        let mut segments = syn::punctuated::Punctuated::new();
        segments.push(syn::PathSegment::from(self.alias.clone()));
        segments.push(syn::PathSegment::from(target));
        segments.extend(rest);
        node.path.segments = segments;
    }
}
