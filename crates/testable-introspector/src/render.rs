//! Source text rendering for syntax fragments.
//!
//! `quote` output is valid but spaced token by token (`Vec < u8 >`). Shapes
//! are also shown to users by `inspect`, so fragments are printed through
//! `prettyplease` inside a throwaway item and cut back out. The code
//! generator uses the same functions after rewriting types.

use proc_macro2::Span;
use syn::{Attribute, Expr, Lit, Meta};

const PLACEHOLDER: &str = "__Rendered";

fn placeholder_ident() -> syn::Ident {
    syn::Ident::new(PLACEHOLDER, Span::call_site())
}

fn unparse_item(item: syn::Item) -> String {
    let file = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items: vec![item],
    };
    prettyplease::unparse(&file)
}

/// Joins a multi-line rendering back onto one line.
fn collapse(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("< ", "<")
        .replace(", >", ">")
        .replace(",>", ">")
        .replace("( ", "(")
        .replace(", )", ")")
}

/// Renders a type as source text, e.g. `HashMap<String, Vec<u8>>`.
#[must_use]
pub fn type_to_string(ty: &syn::Type) -> String {
    let item = syn::Item::Type(syn::ItemType {
        attrs: Vec::new(),
        vis: syn::Visibility::Inherited,
        type_token: syn::token::Type::default(),
        ident: placeholder_ident(),
        generics: syn::Generics::default(),
        eq_token: syn::token::Eq::default(),
        ty: Box::new(ty.clone()),
        semi_token: syn::token::Semi::default(),
    });
    let text = unparse_item(item);
    let prefix = format!("type {PLACEHOLDER} = ");
    let body = text
        .trim()
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix(';'))
        .unwrap_or(&text);
    collapse(body)
}

/// Renders generic parameters and the where clause separately.
///
/// Returns `("<T: Clone>", "where T: Send")`; either part is empty when
/// absent.
#[must_use]
pub fn generics_to_strings(generics: &syn::Generics) -> (String, String) {
    if generics.params.is_empty() && generics.where_clause.is_none() {
        return (String::new(), String::new());
    }

    let item = syn::Item::Fn(syn::ItemFn {
        attrs: Vec::new(),
        vis: syn::Visibility::Inherited,
        sig: syn::Signature {
            constness: None,
            asyncness: None,
            unsafety: None,
            abi: None,
            fn_token: syn::token::Fn::default(),
            ident: placeholder_ident(),
            generics: generics.clone(),
            paren_token: syn::token::Paren::default(),
            inputs: syn::punctuated::Punctuated::new(),
            variadic: None,
            output: syn::ReturnType::Default,
        },
        block: Box::new(syn::Block {
            brace_token: syn::token::Brace::default(),
            stmts: Vec::new(),
        }),
    });
    let text = unparse_item(item);
    let Some(after_name) = text.trim().strip_prefix(&format!("fn {PLACEHOLDER}")) else {
        return (String::new(), String::new());
    };

    let split = generic_params_end(after_name);
    let (params, rest) = after_name.split_at(split);

    let where_clause = rest
        .trim_start()
        .strip_prefix("()")
        .map(str::trim)
        .and_then(|rest| rest.strip_suffix("{}"))
        .map(str::trim)
        .filter(|rest| rest.starts_with("where"))
        .map(|rest| collapse(rest).trim_end_matches(',').to_string())
        .unwrap_or_default();

    (collapse(params), where_clause)
}

/// Byte offset just past the closing `>` of a leading generic list.
fn generic_params_end(text: &str) -> usize {
    if !text.starts_with('<') {
        return 0;
    }

    let mut depth = 0usize;
    let mut previous = ' ';
    for (index, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            // `->` inside `Fn(..) -> T` bounds
            '>' if previous != '-' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return index + 1;
                }
            }
            _ => {}
        }
        previous = c;
    }
    text.len()
}

/// Collects the raw text of `#[doc = "..."]` attributes.
///
/// Lines keep their leading space, so `/// Hello` yields `" Hello"`.
#[must_use]
pub fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .flat_map(|value| {
            value
                .split('\n')
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Renders every `#[cfg(...)]` attribute as source text.
#[must_use]
pub fn cfg_attrs(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cfg"))
        .map(attr_to_string)
        .collect()
}

/// Renders a `use` declaration with its visibility removed.
#[must_use]
pub fn use_to_string(item: &syn::ItemUse) -> String {
    let mut item = item.clone();
    item.vis = syn::Visibility::Inherited;
    item.attrs.retain(|attr| attr.path().is_ident("cfg"));
    unparse_item(syn::Item::Use(item)).trim().to_string()
}

fn attr_to_string(attr: &Attribute) -> String {
    let item = syn::Item::Type(syn::ItemType {
        attrs: vec![attr.clone()],
        vis: syn::Visibility::Inherited,
        type_token: syn::token::Type::default(),
        ident: placeholder_ident(),
        generics: syn::Generics::default(),
        eq_token: syn::token::Eq::default(),
        ty: Box::new(syn::Type::Tuple(syn::TypeTuple {
            paren_token: syn::token::Paren::default(),
            elems: syn::punctuated::Punctuated::new(),
        })),
        semi_token: syn::token::Semi::default(),
    });
    let text = unparse_item(item);
    let attr_text = text
        .split(&format!("type {PLACEHOLDER}"))
        .next()
        .unwrap_or_default();
    collapse(attr_text)
}
