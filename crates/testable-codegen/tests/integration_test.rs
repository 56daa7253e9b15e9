//! Integration tests for testable-codegen
//!
//! These tests run discovery and generation end to end and check the
//! generated modules by re-parsing them with `syn`.

use std::path::Path;
use tempfile::TempDir;
use testable_codegen::{CodeGenerator, GeneratedCode};
use testable_core::{GeneratorConfig, Layout, RustPath};
use testable_introspector::{Introspector, extract_package, parse_source};

const STORAGE_SOURCE: &str = r#"
use std::collections::BTreeMap;
use std::io;

/// Key-value bucket.
pub struct Bucket {
    /// Bucket name.
    pub name: String,
    pub quota: Option<Quota>,
    objects: BTreeMap<String, Vec<u8>>,
}

pub struct Quota {
    pub max_bytes: u64,
}

impl Bucket {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), quota: None, objects: BTreeMap::new() }
    }

    /// Stores an object.
    pub fn put(&mut self, key: String, data: Vec<u8>) -> io::Result<()> {
        self.objects.insert(key, data);
        Ok(())
    }

    pub fn get<'a>(&'a self, key: &str) -> Option<&'a [u8]> {
        self.objects.get(key).map(Vec::as_slice)
    }

    pub async fn sync(&self) -> io::Result<usize> {
        Ok(self.objects.len())
    }

    pub fn split(self, _: usize) -> (Self, Self) {
        todo!()
    }

    fn private_helper(&self) {}
}

impl Quota {
    pub const fn remaining(&self, used: u64) -> u64 {
        self.max_bytes.saturating_sub(used)
    }
}
"#;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn generate(config: GeneratorConfig) -> GeneratedCode {
    let info = extract_package(&parse_source("storage", STORAGE_SOURCE).unwrap()).unwrap();
    CodeGenerator::new(config).unwrap().generate(&[info]).unwrap()
}

fn content<'a>(code: &'a GeneratedCode, path: &str) -> &'a str {
    code.get(path)
        .unwrap_or_else(|| panic!("missing generated file {path}"))
        .content()
}

const CLIENT_SOURCE: &str = r#"
pub struct Page {
    pub number: usize,
}

pub struct Client {
    pages: Vec<Page>,
}

impl Client {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn map_all(&self, f: impl Fn(&Page) -> usize) -> Vec<usize> {
        self.pages.iter().map(f).collect()
    }

    pub fn first(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().take(1)
    }

    pub async fn fetch(&mut self, number: usize) -> Option<Page> {
        Some(Page { number })
    }

    pub fn visit(&self, f: &dyn Fn(&Page)) -> Box<dyn Iterator<Item = usize> + '_> {
        self.pages.iter().for_each(f);
        Box::new(self.pages.iter().map(|p| p.number))
    }
}
"#;

fn has_sized_bound(sig: &syn::Signature) -> bool {
    sig.generics.where_clause.as_ref().is_some_and(|clause| {
        clause.predicates.iter().any(|predicate| match predicate {
            syn::WherePredicate::Type(bound) => {
                matches!(&bound.bounded_ty, syn::Type::Path(p) if p.path.is_ident("Self"))
                    && bound.bounds.iter().any(|b| {
                        matches!(b, syn::TypeParamBound::Trait(t) if t.path.is_ident("Sized"))
                    })
            }
            _ => false,
        })
    })
}

/// Tests that every generated file is valid Rust
#[test]
fn test_generated_files_parse() {
    let code = generate(GeneratorConfig::default());
    assert_eq!(code.file_count(), 3);

    for file in code.files() {
        if let Err(e) = syn::parse_file(file.content()) {
            panic!("{} does not parse: {e}\n{}", file.path(), file.content());
        }
    }
}

/// Tests the trait module surface
#[test]
fn test_trait_module() {
    let code = generate(GeneratorConfig::default());
    let iface = content(&code, "storage_iface/mod.rs");
    let file = syn::parse_file(iface).unwrap();

    let traits: Vec<_> = file
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Trait(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(traits.len(), 2);
    assert_eq!(traits[0].ident, "Bucket");
    assert_eq!(traits[1].ident, "Quota");

    let bucket_methods: Vec<String> = traits[0]
        .items
        .iter()
        .filter_map(|item| match item {
            syn::TraitItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(bucket_methods, ["name", "quota", "put", "get", "sync", "split"]);

    assert!(iface.contains("#![allow(async_fn_in_trait)]"));
    assert!(iface.contains("fn quota(&self) -> &Option<original::Quota>;"));
    assert!(iface.contains("fn put(&mut self, key: String, data: Vec<u8>) -> io::Result<()>;"));
    assert!(iface.contains("fn split(self, arg0: usize) -> (original::Bucket, original::Bucket)"));
    assert!(iface.contains("#[allow(unused_imports)]\nuse std::io;"));
    assert!(!iface.contains("private_helper"));
    assert!(!iface.contains("fn new("));
}

/// Tests that `const fn` becomes a plain trait method
#[test]
fn test_const_is_dropped() {
    let code = generate(GeneratorConfig::default());
    let iface = content(&code, "storage_iface/mod.rs");
    assert!(iface.contains("fn remaining(&self, used: u64) -> u64;"));
    assert!(!iface.contains("const fn"));
}

/// Tests the wrapper module forwarding
#[test]
fn test_wrapper_module() {
    let code = generate(GeneratorConfig::default());
    let wrapper = content(&code, "storage/mod.rs");
    let file = syn::parse_file(wrapper).unwrap();

    let impls = file
        .items
        .iter()
        .filter(|item| matches!(item, syn::Item::Impl(i) if i.trait_.is_some()))
        .count();
    // From + iface impl for each of the two structs
    assert_eq!(impls, 4);

    assert!(wrapper.contains("use super::storage_iface as iface;"));
    assert!(wrapper.contains("impl iface::Bucket for Bucket"));
    assert!(wrapper.contains("&self.inner.quota"));
    assert!(wrapper.contains("self.inner.put(key, data)"));
    assert!(wrapper.contains("self.inner.sync().await"));
    assert!(wrapper.contains("self.inner.split(arg0)"));
}

/// Tests paths for an external crate in flat layout
#[test]
fn test_flat_layout_with_external_crate() {
    let config = GeneratorConfig::builder()
        .layout(Layout::Flat)
        .crate_path(RustPath::new("::storage_sdk").unwrap())
        .base_path(RustPath::new("crate::mocks").unwrap())
        .emit_index(false)
        .build();
    let code = generate(config);

    let paths: Vec<_> = code.files().map(|f| f.path()).collect();
    assert_eq!(paths, ["storage_iface.rs", "storage.rs"]);

    let wrapper = content(&code, "storage.rs");
    assert!(wrapper.contains("use ::storage_sdk::storage as original;"));
    assert!(wrapper.contains("use crate::mocks::storage_iface as iface;"));
}

/// Tests that disabling formatting keeps valid but raw output
#[test]
fn test_unformatted_output() {
    let formatted = generate(GeneratorConfig::default());
    let raw = generate(GeneratorConfig::builder().format(false).build());

    let raw_iface = content(&raw, "storage_iface/mod.rs");
    assert!(syn::parse_file(raw_iface).is_ok());
    assert_ne!(raw_iface, content(&formatted, "storage_iface/mod.rs"));
}

/// Tests discovery plus generation over a directory of modules
#[test]
fn test_directory_pipeline() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "storage.rs", STORAGE_SOURCE);
    write(temp.path(), "clock.rs", "pub struct Clock;\nimpl Clock { pub fn now(&self) -> u64 { 0 } }");
    write(temp.path(), "storage_test.rs", "pub struct Ignored;");
    write(temp.path(), "consts.rs", "pub const LIMIT: u32 = 3;");

    let config = GeneratorConfig::builder()
        .input(temp.path())
        .output(temp.path().join("out"))
        .build();
    let mut introspector = Introspector::new(config.clone());
    let packages = introspector.discover(temp.path()).unwrap();

    let names: Vec<_> = packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["clock", "storage"]);

    let code = CodeGenerator::new(config).unwrap().generate(&packages).unwrap();
    assert_eq!(code.file_count(), 5);

    let index = content(&code, "mod.rs");
    assert!(index.starts_with("// Auto generated code DO NOT EDIT"));
    for module in ["clock", "clock_iface", "storage", "storage_iface"] {
        assert!(index.contains(&format!("pub mod {module};")), "{index}");
    }
}

/// Tests that only methods a trait object cannot call are bounded by `Self: Sized`
#[test]
fn test_dyn_incompatible_methods_are_sized_bound() {
    let info = extract_package(&parse_source("client", CLIENT_SOURCE).unwrap()).unwrap();
    let code = CodeGenerator::new(GeneratorConfig::default())
        .unwrap()
        .generate(&[info])
        .unwrap();

    let iface = syn::parse_file(content(&code, "client_iface/mod.rs")).unwrap();
    let client = iface
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Trait(t) if t.ident == "Client" => Some(t),
            _ => None,
        })
        .unwrap();

    let bounded: Vec<(String, bool)> = client
        .items
        .iter()
        .filter_map(|item| match item {
            syn::TraitItem::Fn(f) => Some((f.sig.ident.to_string(), has_sized_bound(&f.sig))),
            _ => None,
        })
        .collect();
    assert_eq!(
        bounded,
        [
            ("len".to_string(), false),
            ("map_all".to_string(), true),
            ("first".to_string(), true),
            ("fetch".to_string(), true),
            ("visit".to_string(), false),
        ]
    );

    let wrapper = syn::parse_file(content(&code, "client/mod.rs")).unwrap();
    let forwarding = wrapper
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Impl(i) if i.trait_.is_some() => Some(i),
            _ => None,
        })
        .flat_map(|i| i.items.iter())
        .filter_map(|item| match item {
            syn::ImplItem::Fn(f) => Some(&f.sig),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert!(!forwarding.is_empty());
    assert!(forwarding.iter().all(|sig| !has_sized_bound(sig)));
}
