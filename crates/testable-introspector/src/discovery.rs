//! Package discovery.
//!
//! The [`Introspector`] runs the parser and the extractor over a directory
//! and keeps the discovered packages by name.

use crate::extractor::extract_all;
use crate::parser::parse_package_dir;
use crate::types::PackageInfo;
use std::collections::HashMap;
use std::path::Path;
use testable_core::{GeneratorConfig, ModuleName, Result};

/// Discovers and caches the struct shapes of source packages.
///
/// # Examples
///
/// ```no_run
/// use testable_core::GeneratorConfig;
/// use testable_introspector::Introspector;
///
/// let mut introspector = Introspector::new(GeneratorConfig::default());
/// let packages = introspector.discover("src/api")?;
/// println!("found {} packages", packages.len());
/// # Ok::<(), testable_core::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Introspector {
    config: GeneratorConfig,
    packages: HashMap<ModuleName, PackageInfo>,
}

impl Introspector {
    /// Creates an introspector using the discovery settings of `config`.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            packages: HashMap::new(),
        }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Parses and extracts every package in `dir`.
    ///
    /// Packages without exported structs are dropped. The result is in
    /// sorted path order and replaces any previously cached package with
    /// the same name.
    ///
    /// # Errors
    ///
    /// Returns the first parse, I/O, or extraction error.
    pub fn discover(&mut self, dir: impl AsRef<Path>) -> Result<Vec<PackageInfo>> {
        let dir = dir.as_ref();
        tracing::info!("Discovering packages in {}", dir.display());

        let sources = parse_package_dir(dir, &self.config)?;
        let packages = extract_all(&sources)?;

        for package in &packages {
            self.packages.insert(package.name.clone(), package.clone());
        }

        tracing::info!(
            "Discovered {} packages ({} structs)",
            packages.len(),
            packages.iter().map(|p| p.structs.len()).sum::<usize>()
        );
        Ok(packages)
    }

    /// Returns a cached package by name.
    #[must_use]
    pub fn get_package(&self, name: &ModuleName) -> Option<&PackageInfo> {
        self.packages.get(name)
    }

    /// Lists cached packages sorted by name.
    #[must_use]
    pub fn list_packages(&self) -> Vec<&PackageInfo> {
        let mut packages: Vec<_> = self.packages.values().collect();
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        packages
    }

    /// Returns the number of cached packages.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Removes a cached package. Returns `true` if it was present.
    pub fn remove_package(&mut self, name: &ModuleName) -> bool {
        self.packages.remove(name).is_some()
    }

    /// Clears the cache.
    pub fn clear(&mut self) {
        self.packages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_introspector_default_is_empty() {
        let introspector = Introspector::default();
        assert_eq!(introspector.package_count(), 0);
        assert!(introspector.list_packages().is_empty());
    }

    #[test]
    fn test_discover_caches_packages() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("b.rs"), "pub struct B;").unwrap();
        std::fs::write(temp.path().join("a.rs"), "pub struct A;").unwrap();
        std::fs::write(temp.path().join("c.rs"), "pub fn only_functions() {}").unwrap();

        let mut introspector = Introspector::new(GeneratorConfig::default());
        let packages = introspector.discover(temp.path()).unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(introspector.package_count(), 2);

        let a = ModuleName::new("a").unwrap();
        assert!(introspector.get_package(&a).is_some());
        assert!(introspector.remove_package(&a));
        assert!(!introspector.remove_package(&a));

        introspector.clear();
        assert_eq!(introspector.package_count(), 0);
    }
}
