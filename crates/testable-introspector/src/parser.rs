//! Source package discovery and parsing.
//!
//! A package is one Rust source file. Files are found with `walkdir`,
//! filtered through the configured exclusions, and parsed with
//! `syn::parse_file`. The first failure stops the walk.

use std::path::{Component, Path, PathBuf};
use testable_core::{Error, GeneratorConfig, ModuleName, Result};
use walkdir::WalkDir;

/// File stems that name their parent directory instead of themselves.
const DIRECTORY_MODULES: [&str; 3] = ["mod", "lib", "main"];

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourcePackage {
    /// Package name
    pub name: ModuleName,
    /// Module path segments below the crate path
    pub module_path: Vec<String>,
    /// File the package was read from
    pub path: PathBuf,
    /// Parsed syntax tree
    pub file: syn::File,
}

/// Parses every package in a directory.
///
/// Packages are returned in sorted path order.
///
/// # Errors
///
/// Returns `Error::ResourceNotFound` if `dir` is not a directory,
/// `Error::IoError` if a file cannot be read, and `Error::ParseError` if a
/// file is not valid Rust.
///
/// # Examples
///
/// ```no_run
/// use testable_core::GeneratorConfig;
/// use testable_introspector::parse_package_dir;
///
/// let config = GeneratorConfig::default();
/// let packages = parse_package_dir("src/api".as_ref(), &config)?;
/// for package in &packages {
///     println!("{}: {}", package.name, package.path.display());
/// }
/// # Ok::<(), testable_core::Error>(())
/// ```
pub fn parse_package_dir(dir: &Path, config: &GeneratorConfig) -> Result<Vec<SourcePackage>> {
    if !dir.is_dir() {
        return Err(Error::ResourceNotFound {
            resource: format!("input directory {}", dir.display()),
        });
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !config.is_excluded(&entry.file_name().to_string_lossy())
        });

    let mut packages = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::IoError {
                path,
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            }
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if config.is_excluded(&file_name) {
            tracing::debug!("Skipping excluded file {}", path.display());
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        let (name, module_path) = package_identity(dir, relative)?;

        tracing::debug!("Parsing {} as package '{}'", path.display(), name);
        let source = std::fs::read_to_string(path).map_err(|source| Error::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let file = parse_file(path, &source)?;

        packages.push(SourcePackage {
            name,
            module_path,
            path: path.to_path_buf(),
            file,
        });
    }

    tracing::info!("Parsed {} packages from {}", packages.len(), dir.display());
    Ok(packages)
}

/// Parses in-memory source as a package named `name`.
///
/// The package is treated as the module `name` directly below the crate
/// path.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` if `name` is not a module name and
/// `Error::ParseError` if the source is not valid Rust.
///
/// # Examples
///
/// ```
/// use testable_introspector::parse_source;
///
/// let package = parse_source("store", "pub struct Store;").unwrap();
/// assert_eq!(package.name.as_str(), "store");
/// assert_eq!(package.module_path, vec!["store".to_string()]);
///
/// assert!(parse_source("store", "pub struct {").unwrap_err().is_parse_error());
/// ```
pub fn parse_source(name: &str, source: &str) -> Result<SourcePackage> {
    let name = ModuleName::new(name)?;
    let path = PathBuf::from(format!("{name}.rs"));
    let file = parse_file(&path, source)?;

    Ok(SourcePackage {
        module_path: vec![name.as_str().to_string()],
        name,
        path,
        file,
    })
}

fn parse_file(path: &Path, source: &str) -> Result<syn::File> {
    syn::parse_file(source).map_err(|e| {
        let start = e.span().start();
        Error::ParseError {
            path: path.to_path_buf(),
            message: format!("{}:{}: {e}", start.line, start.column + 1),
        }
    })
}

/// Derives the package name and module path from a path relative to the
/// input directory.
fn package_identity(root: &Path, relative: &Path) -> Result<(ModuleName, Vec<String>)> {
    let mut segments = Vec::new();
    for component in relative.parent().into_iter().flat_map(Path::components) {
        if let Component::Normal(part) = component {
            segments.push(ModuleName::from_file_stem(&part.to_string_lossy())?.into_inner());
        }
    }

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if DIRECTORY_MODULES.contains(&stem.as_str()) {
        if !segments.is_empty() {
            let name = ModuleName::new(segments.join("_"))?;
            return Ok((name, segments));
        }
        // The input directory itself is the module.
        return Ok((directory_name(root)?, Vec::new()));
    }

    segments.push(ModuleName::from_file_stem(&stem)?.into_inner());
    let name = ModuleName::new(segments.join("_"))?;
    Ok((name, segments))
}

fn directory_name(dir: &Path) -> Result<ModuleName> {
    let resolved = dir.canonicalize().map_err(|source| Error::IoError {
        path: dir.to_path_buf(),
        source,
    })?;
    let name = resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "cannot derive a package name from {}",
                dir.display()
            ))
        })?;
    ModuleName::from_file_stem(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn names(packages: &[SourcePackage]) -> Vec<&str> {
        packages.iter().map(|p| p.name.as_str()).collect()
    }

    // ========================================================================
    // parse_source
    // ========================================================================

    #[test]
    fn test_parse_source_valid() {
        let package = parse_source("client", "pub struct Client { pub id: u64 }").unwrap();
        assert_eq!(package.name.as_str(), "client");
        assert_eq!(package.file.items.len(), 1);
    }

    #[test]
    fn test_parse_source_reports_position() {
        let err = parse_source("client", "pub struct Client {\n    id u64,\n}").unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("2:"), "missing line in: {err}");
    }

    #[test]
    fn test_parse_source_rejects_bad_name() {
        let err = parse_source("not-a-module", "").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    // ========================================================================
    // parse_package_dir
    // ========================================================================

    #[test]
    fn test_parse_dir_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "zeta.rs", "pub struct Zeta;");
        write(temp.path(), "alpha.rs", "pub struct Alpha;");
        write(temp.path(), "alpha_test.rs", "pub struct Ignored;");
        write(temp.path(), "notes.txt", "not rust");

        let packages = parse_package_dir(temp.path(), &GeneratorConfig::default()).unwrap();
        assert_eq!(names(&packages), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_parse_dir_applies_exclude_patterns() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "models.rs", "pub struct Model;");
        write(temp.path(), "models_gen.rs", "pub struct Generated;");

        let config = GeneratorConfig::builder().exclude("*_gen.rs").build();
        let packages = parse_package_dir(temp.path(), &config).unwrap();
        assert_eq!(names(&packages), vec!["models"]);
    }

    #[test]
    fn test_parse_dir_is_shallow_by_default() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "top.rs", "pub struct Top;");
        write(temp.path(), "nested/inner.rs", "pub struct Inner;");

        let packages = parse_package_dir(temp.path(), &GeneratorConfig::default()).unwrap();
        assert_eq!(names(&packages), vec!["top"]);
    }

    #[test]
    fn test_parse_dir_recursive_module_paths() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "v1/users.rs", "pub struct User;");
        write(temp.path(), "v1/mod.rs", "pub mod users;");
        write(temp.path(), "tests/helpers.rs", "pub struct Helper;");

        let config = GeneratorConfig::builder().recursive(true).build();
        let packages = parse_package_dir(temp.path(), &config).unwrap();

        assert_eq!(names(&packages), vec!["v1", "v1_users"]);
        assert_eq!(packages[0].module_path, vec!["v1".to_string()]);
        assert_eq!(
            packages[1].module_path,
            vec!["v1".to_string(), "users".to_string()]
        );
    }

    #[test]
    fn test_parse_dir_root_mod_file_uses_directory_name() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("billing");
        write(&root, "mod.rs", "pub struct Invoice;");

        let packages = parse_package_dir(&root, &GeneratorConfig::default()).unwrap();
        assert_eq!(names(&packages), vec!["billing"]);
        assert!(packages[0].module_path.is_empty());
    }

    #[test]
    fn test_parse_dir_missing() {
        let temp = TempDir::new().unwrap();
        let err = parse_package_dir(&temp.path().join("missing"), &GeneratorConfig::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_dir_stops_on_syntax_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "broken.rs", "pub struct {");
        write(temp.path(), "fine.rs", "pub struct Fine;");

        let err = parse_package_dir(temp.path(), &GeneratorConfig::default()).unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("broken.rs"));
    }
}
