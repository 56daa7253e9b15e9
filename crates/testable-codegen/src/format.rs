//! Validation and pretty-printing of generated source.

use testable_core::{Error, GeneratorConfig, Result};

/// Parses `source` and pretty-prints it with `prettyplease`.
///
/// # Errors
///
/// Returns `Error::FormatError` naming `module` if the text is not a valid
/// Rust file.
///
/// # Examples
///
/// ```
/// use testable_codegen::format::format_source;
///
/// let formatted = format_source("demo", "pub trait Demo{fn run(&self);}").unwrap();
/// assert_eq!(formatted, "pub trait Demo {\n    fn run(&self);\n}\n");
///
/// assert!(format_source("demo", "pub trait {").is_err());
/// ```
pub fn format_source(module: &str, source: &str) -> Result<String> {
    let file = check_source(module, source)?;
    Ok(prettyplease::unparse(&file))
}

/// Parses `source` without reformatting it.
///
/// # Errors
///
/// Returns `Error::FormatError` naming `module` if the text is not a valid
/// Rust file.
pub fn check_source(module: &str, source: &str) -> Result<syn::File> {
    syn::parse_file(source).map_err(|e| {
        let start = e.span().start();
        Error::FormatError {
            module: module.to_string(),
            message: format!("{}:{}: {e}", start.line, start.column + 1),
        }
    })
}

/// Turns raw template output into the final file content.
///
/// The text is always validated. It is pretty-printed when `config.format`
/// is set, and the header comment is placed on the first line.
///
/// # Errors
///
/// Returns `Error::FormatError` if the text is not valid Rust.
pub fn finish_module(module: &str, source: &str, config: &GeneratorConfig) -> Result<String> {
    let body = if config.format {
        format_source(module, source)?
    } else {
        check_source(module, source)?;
        let mut body = source.trim().to_string();
        body.push('\n');
        body
    };

    if config.header.is_empty() {
        Ok(body)
    } else {
        Ok(format!("// {}\n\n{body}", config.header))
    }
}
