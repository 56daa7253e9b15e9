//! Output formatters for CLI commands.
//!
//! Every command builds a serializable report and hands it to
//! [`format_output`], so all formats carry the same information.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use testable_core::cli::OutputFormat;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use testable_cli::formatters::format_output;
/// use testable_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Report {
///     packages: usize,
/// }
///
/// let output = format_output(&Report { packages: 2 }, OutputFormat::Json)?;
/// assert!(output.contains("\"packages\": 2"));
///
/// let output = format_output(&Report { packages: 2 }, OutputFormat::Text)?;
/// assert_eq!(output, "packages = 2");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
///
/// One `path = value` line per leaf, suited to `grep` and `cut`.
pub mod text {
    use super::{Result, Serialize, Value};

    /// Format data as flattened `path = value` lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten(&value, "", &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(value: &Value, path: &str, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, child) in map {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    flatten(child, &child_path, lines);
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (index, child) in items.iter().enumerate() {
                    flatten(child, &format!("{path}[{index}]"), lines);
                }
            }
            Value::String(s) => lines.push(format!("{path} = {s}")),
            other => lines.push(format!("{path} = {other}")),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value};

    /// Format data as an indented, colorized outline.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&value, 0, &mut out);
        Ok(out.trim_end().to_string())
    }

    fn write_value(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    if is_scalar(child) {
                        out.push_str(&format!("{pad}{}: {}\n", key.bold(), scalar(child)));
                    } else {
                        out.push_str(&format!("{pad}{}:\n", key.bold()));
                        write_value(child, indent + 1, out);
                    }
                }
            }
            Value::Array(items) if items.is_empty() => {
                out.push_str(&format!("{pad}{}\n", "(none)".dimmed()));
            }
            Value::Array(items) => {
                for item in items {
                    if is_scalar(item) {
                        out.push_str(&format!("{pad}- {}\n", scalar(item)));
                    } else {
                        out.push_str(&format!("{pad}-\n"));
                        write_value(item, indent + 1, out);
                    }
                }
            }
            other => out.push_str(&format!("{pad}{}\n", scalar(other))),
        }
    }

    fn is_scalar(value: &Value) -> bool {
        !matches!(value, Value::Object(_) | Value::Array(_))
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(true) => "yes".green().to_string(),
            Value::Bool(false) => "no".yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) | Value::Object(_) => String::new(),
        }
    }
}
