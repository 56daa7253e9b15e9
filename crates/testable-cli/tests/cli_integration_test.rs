//! Integration tests for the `testable` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ACCOUNT_SOURCE: &str = r"
use std::collections::HashMap;

/// A bank account.
pub struct Account {
    pub owner: String,
    balances: HashMap<String, i64>,
}

impl Account {
    pub fn new(owner: String) -> Self {
        Self { owner, balances: HashMap::new() }
    }

    pub fn deposit(&mut self, currency: &str, amount: i64) {
        *self.balances.entry(currency.to_string()).or_default() += amount;
    }

    pub fn balance(&self, currency: &str) -> i64 {
        self.balances.get(currency).copied().unwrap_or_default()
    }
}
";

fn testable(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_testable"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("src/bank")).unwrap();
    std::fs::write(dir.path().join("src/bank/account.rs"), ACCOUNT_SOURCE).unwrap();
    dir
}

// ============================================================================
// Argument errors
// ============================================================================

#[test]
fn test_generate_without_input_exits_with_invalid_input() {
    let dir = TempDir::new().unwrap();
    let output = testable(dir.path(), &["generate", "--output", "out"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("require a package directory"), "stderr: {stderr}");
}

#[test]
fn test_unknown_format_exits_with_invalid_input() {
    let dir = workspace();
    let output = testable(dir.path(), &["inspect", "-i", "src/bank", "--format", "yaml"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid output format"));
}

#[test]
fn test_missing_input_directory_exits_with_invalid_input() {
    let dir = TempDir::new().unwrap();
    let output = testable(dir.path(), &["generate", "-i", "nowhere", "-o", "out"]);

    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn test_generate_writes_modules() {
    let dir = workspace();
    let output = testable(
        dir.path(),
        &[
            "--format",
            "json",
            "generate",
            "-i",
            "src/bank",
            "-o",
            "src/bank/testable",
            "--crate-path",
            "crate::bank",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], false);
    assert_eq!(report["packages"][0]["name"], "account");
    assert_eq!(report["packages"][0]["methods"], 2);
    assert_eq!(report["files"].as_array().unwrap().len(), 3);

    let out = dir.path().join("src/bank/testable");
    let iface = std::fs::read_to_string(out.join("account_iface/mod.rs")).unwrap();
    assert!(iface.contains("pub trait Account"));
    assert!(iface.contains("crate::bank::account"));

    let wrapper = std::fs::read_to_string(out.join("account/mod.rs")).unwrap();
    syn::parse_file(&wrapper).unwrap();
    assert!(wrapper.contains("impl iface::Account for Account"));

    let index = std::fs::read_to_string(out.join("mod.rs")).unwrap();
    assert!(index.contains("pub mod account;"));
    assert!(index.contains("pub mod account_iface;"));
}

#[test]
fn test_generate_dry_run() {
    let dir = workspace();
    let output = testable(
        dir.path(),
        &["--format", "text", "generate", "-i", "src/bank", "-o", "out", "--dry-run"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dry_run = true"));
    assert!(stdout.contains("account_iface/mod.rs"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_generate_from_config_file() {
    let dir = workspace();
    let config = testable_core::GeneratorConfig::builder()
        .input("src/bank")
        .output("generated")
        .layout(testable_core::Layout::Flat)
        .emit_index(false)
        .header("generated by testable")
        .build();
    std::fs::write(
        dir.path().join("testable.toml"),
        toml::to_string(&config).unwrap(),
    )
    .unwrap();

    let output = testable(dir.path(), &["generate"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let generated = dir.path().join("generated");
    let wrapper = std::fs::read_to_string(generated.join("account.rs")).unwrap();
    assert!(wrapper.starts_with("// generated by testable"));
    assert!(generated.join("account_iface.rs").exists());
    assert!(!generated.join("mod.rs").exists());
}

// ============================================================================
// inspect and completions
// ============================================================================

#[test]
fn test_inspect_prints_shapes() {
    let dir = workspace();
    let output = testable(dir.path(), &["--format", "json", "inspect", "-i", "src/bank"]);

    assert!(output.status.success());
    let packages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let account = &packages[0]["structs"][0];
    assert_eq!(account["name"], "Account");
    assert_eq!(account["fields"].as_array().unwrap().len(), 1);
    assert!(!dir.path().join("src/bank/testable").exists());
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let output = testable(dir.path(), &["completions", "bash"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("testable"));
}
