//! # Output
//!
//! User-facing status lines and the step output consumed by the CI runner.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::consts::{ENV_GITHUB_OUTPUT, OUTPUT_ISSUE_KEY};

/// Print a success message
pub fn print_success(message: &str) {
  eprintln!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  eprintln!("{} {}", "✗".red().bold(), message);
}

/// Emit the issue key: always on stdout, and to the CI output file when one
/// is configured
pub fn emit_issue_key(issue_key: &str) -> Result<()> {
  println!("{issue_key}");

  if let Some(path) = std::env::var_os(ENV_GITHUB_OUTPUT).filter(|path| !path.is_empty()) {
    append_output(Path::new(&path), OUTPUT_ISSUE_KEY, issue_key)?;
  }

  Ok(())
}

/// Append a `name=value` line to a CI output file
pub fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
  let mut file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("Failed to open output file {}", path.display()))?;

  writeln!(file, "{name}={value}").with_context(|| format!("Failed to write output file {}", path.display()))?;

  debug!(output = name, path = %path.display(), "Wrote step output");
  Ok(())
}
