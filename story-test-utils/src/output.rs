//! CI output file management for testing

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::env::EnvVarGuard;

/// Points the CI output variable at an empty file inside a temporary
/// directory.
///
/// Hold [`crate::env_lock`] while this guard is alive.
pub struct GithubOutputGuard {
  /// The temporary directory holding the output file
  pub temp_dir: TempDir,
  path: PathBuf,
  _env: EnvVarGuard,
}

impl GithubOutputGuard {
  /// Create the file and point the `var_name` environment variable at it
  pub fn new(var_name: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("github_output");
    fs::write(&path, "").expect("Failed to create output file");
    let env = EnvVarGuard::set_to(var_name, &path.to_string_lossy());

    Self {
      temp_dir,
      path,
      _env: env,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Everything written to the output file so far
  pub fn contents(&self) -> String {
    fs::read_to_string(&self.path).expect("Failed to read output file")
  }
}
