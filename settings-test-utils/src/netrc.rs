//! Temporary home directories holding a `.netrc` file.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory standing in for `$HOME`, with a `.netrc` inside.
///
/// Token lookup takes the home directory as an argument, so no process-wide
/// environment is touched.
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a home directory whose `.netrc` holds `content`.
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");
    fs::write(&netrc_path, content).expect("Failed to write test .netrc");

    Self { temp_dir, netrc_path }
  }

  /// Create a home directory with no `.netrc` at all.
  pub fn empty() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");
    Self { temp_dir, netrc_path }
  }

  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
