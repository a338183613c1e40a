//! Git repositories for testing branch materialization.
//!
//! libgit2 only pushes to bare repositories over the local transport, so the
//! fixture keeps a bare "remote" next to the working repository it was
//! seeded from.

use std::fs;
use std::path::Path;

use anyhow::Result;
use git2::build::RepoBuilder;
use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

/// A bare repository with one commit on `main`, acting as a remote.
pub struct BareRemoteGuard {
  /// Holds the bare repository
  pub temp_dir: TempDir,
  /// The bare repository
  pub repo: Repository,
  /// Commit `main` points at
  pub head: Oid,
  _seed_dir: TempDir,
}

impl BareRemoteGuard {
  pub fn new() -> Self {
    let seed_dir = TempDir::new().expect("Failed to create temporary directory");
    let seed = Repository::init(seed_dir.path()).expect("Failed to initialize git repository");
    seed
      .set_head("refs/heads/main")
      .expect("Failed to point HEAD at main");
    let head = create_commit(&seed, "README.md", "# fixture\n", "Initial commit").expect("Failed to commit");

    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo = RepoBuilder::new()
      .bare(true)
      .clone(path_str(seed_dir.path()), temp_dir.path())
      .expect("Failed to create bare remote");

    Self {
      temp_dir,
      repo,
      head,
      _seed_dir: seed_dir,
    }
  }

  /// Location to clone from.
  pub fn url(&self) -> String {
    path_str(self.temp_dir.path()).to_string()
  }

  /// Commit a reference points at, if it exists.
  pub fn reference_target(&self, name: &str) -> Option<Oid> {
    self.repo.find_reference(name).ok().and_then(|r| r.target())
  }
}

impl Default for BareRemoteGuard {
  fn default() -> Self {
    Self::new()
  }
}

fn path_str(path: &Path) -> &str {
  path.to_str().expect("Temporary path is not valid UTF-8")
}

/// Write `file_name`, stage it, and commit on HEAD.
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<Oid> {
  let workdir = repo.workdir().ok_or_else(|| anyhow::anyhow!("repository has no workdir"))?;
  fs::write(workdir.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree = repo.find_tree(index.write_tree()?)?;
  let signature = Signature::now("Settings Test User", "settings-test@example.com")?;

  let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
  let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

  Ok(repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?)
}
