//! # Remote API
//!
//! The capability the engine consumes to read and write remote repository
//! state. Every call blocks until the remote answers. Implementations report
//! transport, authentication, and not-found failures as errors; the engine
//! propagates them with context and never retries.

use anyhow::Result;
use serde_json::{Map, Value};

use crate::settings::{Label, Protection, RepoRef, RepositoryAttributes, Webhook};

/// Repository metadata as reported by the remote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteRepository {
  pub attributes: RepositoryAttributes,
  pub topics: Vec<String>,
}

/// A branch as listed by the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBranch {
  pub name: String,
  pub protected: bool,
}

/// Branch protection detail as reported by the remote.
///
/// Absent blocks mean the rule is not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteProtection {
  pub enforce_admins: bool,
  pub required_reviews: Option<RemoteReviews>,
  pub required_status_checks: Option<RemoteStatusChecks>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteReviews {
  pub required_approving_review_count: u32,
  pub dismiss_stale_reviews: bool,
  pub require_code_owner_reviews: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteStatusChecks {
  pub strict: bool,
  pub contexts: Vec<String>,
}

/// A webhook as listed by the remote, with its untyped config map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteHook {
  pub id: u64,
  pub config: Map<String, Value>,
  pub events: Vec<String>,
}

/// Blocking remote API used by the reconcilers.
pub trait RemoteApi {
  fn get_repository(&self, repo: &RepoRef) -> Result<RemoteRepository>;

  /// Replace all repository attributes with `attributes`.
  fn edit_repository(&self, repo: &RepoRef, attributes: &RepositoryAttributes) -> Result<()>;

  fn list_labels(&self, repo: &RepoRef) -> Result<Vec<Label>>;

  fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<()>;

  /// Replace the label named `label.name`.
  fn edit_label(&self, repo: &RepoRef, label: &Label) -> Result<()>;

  fn delete_label(&self, repo: &RepoRef, name: &str) -> Result<()>;

  fn list_branches(&self, repo: &RepoRef) -> Result<Vec<RemoteBranch>>;

  fn get_branch_protection(&self, repo: &RepoRef, branch: &str) -> Result<RemoteProtection>;

  /// Replace the protection rules of `branch`.
  fn update_branch_protection(&self, repo: &RepoRef, branch: &str, protection: &Protection) -> Result<()>;

  fn remove_branch_protection(&self, repo: &RepoRef, branch: &str) -> Result<()>;

  fn list_hooks(&self, repo: &RepoRef) -> Result<Vec<RemoteHook>>;

  fn create_hook(&self, repo: &RepoRef, hook: &Webhook) -> Result<()>;

  /// Replace the hook with remote id `hook.id`.
  fn edit_hook(&self, repo: &RepoRef, hook: &Webhook) -> Result<()>;

  fn delete_hook(&self, repo: &RepoRef, id: u64) -> Result<()>;

  fn replace_topics(&self, repo: &RepoRef, topics: &[String]) -> Result<()>;
}
