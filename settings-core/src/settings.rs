//! # Settings Model
//!
//! The desired-or-actual configuration snapshot for one repository. Both sides
//! of a reconciliation share these types: the desired side is parsed from the
//! settings file, the actual side is read back from the remote.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Full settings snapshot for a single repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
  pub repository: Repository,
  #[serde(default)]
  pub labels: Vec<Label>,
  #[serde(default)]
  pub branches: Vec<Branch>,
  #[serde(default)]
  pub webhooks: Vec<Webhook>,
  #[serde(default)]
  pub topics: Vec<String>,
}

impl Settings {
  /// Apply the load-time normalization rules.
  ///
  /// Every declared branch is intended to carry a protection record, so
  /// `enabled` is forced on. Review sub-flags are meaningless without a
  /// review count and are cleared when the count is zero.
  pub fn normalize(&mut self) {
    for branch in &mut self.branches {
      branch.protection.enabled = true;

      let reviews = &mut branch.protection.required_pull_request_reviews;
      if reviews.required_approving_review_count == 0 {
        reviews.dismiss_stale_reviews = false;
        reviews.require_code_owner_reviews = false;
      }
    }
  }

  /// The (owner, name) pair these settings are scoped to.
  pub fn repo_ref(&self) -> RepoRef {
    self.repository.repo_ref()
  }
}

/// Identifies a repository on the remote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
  pub owner: String,
  pub name: String,
}

impl RepoRef {
  pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      name: name.into(),
    }
  }
}

impl fmt::Display for RepoRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

/// The `repository` section: scope plus scalar attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
  pub owner: String,
  pub name: String,
  #[serde(flatten)]
  pub attributes: RepositoryAttributes,
}

impl Repository {
  pub fn repo_ref(&self) -> RepoRef {
    RepoRef::new(&self.owner, &self.name)
  }
}

/// Scalar repository metadata, compared as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryAttributes {
  pub description: String,
  pub homepage: String,
  pub default_branch: String,
  pub private: bool,
  pub has_issues: bool,
  pub has_projects: bool,
  pub has_pages: bool,
  pub has_wiki: bool,
  pub has_downloads: bool,
  pub is_template: bool,
  pub archived: bool,
  pub allow_squash_merge: bool,
  pub allow_merge_commit: bool,
  pub allow_rebase_merge: bool,
}

/// An issue label, identified by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Label {
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub color: String,
}

/// A branch, identified by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Branch {
  pub name: String,
  #[serde(default)]
  pub protection: Protection,
}

impl Branch {
  /// A branch with no protection record.
  pub fn unprotected(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      protection: Protection::default(),
    }
  }
}

/// Branch protection rules. `enabled == false` means "no protection".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Protection {
  pub enabled: bool,
  pub enforce_admins: bool,
  pub required_pull_request_reviews: RequiredReviews,
  pub required_status_checks: RequiredStatusChecks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequiredReviews {
  pub required_approving_review_count: u32,
  pub dismiss_stale_reviews: bool,
  pub require_code_owner_reviews: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequiredStatusChecks {
  pub strict: bool,
  pub contexts: Vec<String>,
}

/// A repository webhook, identified by URL.
///
/// `id` is assigned by the remote; desired definitions leave it at zero.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Webhook {
  #[serde(default, skip_serializing)]
  pub id: u64,
  pub url: String,
  #[serde(default)]
  pub content_type: String,
  #[serde(default)]
  pub secret: String,
  #[serde(default)]
  pub events: Vec<String>,
}

// Secrets never reach log output.
impl fmt::Debug for Webhook {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Webhook")
      .field("id", &self.id)
      .field("url", &self.url)
      .field("content_type", &self.content_type)
      .field("secret", &if self.secret.is_empty() { "" } else { "<redacted>" })
      .field("events", &self.events)
      .finish()
  }
}
