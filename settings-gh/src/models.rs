//! Wire shapes of the GitHub REST API, plus conversions into engine types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use settings_core::{
  Label, Protection, RemoteBranch, RemoteHook, RemoteProtection, RemoteRepository, RemoteReviews,
  RemoteStatusChecks, RepositoryAttributes, Webhook,
};

/// Represents a GitHub repository
#[derive(Debug, Deserialize)]
pub struct GitHubRepository {
  pub description: Option<String>,
  pub homepage: Option<String>,
  #[serde(default)]
  pub default_branch: String,
  #[serde(default)]
  pub private: bool,
  #[serde(default)]
  pub has_issues: bool,
  #[serde(default)]
  pub has_projects: bool,
  #[serde(default)]
  pub has_pages: bool,
  #[serde(default)]
  pub has_wiki: bool,
  #[serde(default)]
  pub has_downloads: bool,
  #[serde(default)]
  pub is_template: bool,
  #[serde(default)]
  pub archived: bool,
  // The merge flags are only returned to users with admin rights
  #[serde(default)]
  pub allow_squash_merge: bool,
  #[serde(default)]
  pub allow_merge_commit: bool,
  #[serde(default)]
  pub allow_rebase_merge: bool,
  #[serde(default)]
  pub topics: Vec<String>,
}

impl From<GitHubRepository> for RemoteRepository {
  fn from(repo: GitHubRepository) -> Self {
    RemoteRepository {
      attributes: RepositoryAttributes {
        description: repo.description.unwrap_or_default(),
        homepage: repo.homepage.unwrap_or_default(),
        default_branch: repo.default_branch,
        private: repo.private,
        has_issues: repo.has_issues,
        has_projects: repo.has_projects,
        has_pages: repo.has_pages,
        has_wiki: repo.has_wiki,
        has_downloads: repo.has_downloads,
        is_template: repo.is_template,
        archived: repo.archived,
        allow_squash_merge: repo.allow_squash_merge,
        allow_merge_commit: repo.allow_merge_commit,
        allow_rebase_merge: repo.allow_rebase_merge,
      },
      topics: repo.topics,
    }
  }
}

/// Body of `PATCH /repos/{owner}/{repo}`
#[derive(Debug, Serialize)]
pub struct EditRepositoryRequest<'a> {
  pub description: &'a str,
  pub homepage: &'a str,
  // An empty default branch is rejected by the API, so it is left out
  #[serde(skip_serializing_if = "str::is_empty")]
  pub default_branch: &'a str,
  pub private: bool,
  pub has_issues: bool,
  pub has_projects: bool,
  pub has_wiki: bool,
  pub has_downloads: bool,
  pub is_template: bool,
  pub archived: bool,
  pub allow_squash_merge: bool,
  pub allow_merge_commit: bool,
  pub allow_rebase_merge: bool,
}

impl<'a> From<&'a RepositoryAttributes> for EditRepositoryRequest<'a> {
  fn from(attributes: &'a RepositoryAttributes) -> Self {
    EditRepositoryRequest {
      description: &attributes.description,
      homepage: &attributes.homepage,
      default_branch: &attributes.default_branch,
      private: attributes.private,
      has_issues: attributes.has_issues,
      has_projects: attributes.has_projects,
      has_wiki: attributes.has_wiki,
      has_downloads: attributes.has_downloads,
      is_template: attributes.is_template,
      archived: attributes.archived,
      allow_squash_merge: attributes.allow_squash_merge,
      allow_merge_commit: attributes.allow_merge_commit,
      allow_rebase_merge: attributes.allow_rebase_merge,
    }
  }
}

/// Represents a GitHub issue label
#[derive(Debug, Deserialize)]
pub struct GitHubLabel {
  pub name: String,
  #[serde(default)]
  pub color: String,
  pub description: Option<String>,
}

impl From<GitHubLabel> for Label {
  fn from(label: GitHubLabel) -> Self {
    Label {
      name: label.name,
      description: label.description.unwrap_or_default(),
      color: label.color,
    }
  }
}

/// Body of label create and edit requests
#[derive(Debug, Serialize)]
pub struct LabelRequest<'a> {
  pub name: &'a str,
  pub color: &'a str,
  pub description: &'a str,
}

impl<'a> From<&'a Label> for LabelRequest<'a> {
  fn from(label: &'a Label) -> Self {
    LabelRequest {
      name: &label.name,
      color: &label.color,
      description: &label.description,
    }
  }
}

/// Represents a branch in a branch listing
#[derive(Debug, Deserialize)]
pub struct GitHubBranch {
  pub name: String,
  #[serde(default)]
  pub protected: bool,
}

impl From<GitHubBranch> for RemoteBranch {
  fn from(branch: GitHubBranch) -> Self {
    RemoteBranch {
      name: branch.name,
      protected: branch.protected,
    }
  }
}

/// A protection setting GitHub reports as `{ "enabled": bool }`
#[derive(Debug, Default, Deserialize)]
pub struct GitHubToggle {
  #[serde(default)]
  pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct GitHubReviews {
  #[serde(default)]
  pub required_approving_review_count: u32,
  #[serde(default)]
  pub dismiss_stale_reviews: bool,
  #[serde(default)]
  pub require_code_owner_reviews: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GitHubStatusChecks {
  #[serde(default)]
  pub strict: bool,
  #[serde(default)]
  pub contexts: Vec<String>,
}

/// Represents the protection detail of a branch
#[derive(Debug, Deserialize)]
pub struct GitHubBranchProtection {
  #[serde(default)]
  pub enforce_admins: GitHubToggle,
  pub required_pull_request_reviews: Option<GitHubReviews>,
  pub required_status_checks: Option<GitHubStatusChecks>,
}

impl From<GitHubBranchProtection> for RemoteProtection {
  fn from(protection: GitHubBranchProtection) -> Self {
    RemoteProtection {
      enforce_admins: protection.enforce_admins.enabled,
      required_reviews: protection.required_pull_request_reviews.map(|reviews| RemoteReviews {
        required_approving_review_count: reviews.required_approving_review_count,
        dismiss_stale_reviews: reviews.dismiss_stale_reviews,
        require_code_owner_reviews: reviews.require_code_owner_reviews,
      }),
      required_status_checks: protection.required_status_checks.map(|checks| RemoteStatusChecks {
        strict: checks.strict,
        contexts: checks.contexts,
      }),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ReviewsRequest {
  pub required_approving_review_count: u32,
  pub dismiss_stale_reviews: bool,
  pub require_code_owner_reviews: bool,
}

/// Body of `PUT /repos/{owner}/{repo}/branches/{branch}/protection`
///
/// Every key is required by the API; `null` turns a rule off.
#[derive(Debug, Serialize)]
pub struct ProtectionRequest {
  pub required_status_checks: Option<GitHubStatusChecks>,
  pub enforce_admins: bool,
  pub required_pull_request_reviews: Option<ReviewsRequest>,
  pub restrictions: Option<Value>,
}

impl From<&Protection> for ProtectionRequest {
  fn from(protection: &Protection) -> Self {
    let checks = &protection.required_status_checks;
    let reviews = &protection.required_pull_request_reviews;

    ProtectionRequest {
      required_status_checks: (checks.strict || !checks.contexts.is_empty()).then(|| GitHubStatusChecks {
        strict: checks.strict,
        contexts: checks.contexts.clone(),
      }),
      enforce_admins: protection.enforce_admins,
      required_pull_request_reviews: (reviews.required_approving_review_count > 0).then(|| ReviewsRequest {
        required_approving_review_count: reviews.required_approving_review_count,
        dismiss_stale_reviews: reviews.dismiss_stale_reviews,
        require_code_owner_reviews: reviews.require_code_owner_reviews,
      }),
      restrictions: None,
    }
  }
}

/// Represents a repository webhook
#[derive(Debug, Deserialize)]
pub struct GitHubHook {
  pub id: u64,
  #[serde(default)]
  pub events: Vec<String>,
  #[serde(default)]
  pub config: Map<String, Value>,
}

impl From<GitHubHook> for RemoteHook {
  fn from(hook: GitHubHook) -> Self {
    RemoteHook {
      id: hook.id,
      config: hook.config,
      events: hook.events,
    }
  }
}

#[derive(Serialize)]
pub struct HookConfigRequest<'a> {
  pub url: &'a str,
  pub content_type: &'a str,
  pub secret: &'a str,
}

/// Body of hook create and edit requests
#[derive(Serialize)]
pub struct HookRequest<'a> {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<&'static str>,
  pub active: bool,
  pub events: &'a [String],
  pub config: HookConfigRequest<'a>,
}

impl<'a> HookRequest<'a> {
  pub fn create(hook: &'a Webhook) -> Self {
    Self {
      name: Some("web"),
      ..Self::edit(hook)
    }
  }

  pub fn edit(hook: &'a Webhook) -> Self {
    Self {
      name: None,
      active: true,
      events: &hook.events,
      config: HookConfigRequest {
        url: &hook.url,
        content_type: &hook.content_type,
        secret: &hook.secret,
      },
    }
  }
}

/// Body of `PUT /repos/{owner}/{repo}/topics`
#[derive(Debug, Serialize)]
pub struct TopicsRequest<'a> {
  pub names: &'a [String],
}
