//! GitHub Branches and Branch Protection API endpoint implementations.

use anyhow::{Context, Result};
use reqwest::Method;
use settings_core::{Protection, RepoRef};
use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::models::{GitHubBranch, GitHubBranchProtection, ProtectionRequest};

impl GitHubClient {
  /// List every branch of a repository with its protected flag.
  #[instrument(skip(self), level = "debug")]
  pub async fn list_branches(&self, repo: &RepoRef) -> Result<Vec<GitHubBranch>> {
    let url = self.repo_url(repo, &["branches"])?;
    let branches: Vec<GitHubBranch> = self.get_paginated(url, "branches").await?;
    debug!("Found {} branches in {}", branches.len(), repo);
    Ok(branches)
  }

  /// Get the protection rules of a protected branch.
  ///
  /// # Errors
  ///
  /// Returns a not-found error when the branch is not protected.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_branch_protection(&self, repo: &RepoRef, branch: &str) -> Result<GitHubBranchProtection> {
    let url = self.repo_url(repo, &["branches", branch, "protection"])?;
    self
      .get_json(url, &format!("Protection for branch {branch}"))
      .await
  }

  /// Replace the protection rules of `branch`.
  #[instrument(skip(self), level = "debug")]
  pub async fn update_branch_protection(&self, repo: &RepoRef, branch: &str, protection: &Protection) -> Result<()> {
    info!("Updating protection of branch {} in {}", branch, repo);

    let url = self.repo_url(repo, &["branches", branch, "protection"])?;
    let request = self
      .request(Method::PUT, url)
      .json(&ProtectionRequest::from(protection));

    self
      .send(request, &format!("Branch {branch}"))
      .await
      .with_context(|| format!("Failed to update protection of branch {branch}"))?;
    Ok(())
  }

  #[instrument(skip(self), level = "debug")]
  pub async fn remove_branch_protection(&self, repo: &RepoRef, branch: &str) -> Result<()> {
    info!("Removing protection of branch {} in {}", branch, repo);

    let url = self.repo_url(repo, &["branches", branch, "protection"])?;
    self
      .send(self.request(Method::DELETE, url), &format!("Protection for branch {branch}"))
      .await
      .with_context(|| format!("Failed to remove protection of branch {branch}"))?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use settings_core::{RequiredReviews, RequiredStatusChecks};
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn repo() -> RepoRef {
    RepoRef::new("octo-org", "octo-repo")
  }

  #[tokio::test]
  async fn test_list_branches_success() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/repos/octo-org/octo-repo/branches"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        { "name": "main", "commit": { "sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc" }, "protected": true },
        { "name": "dev", "commit": { "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e" }, "protected": false }
      ])))
      .mount(&mock_server)
      .await;

    let client = GitHubClient::new("test_token").with_base_url(mock_server.uri());
    let branches = client.list_branches(&repo()).await?;

    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0].name, "main");
    assert!(branches[0].protected);
    assert!(!branches[1].protected);
    Ok(())
  }

  #[tokio::test]
  async fn test_get_branch_protection_success() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/repos/octo-org/octo-repo/branches/main/protection"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "url": "https://api.github.com/repos/octo-org/octo-repo/branches/main/protection",
        "required_status_checks": { "strict": true, "contexts": ["continuous-integration/travis-ci"] },
        "enforce_admins": { "enabled": true },
        "required_pull_request_reviews": {
          "dismiss_stale_reviews": true,
          "require_code_owner_reviews": true,
          "required_approving_review_count": 2
        }
      })))
      .mount(&mock_server)
      .await;

    let client = GitHubClient::new("test_token").with_base_url(mock_server.uri());
    let protection = client.get_branch_protection(&repo(), "main").await?;

    assert!(protection.enforce_admins.enabled);
    let reviews = protection.required_pull_request_reviews.unwrap();
    assert_eq!(reviews.required_approving_review_count, 2);
    assert!(reviews.require_code_owner_reviews);
    let checks = protection.required_status_checks.unwrap();
    assert_eq!(checks.contexts, vec!["continuous-integration/travis-ci"]);
    Ok(())
  }

  #[tokio::test]
  async fn test_update_branch_protection_encodes_branch_and_sends_rules() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
      .and(path("/repos/octo-org/octo-repo/branches/release%2F1.0/protection"))
      .and(body_json(json!({
        "required_status_checks": { "strict": false, "contexts": ["ci"] },
        "enforce_admins": true,
        "required_pull_request_reviews": null,
        "restrictions": null
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
      .expect(1)
      .mount(&mock_server)
      .await;

    let client = GitHubClient::new("test_token").with_base_url(mock_server.uri());
    let protection = Protection {
      enabled: true,
      enforce_admins: true,
      required_pull_request_reviews: RequiredReviews::default(),
      required_status_checks: RequiredStatusChecks {
        strict: false,
        contexts: vec!["ci".to_string()],
      },
    };

    client
      .update_branch_protection(&repo(), "release/1.0", &protection)
      .await?;
    Ok(())
  }

  #[tokio::test]
  async fn test_remove_branch_protection() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
      .and(path("/repos/octo-org/octo-repo/branches/old/protection"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    let client = GitHubClient::new("test_token").with_base_url(mock_server.uri());
    client.remove_branch_protection(&repo(), "old").await?;
    Ok(())
  }
}
