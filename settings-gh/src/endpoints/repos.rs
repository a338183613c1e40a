//! GitHub Repositories API endpoint implementations.

use anyhow::{Context, Result};
use reqwest::Method;
use settings_core::{RepoRef, RepositoryAttributes};
use tracing::{info, instrument, trace};

use crate::client::GitHubClient;
use crate::models::{EditRepositoryRequest, GitHubRepository};

impl GitHubClient {
  /// Get repository metadata, including its topics.
  ///
  /// # Errors
  ///
  /// Returns an error if the repository is not found, authentication fails,
  /// the request cannot be sent, or the response cannot be parsed.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_repository(&self, repo: &RepoRef) -> Result<GitHubRepository> {
    let url = self.repo_url(repo, &[])?;
    let repository: GitHubRepository = self.get_json(url, &format!("Repository {repo}")).await?;
    trace!("Repository: {:?}", repository);
    Ok(repository)
  }

  /// Replace the editable repository attributes.
  #[instrument(skip(self, attributes), level = "debug")]
  pub async fn edit_repository(&self, repo: &RepoRef, attributes: &RepositoryAttributes) -> Result<()> {
    info!("Editing repository {}", repo);

    let url = self.repo_url(repo, &[])?;
    let request = self
      .request(Method::PATCH, url)
      .json(&EditRepositoryRequest::from(attributes));

    self
      .send(request, &format!("Repository {repo}"))
      .await
      .context("Failed to edit repository")?;
    Ok(())
  }
}
