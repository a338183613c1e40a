//! GitHub Repository Topics API endpoint implementations.

use anyhow::{Context, Result};
use reqwest::Method;
use settings_core::RepoRef;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::models::TopicsRequest;

impl GitHubClient {
  /// Replace all topics of a repository.
  #[instrument(skip(self), level = "debug")]
  pub async fn replace_topics(&self, repo: &RepoRef, topics: &[String]) -> Result<()> {
    info!("Replacing topics of {} with [{}]", repo, topics.join(", "));

    let url = self.repo_url(repo, &["topics"])?;
    let request = self
      .request(Method::PUT, url)
      .json(&TopicsRequest { names: topics });

    self
      .send(request, &format!("Repository {repo}"))
      .await
      .context("Failed to replace topics")?;
    Ok(())
  }
}
