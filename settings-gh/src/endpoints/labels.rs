//! GitHub Labels API endpoint implementations.

use anyhow::{Context, Result};
use reqwest::Method;
use settings_core::{Label, RepoRef};
use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::models::{GitHubLabel, LabelRequest};

impl GitHubClient {
  /// List every label of a repository.
  #[instrument(skip(self), level = "debug")]
  pub async fn list_labels(&self, repo: &RepoRef) -> Result<Vec<GitHubLabel>> {
    let url = self.repo_url(repo, &["labels"])?;
    let labels: Vec<GitHubLabel> = self.get_paginated(url, "labels").await?;
    debug!("Found {} labels in {}", labels.len(), repo);
    Ok(labels)
  }

  #[instrument(skip(self), level = "debug")]
  pub async fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<()> {
    info!("Creating label {} in {}", label.name, repo);

    let url = self.repo_url(repo, &["labels"])?;
    let request = self.request(Method::POST, url).json(&LabelRequest::from(label));

    self
      .send(request, &format!("Repository {repo}"))
      .await
      .with_context(|| format!("Failed to create label {}", label.name))?;
    Ok(())
  }

  /// Replace color and description of the label named `label.name`.
  #[instrument(skip(self), level = "debug")]
  pub async fn edit_label(&self, repo: &RepoRef, label: &Label) -> Result<()> {
    info!("Editing label {} in {}", label.name, repo);

    let url = self.repo_url(repo, &["labels", label.name.as_str()])?;
    let request = self.request(Method::PATCH, url).json(&LabelRequest::from(label));

    self
      .send(request, &format!("Label {}", label.name))
      .await
      .with_context(|| format!("Failed to edit label {}", label.name))?;
    Ok(())
  }

  #[instrument(skip(self), level = "debug")]
  pub async fn delete_label(&self, repo: &RepoRef, name: &str) -> Result<()> {
    info!("Deleting label {} from {}", name, repo);

    let url = self.repo_url(repo, &["labels", name])?;
    self
      .send(self.request(Method::DELETE, url), &format!("Label {name}"))
      .await
      .with_context(|| format!("Failed to delete label {name}"))?;
    Ok(())
  }
}
