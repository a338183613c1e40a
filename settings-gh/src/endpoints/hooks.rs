//! GitHub Repository Webhooks API endpoint implementations.

use anyhow::{Context, Result};
use reqwest::Method;
use settings_core::{RepoRef, Webhook};
use tracing::{debug, info, instrument};

use crate::client::GitHubClient;
use crate::models::{GitHubHook, HookRequest};

impl GitHubClient {
  /// List every webhook of a repository. Secrets come back masked.
  #[instrument(skip(self), level = "debug")]
  pub async fn list_hooks(&self, repo: &RepoRef) -> Result<Vec<GitHubHook>> {
    let url = self.repo_url(repo, &["hooks"])?;
    let hooks: Vec<GitHubHook> = self.get_paginated(url, "webhooks").await?;
    debug!("Found {} webhooks in {}", hooks.len(), repo);
    Ok(hooks)
  }

  /// Create an active web hook.
  #[instrument(skip(self), level = "debug")]
  pub async fn create_hook(&self, repo: &RepoRef, hook: &Webhook) -> Result<()> {
    info!("Creating webhook {} in {}", hook.url, repo);

    let url = self.repo_url(repo, &["hooks"])?;
    let request = self.request(Method::POST, url).json(&HookRequest::create(hook));

    self
      .send(request, &format!("Repository {repo}"))
      .await
      .with_context(|| format!("Failed to create webhook {}", hook.url))?;
    Ok(())
  }

  /// Replace the hook with id `hook.id`.
  #[instrument(skip(self), level = "debug")]
  pub async fn edit_hook(&self, repo: &RepoRef, hook: &Webhook) -> Result<()> {
    info!("Editing webhook {} ({}) in {}", hook.url, hook.id, repo);

    let id = hook.id.to_string();
    let url = self.repo_url(repo, &["hooks", id.as_str()])?;
    let request = self.request(Method::PATCH, url).json(&HookRequest::edit(hook));

    self
      .send(request, &format!("Webhook {id}"))
      .await
      .with_context(|| format!("Failed to edit webhook {}", hook.url))?;
    Ok(())
  }

  #[instrument(skip(self), level = "debug")]
  pub async fn delete_hook(&self, repo: &RepoRef, id: u64) -> Result<()> {
    info!("Deleting webhook {} from {}", id, repo);

    let id = id.to_string();
    let url = self.repo_url(repo, &["hooks", id.as_str()])?;
    self
      .send(self.request(Method::DELETE, url), &format!("Webhook {id}"))
      .await
      .with_context(|| format!("Failed to delete webhook {id}"))?;
    Ok(())
  }
}
