//! Blocking [`RemoteApi`] over the async [`GitHubClient`].
//!
//! The reconciliation engine is synchronous; this adapter owns a tokio
//! runtime and drives one client call to completion per operation.

use anyhow::{Context, Result};
use settings_core::{
  Label, Protection, RemoteApi, RemoteBranch, RemoteHook, RemoteProtection, RemoteRepository, RepoRef,
  RepositoryAttributes, Webhook,
};
use tokio::runtime::Runtime;

use crate::client::GitHubClient;

pub struct GitHubRemote {
  rt: Runtime,
  client: GitHubClient,
}

impl GitHubRemote {
  pub fn new(client: GitHubClient) -> Result<Self> {
    let rt = Runtime::new().context("Failed to create async runtime")?;
    Ok(Self { rt, client })
  }
}

impl RemoteApi for GitHubRemote {
  fn get_repository(&self, repo: &RepoRef) -> Result<RemoteRepository> {
    Ok(self.rt.block_on(self.client.get_repository(repo))?.into())
  }

  fn edit_repository(&self, repo: &RepoRef, attributes: &RepositoryAttributes) -> Result<()> {
    self.rt.block_on(self.client.edit_repository(repo, attributes))
  }

  fn list_labels(&self, repo: &RepoRef) -> Result<Vec<Label>> {
    let labels = self.rt.block_on(self.client.list_labels(repo))?;
    Ok(labels.into_iter().map(Label::from).collect())
  }

  fn create_label(&self, repo: &RepoRef, label: &Label) -> Result<()> {
    self.rt.block_on(self.client.create_label(repo, label))
  }

  fn edit_label(&self, repo: &RepoRef, label: &Label) -> Result<()> {
    self.rt.block_on(self.client.edit_label(repo, label))
  }

  fn delete_label(&self, repo: &RepoRef, name: &str) -> Result<()> {
    self.rt.block_on(self.client.delete_label(repo, name))
  }

  fn list_branches(&self, repo: &RepoRef) -> Result<Vec<RemoteBranch>> {
    let branches = self.rt.block_on(self.client.list_branches(repo))?;
    Ok(branches.into_iter().map(RemoteBranch::from).collect())
  }

  fn get_branch_protection(&self, repo: &RepoRef, branch: &str) -> Result<RemoteProtection> {
    Ok(self.rt.block_on(self.client.get_branch_protection(repo, branch))?.into())
  }

  fn update_branch_protection(&self, repo: &RepoRef, branch: &str, protection: &Protection) -> Result<()> {
    self
      .rt
      .block_on(self.client.update_branch_protection(repo, branch, protection))
  }

  fn remove_branch_protection(&self, repo: &RepoRef, branch: &str) -> Result<()> {
    self.rt.block_on(self.client.remove_branch_protection(repo, branch))
  }

  fn list_hooks(&self, repo: &RepoRef) -> Result<Vec<RemoteHook>> {
    let hooks = self.rt.block_on(self.client.list_hooks(repo))?;
    Ok(hooks.into_iter().map(RemoteHook::from).collect())
  }

  fn create_hook(&self, repo: &RepoRef, hook: &Webhook) -> Result<()> {
    self.rt.block_on(self.client.create_hook(repo, hook))
  }

  fn edit_hook(&self, repo: &RepoRef, hook: &Webhook) -> Result<()> {
    self.rt.block_on(self.client.edit_hook(repo, hook))
  }

  fn delete_hook(&self, repo: &RepoRef, id: u64) -> Result<()> {
    self.rt.block_on(self.client.delete_hook(repo, id))
  }

  fn replace_topics(&self, repo: &RepoRef, topics: &[String]) -> Result<()> {
    self.rt.block_on(self.client.replace_topics(repo, topics))
  }
}
