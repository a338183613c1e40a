//! In-memory stand-in for a GitHub repository.
//!
//! [`FakeRemote`] implements both [`RemoteApi`] and [`VersionControl`] over one
//! shared state, so a branch pushed through the version-control side shows
//! up in the next branch listing. Every write and every git step is recorded
//! as a [`Call`], and any operation can be made to fail by name.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use anyhow::{Result, anyhow, bail};
use serde_json::{Map, Value, json};
use settings_core::{
  Label, Protection, RemoteApi, RemoteBranch, RemoteHook, RemoteProtection, RemoteRepository, RemoteReviews,
  RemoteStatusChecks, RepoRef, RepositoryAttributes, VersionControl, Webhook, WorkingCopy,
};

/// Value the remote reports in place of a stored hook secret.
pub const MASKED_SECRET: &str = "********";

/// Commit every fake clone reports as HEAD.
pub const FAKE_HEAD: &str = "3f786850e387550fdab836ed7e6dc881de23001b";

/// A recorded write or git step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  EditRepository,
  CreateLabel(String),
  EditLabel(String),
  DeleteLabel(String),
  UpdateBranchProtection(String),
  RemoveBranchProtection(String),
  CreateHook(String),
  EditHook(u64),
  DeleteHook(u64),
  ReplaceTopics(Vec<String>),
  Clone(String),
  SetReference(String, String),
  Push(String),
}

impl Call {
  /// Whether this call changes remote state through the API.
  pub fn is_api_write(&self) -> bool {
    !matches!(self, Call::Clone(_) | Call::SetReference(..) | Call::Push(_))
  }
}

#[derive(Debug, Default)]
struct FakeState {
  attributes: RepositoryAttributes,
  topics: Vec<String>,
  labels: Vec<Label>,
  branches: Vec<(String, Option<Protection>)>,
  hooks: Vec<RemoteHook>,
  next_hook_id: u64,
  calls: Vec<Call>,
  failures: HashSet<String>,
}

/// Shared in-memory repository state. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct FakeRemote {
  state: Rc<RefCell<FakeState>>,
}

impl FakeRemote {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_attributes(self, attributes: RepositoryAttributes) -> Self {
    self.state.borrow_mut().attributes = attributes;
    self
  }

  pub fn with_topics(self, topics: &[&str]) -> Self {
    self.state.borrow_mut().topics = topics.iter().map(|t| t.to_string()).collect();
    self
  }

  pub fn with_label(self, name: &str, description: &str, color: &str) -> Self {
    self.state.borrow_mut().labels.push(Label {
      name: name.to_string(),
      description: description.to_string(),
      color: color.to_string(),
    });
    self
  }

  /// Add a branch; `None` leaves it unprotected.
  pub fn with_branch(self, name: &str, protection: Option<Protection>) -> Self {
    self.state.borrow_mut().branches.push((name.to_string(), protection));
    self
  }

  /// Add a hook whose config holds `url`, `content_type` and `secret`.
  pub fn with_hook(self, url: &str, content_type: &str, secret: &str, events: &[&str]) -> Self {
    let config = json!({ "url": url, "content_type": content_type, "secret": secret });
    self.with_raw_hook(config, events)
  }

  /// Add a hook with an arbitrary config object.
  pub fn with_raw_hook(self, config: Value, events: &[&str]) -> Self {
    {
      let mut state = self.state.borrow_mut();
      let id = state.allocate_hook_id();
      state.hooks.push(RemoteHook {
        id,
        config: config.as_object().cloned().unwrap_or_default(),
        events: events.iter().map(|e| e.to_string()).collect(),
      });
    }
    self
  }

  /// Make every call of operation `op` (e.g. `"delete_label"`, `"push"`) fail.
  pub fn fail_on(self, op: &str) -> Self {
    self.state.borrow_mut().failures.insert(op.to_string());
    self
  }

  /// Every recorded call, oldest first.
  pub fn calls(&self) -> Vec<Call> {
    self.state.borrow().calls.clone()
  }

  /// Recorded calls that changed remote state through the API.
  pub fn api_writes(&self) -> Vec<Call> {
    self.calls().into_iter().filter(Call::is_api_write).collect()
  }

  pub fn clear_calls(&self) {
    self.state.borrow_mut().calls.clear();
  }

  pub fn attributes(&self) -> RepositoryAttributes {
    self.state.borrow().attributes.clone()
  }

  pub fn topics(&self) -> Vec<String> {
    self.state.borrow().topics.clone()
  }

  pub fn label_names(&self) -> Vec<String> {
    self.state.borrow().labels.iter().map(|l| l.name.clone()).collect()
  }

  pub fn branch_names(&self) -> Vec<String> {
    self.state.borrow().branches.iter().map(|(name, _)| name.clone()).collect()
  }

  /// Stored protection of `branch`; `None` if missing or unprotected.
  pub fn protection(&self, branch: &str) -> Option<Protection> {
    self
      .state
      .borrow()
      .branches
      .iter()
      .find(|(name, _)| name == branch)
      .and_then(|(_, protection)| protection.clone())
  }

  /// Unmasked config of the hook with `url`.
  pub fn hook_config(&self, url: &str) -> Option<Map<String, Value>> {
    self
      .state
      .borrow()
      .hooks
      .iter()
      .find(|h| h.config.get("url").and_then(Value::as_str) == Some(url))
      .map(|h| h.config.clone())
  }

  pub fn hook_urls(&self) -> Vec<String> {
    self
      .state
      .borrow()
      .hooks
      .iter()
      .filter_map(|h| h.config.get("url").and_then(Value::as_str).map(str::to_string))
      .collect()
  }

  fn check(&self, op: &str) -> Result<()> {
    if self.state.borrow().failures.contains(op) {
      bail!("injected failure in {op}");
    }
    Ok(())
  }

  fn record(&self, call: Call) {
    self.state.borrow_mut().calls.push(call);
  }
}

impl FakeState {
  fn allocate_hook_id(&mut self) -> u64 {
    self.next_hook_id += 1;
    self.next_hook_id
  }

  fn branch_mut(&mut self, name: &str) -> Result<&mut Option<Protection>> {
    self
      .branches
      .iter_mut()
      .find(|(branch, _)| branch == name)
      .map(|(_, protection)| protection)
      .ok_or_else(|| anyhow!("Branch not found: {name}"))
  }
}

fn hook_config(hook: &Webhook) -> Map<String, Value> {
  let mut config = Map::new();
  config.insert("url".to_string(), Value::String(hook.url.clone()));
  config.insert("content_type".to_string(), Value::String(hook.content_type.clone()));
  config.insert("secret".to_string(), Value::String(hook.secret.clone()));
  config.insert("insecure_ssl".to_string(), Value::String("0".to_string()));
  config
}

impl RemoteApi for FakeRemote {
  fn get_repository(&self, _repo: &RepoRef) -> Result<RemoteRepository> {
    self.check("get_repository")?;
    let state = self.state.borrow();
    Ok(RemoteRepository {
      attributes: state.attributes.clone(),
      topics: state.topics.clone(),
    })
  }

  fn edit_repository(&self, _repo: &RepoRef, attributes: &RepositoryAttributes) -> Result<()> {
    self.check("edit_repository")?;
    self.record(Call::EditRepository);
    let mut state = self.state.borrow_mut();
    let mut attributes = attributes.clone();
    // Like GitHub: an empty default branch is not sent and has_pages is read-only
    if attributes.default_branch.is_empty() {
      attributes.default_branch = state.attributes.default_branch.clone();
    }
    attributes.has_pages = state.attributes.has_pages;
    state.attributes = attributes;
    Ok(())
  }

  fn list_labels(&self, _repo: &RepoRef) -> Result<Vec<Label>> {
    self.check("list_labels")?;
    Ok(self.state.borrow().labels.clone())
  }

  fn create_label(&self, _repo: &RepoRef, label: &Label) -> Result<()> {
    self.check("create_label")?;
    self.record(Call::CreateLabel(label.name.clone()));
    let mut state = self.state.borrow_mut();
    if state.labels.iter().any(|l| l.name == label.name) {
      bail!("Validation failed: label {} already exists", label.name);
    }
    state.labels.push(label.clone());
    Ok(())
  }

  fn edit_label(&self, _repo: &RepoRef, label: &Label) -> Result<()> {
    self.check("edit_label")?;
    self.record(Call::EditLabel(label.name.clone()));
    let mut state = self.state.borrow_mut();
    let existing = state
      .labels
      .iter_mut()
      .find(|l| l.name == label.name)
      .ok_or_else(|| anyhow!("Label not found: {}", label.name))?;
    *existing = label.clone();
    Ok(())
  }

  fn delete_label(&self, _repo: &RepoRef, name: &str) -> Result<()> {
    self.check("delete_label")?;
    self.record(Call::DeleteLabel(name.to_string()));
    let mut state = self.state.borrow_mut();
    let before = state.labels.len();
    state.labels.retain(|l| l.name != name);
    if state.labels.len() == before {
      bail!("Label not found: {name}");
    }
    Ok(())
  }

  fn list_branches(&self, _repo: &RepoRef) -> Result<Vec<RemoteBranch>> {
    self.check("list_branches")?;
    Ok(
      self
        .state
        .borrow()
        .branches
        .iter()
        .map(|(name, protection)| RemoteBranch {
          name: name.clone(),
          protected: protection.is_some(),
        })
        .collect(),
    )
  }

  fn get_branch_protection(&self, _repo: &RepoRef, branch: &str) -> Result<RemoteProtection> {
    self.check("get_branch_protection")?;
    let mut state = self.state.borrow_mut();
    let protection = state
      .branch_mut(branch)?
      .clone()
      .ok_or_else(|| anyhow!("Branch not protected: {branch}"))?;

    let reviews = &protection.required_pull_request_reviews;
    Ok(RemoteProtection {
      enforce_admins: protection.enforce_admins,
      required_reviews: (reviews.required_approving_review_count > 0).then(|| RemoteReviews {
        required_approving_review_count: reviews.required_approving_review_count,
        dismiss_stale_reviews: reviews.dismiss_stale_reviews,
        require_code_owner_reviews: reviews.require_code_owner_reviews,
      }),
      required_status_checks: Some(RemoteStatusChecks {
        strict: protection.required_status_checks.strict,
        contexts: protection.required_status_checks.contexts.clone(),
      }),
    })
  }

  fn update_branch_protection(&self, _repo: &RepoRef, branch: &str, protection: &Protection) -> Result<()> {
    self.check("update_branch_protection")?;
    self.record(Call::UpdateBranchProtection(branch.to_string()));
    *self.state.borrow_mut().branch_mut(branch)? = Some(protection.clone());
    Ok(())
  }

  fn remove_branch_protection(&self, _repo: &RepoRef, branch: &str) -> Result<()> {
    self.check("remove_branch_protection")?;
    self.record(Call::RemoveBranchProtection(branch.to_string()));
    let mut state = self.state.borrow_mut();
    let slot = state.branch_mut(branch)?;
    if slot.take().is_none() {
      bail!("Branch not protected: {branch}");
    }
    Ok(())
  }

  fn list_hooks(&self, _repo: &RepoRef) -> Result<Vec<RemoteHook>> {
    self.check("list_hooks")?;
    Ok(
      self
        .state
        .borrow()
        .hooks
        .iter()
        .cloned()
        .map(|mut hook| {
          if let Some(Value::String(secret)) = hook.config.get_mut("secret")
            && !secret.is_empty()
          {
            *secret = MASKED_SECRET.to_string();
          }
          hook
        })
        .collect(),
    )
  }

  fn create_hook(&self, _repo: &RepoRef, hook: &Webhook) -> Result<()> {
    self.check("create_hook")?;
    self.record(Call::CreateHook(hook.url.clone()));
    let mut state = self.state.borrow_mut();
    let id = state.allocate_hook_id();
    state.hooks.push(RemoteHook {
      id,
      config: hook_config(hook),
      events: hook.events.clone(),
    });
    Ok(())
  }

  fn edit_hook(&self, _repo: &RepoRef, hook: &Webhook) -> Result<()> {
    self.check("edit_hook")?;
    self.record(Call::EditHook(hook.id));
    let mut state = self.state.borrow_mut();
    let existing = state
      .hooks
      .iter_mut()
      .find(|h| h.id == hook.id)
      .ok_or_else(|| anyhow!("Hook not found: {}", hook.id))?;
    existing.config = hook_config(hook);
    existing.events = hook.events.clone();
    Ok(())
  }

  fn delete_hook(&self, _repo: &RepoRef, id: u64) -> Result<()> {
    self.check("delete_hook")?;
    self.record(Call::DeleteHook(id));
    let mut state = self.state.borrow_mut();
    let before = state.hooks.len();
    state.hooks.retain(|h| h.id != id);
    if state.hooks.len() == before {
      bail!("Hook not found: {id}");
    }
    Ok(())
  }

  fn replace_topics(&self, _repo: &RepoRef, topics: &[String]) -> Result<()> {
    self.check("replace_topics")?;
    self.record(Call::ReplaceTopics(topics.to_vec()));
    self.state.borrow_mut().topics = topics.to_vec();
    Ok(())
  }
}

impl VersionControl for FakeRemote {
  fn clone_repository(&self, url: &str) -> Result<Box<dyn WorkingCopy>> {
    self.check("clone")?;
    self.record(Call::Clone(url.to_string()));
    Ok(Box::new(FakeWorkingCopy {
      remote: self.clone(),
      references: Vec::new(),
    }))
  }
}

struct FakeWorkingCopy {
  remote: FakeRemote,
  references: Vec<String>,
}

impl WorkingCopy for FakeWorkingCopy {
  fn head_commit(&self) -> Result<String> {
    self.remote.check("head")?;
    Ok(FAKE_HEAD.to_string())
  }

  fn set_reference(&mut self, name: &str, commit: &str) -> Result<()> {
    self.remote.check("set_reference")?;
    self.remote.record(Call::SetReference(name.to_string(), commit.to_string()));
    self.references.push(name.to_string());
    Ok(())
  }

  fn push(&mut self, name: &str) -> Result<()> {
    self.remote.check("push")?;
    if !self.references.iter().any(|r| r == name) {
      bail!("src refspec {name} does not match any");
    }
    self.remote.record(Call::Push(name.to_string()));

    let branch = name.strip_prefix("refs/heads/").unwrap_or(name);
    let mut state = self.remote.state.borrow_mut();
    if !state.branches.iter().any(|(existing, _)| existing == branch) {
      state.branches.push((branch.to_string(), None));
    }
    Ok(())
  }
}
