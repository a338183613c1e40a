//! # Remote State Reader
//!
//! Fetches the current state of a repository and normalizes it into the same
//! [`Settings`] shape the desired side uses, so the two can be diffed field
//! by field.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{MalformedHookConfig, ReconcileError, ResourceKind};
use crate::remote::{RemoteApi, RemoteHook, RemoteProtection};
use crate::settings::{Branch, Protection, RepoRef, Repository, RequiredReviews, RequiredStatusChecks, Settings, Webhook};

/// Read the full remote settings snapshot for `repo`.
///
/// Any failure aborts the read; there is no partial result.
#[instrument(skip(remote), level = "debug", fields(repo = %repo))]
pub fn fetch_remote_settings(remote: &dyn RemoteApi, repo: &RepoRef) -> Result<Settings, ReconcileError> {
  let read_error = |kind: ResourceKind| move |source: anyhow::Error| ReconcileError::Read { kind, source };

  let remote_repo = remote
    .get_repository(repo)
    .context("failed to get repository")
    .map_err(read_error(ResourceKind::Repository))?;

  let labels = remote
    .list_labels(repo)
    .context("failed to list labels")
    .map_err(read_error(ResourceKind::Labels))?;

  let branches = read_branches(remote, repo).map_err(read_error(ResourceKind::Branches))?;
  let webhooks = read_webhooks(remote, repo).map_err(read_error(ResourceKind::Webhooks))?;

  debug!(
    "Remote state: {} labels, {} branches, {} webhooks, {} topics",
    labels.len(),
    branches.len(),
    webhooks.len(),
    remote_repo.topics.len()
  );

  Ok(Settings {
    repository: Repository {
      owner: repo.owner.clone(),
      name: repo.name.clone(),
      attributes: remote_repo.attributes,
    },
    labels,
    branches,
    webhooks,
    topics: remote_repo.topics,
  })
}

fn read_branches(remote: &dyn RemoteApi, repo: &RepoRef) -> Result<Vec<Branch>> {
  let listed = remote.list_branches(repo).context("failed to list branches")?;

  listed
    .into_iter()
    .map(|branch| {
      if !branch.protected {
        return Ok(Branch::unprotected(branch.name));
      }

      let detail = remote
        .get_branch_protection(repo, &branch.name)
        .with_context(|| format!("failed to get protection for branch {}", branch.name))?;

      Ok(Branch {
        name: branch.name,
        protection: protection_from_remote(detail),
      })
    })
    .collect()
}

/// Map remote protection detail onto the settings shape.
///
/// Missing review or status-check blocks read as zero values.
pub fn protection_from_remote(detail: RemoteProtection) -> Protection {
  let required_pull_request_reviews = detail
    .required_reviews
    .map(|reviews| RequiredReviews {
      required_approving_review_count: reviews.required_approving_review_count,
      dismiss_stale_reviews: reviews.dismiss_stale_reviews,
      require_code_owner_reviews: reviews.require_code_owner_reviews,
    })
    .unwrap_or_default();

  let required_status_checks = detail
    .required_status_checks
    .map(|checks| RequiredStatusChecks {
      strict: checks.strict,
      contexts: checks.contexts,
    })
    .unwrap_or_default();

  Protection {
    enabled: true,
    enforce_admins: detail.enforce_admins,
    required_pull_request_reviews,
    required_status_checks,
  }
}

fn read_webhooks(remote: &dyn RemoteApi, repo: &RepoRef) -> Result<Vec<Webhook>> {
  let hooks = remote.list_hooks(repo).context("failed to list webhooks")?;
  hooks.into_iter().map(|hook| webhook_from_remote(hook).map_err(Into::into)).collect()
}

/// Extract a [`Webhook`] from a remote hook's config map.
///
/// A missing key reads as an empty string; a key holding anything other
/// than a string is malformed remote data.
pub fn webhook_from_remote(hook: RemoteHook) -> Result<Webhook, MalformedHookConfig> {
  let string_key = |key: &str| -> Result<String, MalformedHookConfig> {
    match hook.config.get(key) {
      None | Some(Value::Null) => Ok(String::new()),
      Some(Value::String(value)) => Ok(value.clone()),
      Some(other) => Err(MalformedHookConfig {
        hook_id: hook.id,
        key: key.to_string(),
        found: json_type_name(other),
      }),
    }
  };

  Ok(Webhook {
    id: hook.id,
    url: string_key("url")?,
    content_type: string_key("content_type")?,
    secret: string_key("secret")?,
    events: hook.events.clone(),
  })
}

const fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::remote::{RemoteReviews, RemoteStatusChecks};

  fn hook(config: Value) -> RemoteHook {
    RemoteHook {
      id: 7,
      config: config.as_object().cloned().unwrap_or_default(),
      events: vec!["push".to_string()],
    }
  }

  #[test]
  fn test_webhook_from_remote_reads_config() {
    let webhook = webhook_from_remote(hook(json!({
      "url": "https://hooks.example.com",
      "content_type": "json",
      "secret": "********",
      "insecure_ssl": "0"
    })))
    .unwrap();

    assert_eq!(webhook.id, 7);
    assert_eq!(webhook.url, "https://hooks.example.com");
    assert_eq!(webhook.content_type, "json");
    assert_eq!(webhook.secret, "********");
    assert_eq!(webhook.events, vec!["push"]);
  }

  #[test]
  fn test_webhook_from_remote_missing_secret_is_empty() {
    let webhook = webhook_from_remote(hook(json!({
      "url": "https://hooks.example.com",
      "content_type": "form"
    })))
    .unwrap();

    assert_eq!(webhook.secret, "");
  }

  #[test]
  fn test_webhook_from_remote_rejects_non_string_values() {
    let err = webhook_from_remote(hook(json!({
      "url": "https://hooks.example.com",
      "content_type": 42
    })))
    .unwrap_err();

    assert_eq!(err.hook_id, 7);
    assert_eq!(err.key, "content_type");
    assert_eq!(err.found, "number");
  }

  #[test]
  fn test_protection_from_remote_without_optional_blocks() {
    let protection = protection_from_remote(RemoteProtection {
      enforce_admins: true,
      required_reviews: None,
      required_status_checks: None,
    });

    assert!(protection.enabled);
    assert!(protection.enforce_admins);
    assert_eq!(protection.required_pull_request_reviews, RequiredReviews::default());
    assert_eq!(protection.required_status_checks, RequiredStatusChecks::default());
  }

  #[test]
  fn test_protection_from_remote_with_all_blocks() {
    let protection = protection_from_remote(RemoteProtection {
      enforce_admins: false,
      required_reviews: Some(RemoteReviews {
        required_approving_review_count: 2,
        dismiss_stale_reviews: true,
        require_code_owner_reviews: false,
      }),
      required_status_checks: Some(RemoteStatusChecks {
        strict: true,
        contexts: vec!["ci".to_string()],
      }),
    });

    assert_eq!(protection.required_pull_request_reviews.required_approving_review_count, 2);
    assert!(protection.required_pull_request_reviews.dismiss_stale_reviews);
    assert!(protection.required_status_checks.strict);
    assert_eq!(protection.required_status_checks.contexts, vec!["ci"]);
  }
}
