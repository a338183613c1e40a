//! Webhooks, identified by URL.
//!
//! The remote never returns a hook's secret, so comparisons treat the secret
//! as always matching. Updates and deletes address the hook by the id the
//! remote assigned.

use anyhow::{Context, Result};
use tracing::info;

use crate::diff::{Plan, diff_by_key_with};
use crate::remote::RemoteApi;
use crate::settings::{RepoRef, Webhook};

/// Plan webhook changes. Updates carry the remote id of the hook they replace.
pub fn plan_webhooks(actual: &[Webhook], desired: &[Webhook]) -> Plan<Webhook> {
  let key = |hook: &Webhook| hook.url.clone();
  let mut plan = diff_by_key_with(actual, desired, key, |remote, wanted| {
    let (remote, wanted) = align_for_comparison(remote, wanted);
    remote != wanted
  });

  for wanted in &mut plan.to_update {
    if let Some(remote) = actual.iter().find(|remote| remote.url == wanted.url) {
      wanted.id = remote.id;
    }
  }

  plan
}

/// Copy the remote id onto the desired record and the desired secret onto
/// the remote record, so only comparable fields decide equality.
fn align_for_comparison(remote: &Webhook, wanted: &Webhook) -> (Webhook, Webhook) {
  let mut remote = remote.clone();
  let mut wanted = wanted.clone();
  wanted.id = remote.id;
  remote.secret = wanted.secret.clone();
  (remote, wanted)
}

pub fn reconcile_webhooks(
  remote: &dyn RemoteApi,
  repo: &RepoRef,
  actual: &[Webhook],
  desired: &[Webhook],
) -> Result<usize> {
  let plan = plan_webhooks(actual, desired);

  for hook in &plan.to_create {
    info!("Creating webhook {}", hook.url);
    remote
      .create_hook(repo, hook)
      .with_context(|| format!("failed to create webhook {}", hook.url))?;
  }

  for hook in &plan.to_delete {
    info!("Deleting webhook {}", hook.url);
    remote
      .delete_hook(repo, hook.id)
      .with_context(|| format!("failed to delete webhook {}", hook.url))?;
  }

  for hook in &plan.to_update {
    info!("Updating webhook {}", hook.url);
    remote
      .edit_hook(repo, hook)
      .with_context(|| format!("failed to update webhook {}", hook.url))?;
  }

  Ok(plan.to_create.len() + plan.to_delete.len() + plan.to_update.len())
}
