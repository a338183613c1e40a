//! Branch protection, identified by branch name.
//!
//! A desired branch missing on the remote is created first and then always
//! protected in the same run. A remote branch missing from desired settings
//! loses its protection; the branch itself is never deleted.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::diff::{Plan, diff_by_key};
use crate::git::BranchMaterializer;
use crate::remote::RemoteApi;
use crate::settings::{Branch, RepoRef};

pub fn plan_branches(actual: &[Branch], desired: &[Branch]) -> Plan<Branch> {
  diff_by_key(actual, desired, |branch| branch.name.clone())
}

/// Branches that need a protection update, in desired order: everything
/// just created plus everything whose protection differs.
pub fn protection_updates(plan: &Plan<Branch>, desired: &[Branch]) -> Vec<Branch> {
  desired
    .iter()
    .filter(|branch| {
      plan.to_create.iter().any(|b| b.name == branch.name) || plan.to_update.iter().any(|b| b.name == branch.name)
    })
    .cloned()
    .collect()
}

/// Materialize missing branches, drop stale protection, then apply protection.
pub fn reconcile_branches(
  remote: &dyn RemoteApi,
  materializer: &BranchMaterializer<'_>,
  repo: &RepoRef,
  actual: &[Branch],
  desired: &[Branch],
) -> Result<usize> {
  let plan = plan_branches(actual, desired);
  let mut writes = 0;

  for branch in &plan.to_create {
    info!("Creating new branch {}", branch.name);
    materializer
      .create_branch(&branch.name)
      .with_context(|| format!("failed to create branch {}", branch.name))?;
    writes += 1;
  }

  for branch in &plan.to_delete {
    if !branch.protection.enabled {
      // Removing protection that does not exist is an error on the remote
      debug!("Branch {} is not protected, leaving it alone", branch.name);
      continue;
    }

    info!("Removing branch protection for {}", branch.name);
    remote
      .remove_branch_protection(repo, &branch.name)
      .with_context(|| format!("failed to remove protection from branch {}", branch.name))?;
    writes += 1;
  }

  for branch in protection_updates(&plan, desired) {
    info!("Updating branch protection for {}", branch.name);
    remote
      .update_branch_protection(repo, &branch.name, &branch.protection)
      .with_context(|| format!("failed to update protection for branch {}", branch.name))?;
    writes += 1;
  }

  Ok(writes)
}
