//! Labels, identified by name.

use anyhow::{Context, Result};
use tracing::info;

use crate::diff::{Plan, diff_by_key};
use crate::remote::RemoteApi;
use crate::settings::{Label, RepoRef};

pub fn plan_labels(actual: &[Label], desired: &[Label]) -> Plan<Label> {
  diff_by_key(actual, desired, |label| label.name.clone())
}

/// Create, delete, then update labels. Returns the number of writes.
pub fn reconcile_labels(remote: &dyn RemoteApi, repo: &RepoRef, actual: &[Label], desired: &[Label]) -> Result<usize> {
  let plan = plan_labels(actual, desired);

  for label in &plan.to_create {
    info!("Creating label {}", label.name);
    remote
      .create_label(repo, label)
      .with_context(|| format!("failed to create label {}", label.name))?;
  }

  for label in &plan.to_delete {
    info!("Deleting label {}", label.name);
    remote
      .delete_label(repo, &label.name)
      .with_context(|| format!("failed to delete label {}", label.name))?;
  }

  for label in &plan.to_update {
    info!("Updating label {}", label.name);
    remote
      .edit_label(repo, label)
      .with_context(|| format!("failed to update label {}", label.name))?;
  }

  Ok(plan.to_create.len() + plan.to_delete.len() + plan.to_update.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn label(name: &str, color: &str) -> Label {
    Label {
      name: name.to_string(),
      description: String::new(),
      color: color.to_string(),
    }
  }

  #[test]
  fn test_plan_labels_detects_color_change() {
    let actual = vec![label("bug", "d73a4a"), label("stale", "eeeeee")];
    let desired = vec![label("bug", "ff0000"), label("feature", "00ff00")];

    let plan = plan_labels(&actual, &desired);

    assert_eq!(plan.to_create, vec![label("feature", "00ff00")]);
    assert_eq!(plan.to_delete, vec![label("stale", "eeeeee")]);
    assert_eq!(plan.to_update, vec![label("bug", "ff0000")]);
  }

  #[test]
  fn test_plan_labels_description_change_is_an_update() {
    let actual = vec![label("bug", "d73a4a")];
    let mut desired = actual.clone();
    desired[0].description = "Something isn't working".to_string();

    let plan = plan_labels(&actual, &desired);
    assert_eq!(plan.to_update.len(), 1);
    assert!(plan.to_create.is_empty());
    assert!(plan.to_delete.is_empty());
  }
}
