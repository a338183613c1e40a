//! Repository attributes: a singleton compared as a whole record.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::remote::RemoteApi;
use crate::settings::{RepoRef, RepositoryAttributes};

/// Send the full desired attribute record when anything differs.
pub fn reconcile_repository(
  remote: &dyn RemoteApi,
  repo: &RepoRef,
  actual: &RepositoryAttributes,
  desired: &RepositoryAttributes,
) -> Result<usize> {
  let desired = align_with_remote(actual, desired);
  if *actual == desired {
    debug!("Repository settings already match");
    return Ok(0);
  }

  info!("Updating repository settings");
  remote
    .edit_repository(repo, &desired)
    .context("failed to edit repository settings")?;
  Ok(1)
}

/// Copy in the remote values the settings file cannot change.
///
/// An unset default branch keeps the remote one. `has_pages` is read-only
/// through the repository endpoint, so it always follows the remote.
fn align_with_remote(actual: &RepositoryAttributes, desired: &RepositoryAttributes) -> RepositoryAttributes {
  let mut aligned = desired.clone();
  if aligned.default_branch.is_empty() {
    aligned.default_branch = actual.default_branch.clone();
  }
  aligned.has_pages = actual.has_pages;
  aligned
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unset_default_branch_keeps_remote() {
    let actual = RepositoryAttributes {
      default_branch: "main".to_string(),
      ..Default::default()
    };
    let aligned = align_with_remote(&actual, &RepositoryAttributes::default());
    assert_eq!(aligned, actual);
  }

  #[test]
  fn test_explicit_default_branch_wins() {
    let actual = RepositoryAttributes {
      default_branch: "main".to_string(),
      ..Default::default()
    };
    let desired = RepositoryAttributes {
      default_branch: "trunk".to_string(),
      ..Default::default()
    };
    assert_eq!(align_with_remote(&actual, &desired).default_branch, "trunk");
  }

  #[test]
  fn test_has_pages_follows_remote() {
    let actual = RepositoryAttributes {
      has_pages: true,
      ..Default::default()
    };
    assert!(align_with_remote(&actual, &RepositoryAttributes::default()).has_pages);
  }
}
