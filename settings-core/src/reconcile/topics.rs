//! Topics: an unordered set replaced in one call.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::remote::RemoteApi;
use crate::settings::RepoRef;

/// The topic set to send, or `None` when both sides hold the same topics.
pub fn plan_topics(actual: &[String], desired: &[String]) -> Option<Vec<String>> {
  let mut actual_sorted = actual.to_vec();
  let mut desired_sorted = desired.to_vec();
  actual_sorted.sort();
  desired_sorted.sort();

  (actual_sorted != desired_sorted).then_some(desired_sorted)
}

pub fn reconcile_topics(remote: &dyn RemoteApi, repo: &RepoRef, actual: &[String], desired: &[String]) -> Result<usize> {
  let Some(topics) = plan_topics(actual, desired) else {
    debug!("Topics already match");
    return Ok(0);
  };

  info!("Replacing topics with [{}]", topics.join(", "));
  remote
    .replace_topics(repo, &topics)
    .context("failed to replace topics")?;
  Ok(1)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn topics(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
  }

  #[test]
  fn test_plan_topics_ignores_order() {
    assert_eq!(plan_topics(&topics(&["b", "a"]), &topics(&["a", "b"])), None);
  }

  #[test]
  fn test_plan_topics_replaces_with_desired_set() {
    let plan = plan_topics(&topics(&["b", "a", "c"]), &topics(&["a", "b"]));
    assert_eq!(plan, Some(topics(&["a", "b"])));
  }

  #[test]
  fn test_plan_topics_clears_all_topics() {
    assert_eq!(plan_topics(&topics(&["a"]), &[]), Some(Vec::new()));
  }
}
