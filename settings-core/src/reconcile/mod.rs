//! # Reconciliation Orchestrator
//!
//! Reads remote state once, then hands each resource kind's (actual, desired)
//! pair to its reconciler in a fixed order. The first failure stops the run;
//! writes already applied stay applied.

pub mod branches;
pub mod labels;
pub mod repository;
pub mod topics;
pub mod webhooks;

use std::collections::BTreeMap;
use std::fmt;

use tracing::{info, instrument};

use crate::error::{ReconcileError, ResourceKind};
use crate::git::{BranchMaterializer, VersionControl};
use crate::remote::RemoteApi;
use crate::settings::Settings;
use crate::state::fetch_remote_settings;

/// Number of write operations applied per resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
  writes: BTreeMap<ResourceKind, usize>,
}

impl ApplySummary {
  pub fn record(&mut self, kind: ResourceKind, writes: usize) {
    *self.writes.entry(kind).or_default() += writes;
  }

  /// Writes applied for `kind`.
  pub fn writes(&self, kind: ResourceKind) -> usize {
    self.writes.get(&kind).copied().unwrap_or_default()
  }

  /// Writes applied across all kinds.
  pub fn total(&self) -> usize {
    self.writes.values().sum()
  }

  pub fn is_noop(&self) -> bool {
    self.total() == 0
  }
}

impl fmt::Display for ApplySummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_noop() {
      return f.write_str("already up to date");
    }

    let parts: Vec<String> = self
      .writes
      .iter()
      .filter(|(_, count)| **count > 0)
      .map(|(kind, count)| format!("{kind}: {count}"))
      .collect();
    write!(f, "{} change(s) applied ({})", self.total(), parts.join(", "))
  }
}

/// Drives one reconciliation run against a single repository.
pub struct Reconciler<'a> {
  remote: &'a dyn RemoteApi,
  vcs: &'a dyn VersionControl,
  clone_url: String,
}

impl<'a> Reconciler<'a> {
  /// `clone_url` is used only when a desired branch has to be created.
  pub fn new(remote: &'a dyn RemoteApi, vcs: &'a dyn VersionControl, clone_url: impl Into<String>) -> Self {
    Self {
      remote,
      vcs,
      clone_url: clone_url.into(),
    }
  }

  /// Converge the remote repository onto `desired`.
  ///
  /// `desired` must already be normalized (see [`Settings::normalize`]).
  #[instrument(skip_all, fields(repo = %desired.repo_ref()))]
  pub fn apply(&self, desired: &Settings) -> Result<ApplySummary, ReconcileError> {
    let repo = desired.repo_ref();
    info!("Reading current settings of {}", repo);

    let actual = fetch_remote_settings(self.remote, &repo)?;
    let materializer = BranchMaterializer::new(self.vcs, &self.clone_url);
    let mut summary = ApplySummary::default();

    for kind in ResourceKind::ALL {
      let result = match kind {
        ResourceKind::Repository => repository::reconcile_repository(
          self.remote,
          &repo,
          &actual.repository.attributes,
          &desired.repository.attributes,
        ),
        ResourceKind::Labels => labels::reconcile_labels(self.remote, &repo, &actual.labels, &desired.labels),
        ResourceKind::Branches => {
          branches::reconcile_branches(self.remote, &materializer, &repo, &actual.branches, &desired.branches)
        }
        ResourceKind::Webhooks => webhooks::reconcile_webhooks(self.remote, &repo, &actual.webhooks, &desired.webhooks),
        ResourceKind::Topics => topics::reconcile_topics(self.remote, &repo, &actual.topics, &desired.topics),
      };

      let writes = result.map_err(|source| ReconcileError::Write { kind, source })?;
      summary.record(kind, writes);
    }

    info!("Reconciled {}: {}", repo, summary);
    Ok(summary)
  }
}
