//! # Error Types
//!
//! Typed failures surfaced by a reconciliation run. Lower layers report
//! through `anyhow` with operation context; these variants add the resource
//! kind and the phase (load, read, write) that failed.

use std::fmt;
use std::path::PathBuf;

use anyhow::Error as AnyError;
use thiserror::Error;

/// The five categories of remote state the engine reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
  Repository,
  Labels,
  Branches,
  Webhooks,
  Topics,
}

impl ResourceKind {
  /// Kinds in the order they are reconciled.
  pub const ALL: [ResourceKind; 5] = [
    ResourceKind::Repository,
    ResourceKind::Labels,
    ResourceKind::Branches,
    ResourceKind::Webhooks,
    ResourceKind::Topics,
  ];
}

impl fmt::Display for ResourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ResourceKind::Repository => "repository settings",
      ResourceKind::Labels => "labels",
      ResourceKind::Branches => "branch protection",
      ResourceKind::Webhooks => "webhooks",
      ResourceKind::Topics => "topics",
    };
    f.write_str(name)
  }
}

/// Errors produced while loading desired settings or reconciling them.
#[derive(Debug, Error)]
pub enum ReconcileError {
  /// Desired settings could not be read or parsed. Nothing was attempted.
  #[error("failed to load settings from {}", path.display())]
  Load {
    path: PathBuf,
    #[source]
    source: AnyError,
  },
  /// Desired settings parsed but are unusable.
  #[error("invalid settings: {0}")]
  Invalid(String),
  /// Reading remote state failed. No writes were attempted.
  #[error("failed to read {kind} from remote")]
  Read {
    kind: ResourceKind,
    #[source]
    source: AnyError,
  },
  /// A write failed. Writes already applied in this run are kept.
  #[error("failed to update {kind}")]
  Write {
    kind: ResourceKind,
    #[source]
    source: AnyError,
  },
}

impl ReconcileError {
  /// The resource kind a read or write failure belongs to.
  pub const fn kind(&self) -> Option<ResourceKind> {
    match self {
      ReconcileError::Read { kind, .. } | ReconcileError::Write { kind, .. } => Some(*kind),
      ReconcileError::Load { .. } | ReconcileError::Invalid(_) => None,
    }
  }
}

/// A webhook config entry held a value of the wrong type.
#[derive(Debug, Error)]
#[error("webhook {hook_id}: config key `{key}` is not a string (found {found})")]
pub struct MalformedHookConfig {
  pub hook_id: u64,
  pub key: String,
  pub found: &'static str,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_messages_name_the_resource_kind() {
    let err = ReconcileError::Write {
      kind: ResourceKind::Labels,
      source: anyhow::anyhow!("boom"),
    };
    assert_eq!(err.to_string(), "failed to update labels");
    assert_eq!(err.kind(), Some(ResourceKind::Labels));

    let err = ReconcileError::Read {
      kind: ResourceKind::Webhooks,
      source: anyhow::anyhow!("boom"),
    };
    assert_eq!(err.to_string(), "failed to read webhooks from remote");
  }

  #[test]
  fn test_kinds_are_listed_in_reconcile_order() {
    let mut sorted = ResourceKind::ALL;
    sorted.sort();
    assert_eq!(sorted, ResourceKind::ALL);
  }
}
