//! # Settings Core Library
//!
//! Reconciliation engine for declarative GitHub repository settings. Given a
//! desired [`Settings`] snapshot, it reads the remote state through a
//! [`RemoteApi`], diffs each resource kind, and applies the minimal set of
//! writes, creating missing branches through a [`VersionControl`] push.

pub mod config;
pub mod creds;
pub mod diff;
pub mod error;
pub mod git;
pub mod output;
pub mod reconcile;
pub mod remote;
pub mod settings;
pub mod state;

pub use config::{DEFAULT_SETTINGS_FILE, load_settings, parse_settings};
pub use error::{MalformedHookConfig, ReconcileError, ResourceKind};
pub use git::{BranchMaterializer, Git2VersionControl, VersionControl, WorkingCopy};
pub use reconcile::{ApplySummary, Reconciler};
pub use remote::{
  RemoteApi, RemoteBranch, RemoteHook, RemoteProtection, RemoteRepository, RemoteReviews, RemoteStatusChecks,
};
pub use settings::{
  Branch, Label, Protection, RepoRef, Repository, RepositoryAttributes, RequiredReviews, RequiredStatusChecks,
  Settings, Webhook,
};
pub use state::fetch_remote_settings;
