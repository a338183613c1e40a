//! # GitHub API Client
//!
//! Provides GitHub REST API integration for the repository settings
//! github-settings manages: repository metadata, labels, branch protection,
//! webhooks and topics. [`GitHubRemote`] exposes the client through the
//! engine's blocking remote API.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;
pub mod remote;

// Re-export the client
pub use client::GitHubClient;
// Re-export models
pub use models::{GitHubBranch, GitHubBranchProtection, GitHubHook, GitHubLabel, GitHubRepository};
// Re-export the blocking adapter
pub use remote::GitHubRemote;
