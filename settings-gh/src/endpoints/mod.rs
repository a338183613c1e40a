//! # GitHub API Endpoints
//!
//! Endpoint implementations for the repository resources github-settings
//! manages: the repository itself, labels, branch protection, webhooks and
//! topics.

pub mod branches;
pub mod hooks;
pub mod labels;
pub mod repos;
pub mod topics;
