//! Test utilities shared across the workspace
//!
//! - an in-memory remote implementing both the remote API and the version
//!   control capability ([`FakeRemote`])
//! - a bare git repository acting as a push target ([`BareRemoteGuard`])
//! - a temporary home directory with a `.netrc` ([`NetrcGuard`])
//!
//! The dead_code lint is disabled because not every test uses every helper.

#![allow(dead_code)]

pub mod git;
pub mod netrc;
pub mod remote;

pub use git::{BareRemoteGuard, create_commit};
pub use netrc::NetrcGuard;
pub use remote::{Call, FakeRemote};
