//! # github-settings CLI Library
//!
//! Command definitions and handlers for the `github-settings` binary.

pub mod cli;
