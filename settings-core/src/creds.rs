//! # Credential Lookup
//!
//! Finds the GitHub token used for both the REST API and the branch push.
//! An explicit token wins; otherwise the `github.com` entry of `~/.netrc` is
//! used, with its `password` field holding the token.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::BaseDirs;
use tracing::debug;

/// Machine name looked up in `.netrc`.
pub const GITHUB_MACHINE: &str = "github.com";

/// Credentials for one `.netrc` machine entry.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Path of the `.netrc` file inside `home`.
pub fn netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// The current user's home directory.
pub fn home_dir() -> Option<PathBuf> {
  BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Look up `machine` in a `.netrc` file.
///
/// Returns `Ok(None)` when the file is missing or holds no complete entry
/// for the machine. Both single-line and multi-line entries are accepted.
pub fn netrc_credentials(path: &Path, machine: &str) -> Result<Option<Credentials>> {
  if !path.exists() {
    return Ok(None);
  }

  let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  Ok(parse_netrc(&content, machine))
}

fn parse_netrc(content: &str, machine: &str) -> Option<Credentials> {
  let mut tokens = content.split_whitespace();
  let mut in_target = false;
  let mut username = None;
  let mut password = None;

  while let Some(token) = tokens.next() {
    match token {
      "machine" => {
        if in_target {
          break;
        }
        in_target = tokens.next() == Some(machine);
      }
      "default" if in_target => break,
      "login" => {
        let value = tokens.next();
        if in_target {
          username = value.map(str::to_string);
        }
      }
      "password" => {
        let value = tokens.next();
        if in_target {
          password = value.map(str::to_string);
        }
      }
      _ => {}
    }
  }

  Some(Credentials {
    username: username?,
    password: password?,
  })
}

/// Resolve the GitHub token: `explicit` first, then `~/.netrc`.
pub fn resolve_github_token(explicit: Option<&str>, home: Option<&Path>) -> Result<String> {
  if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
    debug!("Using GitHub token from command line or environment");
    return Ok(token.to_string());
  }

  if let Some(home) = home {
    let path = netrc_path(home);
    if let Some(creds) = netrc_credentials(&path, GITHUB_MACHINE)? {
      debug!("Using GitHub token from {}", path.display());
      return Ok(creds.password);
    }
  }

  Err(anyhow!(
    "No GitHub token found. Pass --token, set GITHUB_TOKEN, or add a '{GITHUB_MACHINE}' entry to ~/.netrc."
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_netrc_multi_line() {
    let content = "machine example.com\n  login other\n  password nope\nmachine github.com\n  login octocat\n  password ghp_token\n";
    let creds = parse_netrc(content, "github.com").unwrap();
    assert_eq!(creds.username, "octocat");
    assert_eq!(creds.password, "ghp_token");
  }

  #[test]
  fn test_parse_netrc_single_line() {
    let content = "machine github.com login octocat password ghp_token\nmachine example.com login x password y\n";
    let creds = parse_netrc(content, "github.com").unwrap();
    assert_eq!(creds.password, "ghp_token");
  }

  #[test]
  fn test_parse_netrc_does_not_leak_other_machines() {
    let content = "machine github.com login octocat\nmachine example.com login x password y\n";
    assert!(parse_netrc(content, "github.com").is_none());
  }

  #[test]
  fn test_parse_netrc_missing_machine() {
    assert!(parse_netrc("machine example.com login x password y", "github.com").is_none());
  }

  #[test]
  fn test_explicit_token_wins() {
    let token = resolve_github_token(Some("  ghp_explicit "), None).unwrap();
    assert_eq!(token, "ghp_explicit");
  }

  #[test]
  fn test_missing_token_is_an_error() {
    let err = resolve_github_token(Some(""), None).unwrap_err();
    assert!(err.to_string().contains("No GitHub token found"));
  }

  #[test]
  fn test_credentials_debug_redacts_password() {
    let creds = Credentials {
      username: "octocat".to_string(),
      password: "ghp_secret".to_string(),
    };
    assert!(!format!("{creds:?}").contains("ghp_secret"));
  }
}
