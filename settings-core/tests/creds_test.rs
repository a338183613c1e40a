use settings_core::creds::{GITHUB_MACHINE, netrc_credentials, resolve_github_token};
use settings_test_utils::NetrcGuard;

const NETRC: &str = "machine example.com\n  login other\n  password nope\nmachine github.com\n  login octocat\n  password ghp_netrc\n";

#[test]
fn test_token_from_netrc() {
  let home = NetrcGuard::new(NETRC);

  let token = resolve_github_token(None, Some(home.home_dir())).unwrap();
  assert_eq!(token, "ghp_netrc");
}

#[test]
fn test_explicit_token_beats_netrc() {
  let home = NetrcGuard::new(NETRC);

  let token = resolve_github_token(Some("ghp_flag"), Some(home.home_dir())).unwrap();
  assert_eq!(token, "ghp_flag");
}

#[test]
fn test_blank_explicit_token_falls_back_to_netrc() {
  let home = NetrcGuard::new(NETRC);

  let token = resolve_github_token(Some("   "), Some(home.home_dir())).unwrap();
  assert_eq!(token, "ghp_netrc");
}

#[test]
fn test_netrc_without_github_entry() {
  let home = NetrcGuard::new("machine example.com login other password nope\n");

  assert!(netrc_credentials(home.netrc_path(), GITHUB_MACHINE).unwrap().is_none());
  let err = resolve_github_token(None, Some(home.home_dir())).unwrap_err();
  assert!(err.to_string().contains("No GitHub token found"));
}

#[test]
fn test_missing_netrc_file() {
  let home = NetrcGuard::empty();

  assert!(netrc_credentials(home.netrc_path(), GITHUB_MACHINE).unwrap().is_none());
  assert!(resolve_github_token(None, Some(home.home_dir())).is_err());
}
