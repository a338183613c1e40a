use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SETTINGS: &str = r#"
repository:
  owner: octo-org
  name: octo-repo
  description: Demo
  default_branch: main
topics: [rust, cli]
"#;

/// A working directory holding `settings.yml` and an empty home.
fn workspace(settings: &str) -> TempDir {
  let dir = TempDir::new().unwrap();
  fs::write(dir.path().join("settings.yml"), settings).unwrap();
  fs::create_dir(dir.path().join("home")).unwrap();
  dir
}

fn github_settings(dir: &TempDir) -> Command {
  let mut cmd = Command::cargo_bin("github-settings").unwrap();
  cmd
    .current_dir(dir.path())
    .env("HOME", dir.path().join("home"))
    .env_remove("GITHUB_TOKEN")
    .env_remove("RUST_LOG");
  cmd
}

async fn mount_get(server: &MockServer, route: &str, body: serde_json::Value) {
  Mock::given(method("GET"))
    .and(path(route))
    .respond_with(ResponseTemplate::new(200).set_body_json(body))
    .mount(server)
    .await;
}

async fn mount_remote_state(server: &MockServer, topics: &[&str]) {
  mount_get(
    server,
    "/repos/octo-org/octo-repo",
    json!({ "description": "Demo", "homepage": null, "default_branch": "main", "topics": topics }),
  )
  .await;
  mount_get(server, "/repos/octo-org/octo-repo/labels", json!([])).await;
  mount_get(server, "/repos/octo-org/octo-repo/branches", json!([])).await;
  mount_get(server, "/repos/octo-org/octo-repo/hooks", json!([])).await;
}

#[test]
fn test_help_lists_apply() {
  let dir = workspace(SETTINGS);
  github_settings(&dir)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("apply"));
}

#[test]
fn test_missing_settings_file_fails() {
  let dir = workspace(SETTINGS);
  github_settings(&dir)
    .args(["apply", "--config", "missing.yml", "--token", "t"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to load settings from missing.yml"));
}

#[test]
fn test_unknown_settings_key_fails() {
  let dir = workspace("repository:\n  owner: o\n  name: r\nlabelz: []\n");
  github_settings(&dir)
    .args(["apply", "--token", "t"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown field `labelz`"));
}

#[test]
fn test_missing_token_fails() {
  let dir = workspace(SETTINGS);
  github_settings(&dir)
    .arg("apply")
    .assert()
    .failure()
    .stderr(predicate::str::contains("No GitHub token found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_reports_up_to_date() {
  let server = MockServer::start().await;
  mount_remote_state(&server, &["cli", "rust"]).await;

  let dir = workspace(SETTINGS);
  github_settings(&dir)
    .args(["apply", "--api-url", server.uri().as_str()])
    .env("GITHUB_TOKEN", "ghp_env")
    .assert()
    .success()
    .stdout(predicate::str::contains("already up to date"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_replaces_topics_with_netrc_token() {
  let server = MockServer::start().await;
  mount_remote_state(&server, &["legacy"]).await;

  Mock::given(method("PUT"))
    .and(path("/repos/octo-org/octo-repo/topics"))
    .and(wiremock::matchers::header("authorization", "Bearer ghp_netrc"))
    .and(body_json(json!({ "names": ["cli", "rust"] })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "names": ["cli", "rust"] })))
    .expect(1)
    .mount(&server)
    .await;

  let dir = workspace(SETTINGS);
  fs::write(
    dir.path().join("home").join(".netrc"),
    "machine github.com\n  login octocat\n  password ghp_netrc\n",
  )
  .unwrap();

  github_settings(&dir)
    .args(["apply", "--api-url", server.uri().as_str()])
    .assert()
    .success()
    .stdout(predicate::str::contains("1 change(s) applied (topics: 1)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_write_prints_error_chain() {
  let server = MockServer::start().await;
  mount_remote_state(&server, &["legacy"]).await;

  Mock::given(method("PUT"))
    .and(path("/repos/octo-org/octo-repo/topics"))
    .respond_with(ResponseTemplate::new(422).set_body_string("Invalid topics"))
    .mount(&server)
    .await;

  let dir = workspace(SETTINGS);
  github_settings(&dir)
    .args(["apply", "--token", "ghp_flag", "--api-url", server.uri().as_str()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to update topics"))
    .stderr(predicate::str::contains("Invalid topics"));
}
