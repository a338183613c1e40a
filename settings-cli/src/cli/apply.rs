//! # Apply Command
//!
//! Loads the settings file, resolves a GitHub token, and runs one
//! reconciliation against the repository the file names.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use settings_core::creds::{home_dir, resolve_github_token};
use settings_core::output::{format_repo_name, print_info, print_success};
use settings_core::{DEFAULT_SETTINGS_FILE, Git2VersionControl, Reconciler, load_settings};
use settings_gh::{GitHubClient, GitHubRemote};
use tracing::debug;

/// Arguments for `github-settings apply`
#[derive(Args, Debug)]
pub struct ApplyArgs {
  /// Path to the YAML settings file
  #[arg(short = 'c', long = "config", value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
  pub config: PathBuf,

  /// GitHub token used for the API and for pushing new branches
  ///
  /// Falls back to the GITHUB_TOKEN environment variable, then to the
  /// password of the 'github.com' entry in ~/.netrc.
  #[arg(short = 't', long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// GitHub API root, for GitHub Enterprise
  #[arg(long = "api-url", value_name = "URL")]
  pub api_url: Option<String>,
}

pub fn handle_apply_command(args: ApplyArgs) -> Result<()> {
  let settings = load_settings(&args.config)?;
  let repo = settings.repo_ref();
  debug!("Loaded settings for {} from {}", repo, args.config.display());

  let home = home_dir();
  let token = resolve_github_token(args.token.as_deref(), home.as_deref())?;

  let mut client = GitHubClient::new(token);
  if let Some(api_url) = args.api_url {
    client = client.with_base_url(api_url);
  }
  let clone_url = client.clone_url(&repo)?;
  let remote = GitHubRemote::new(client).context("Failed to set up GitHub client")?;
  let vcs = Git2VersionControl;

  print_info(&format!("Reconciling {}", format_repo_name(&repo.to_string())));

  let summary = Reconciler::new(&remote, &vcs, clone_url).apply(&settings)?;

  print_success(&format!("{}: {}", format_repo_name(&repo.to_string()), summary));
  Ok(())
}
