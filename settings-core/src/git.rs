//! # Branch Materializer
//!
//! Creates a branch that exists in desired settings but not on the remote.
//! The remote API cannot create a branch from nothing, so the branch is made
//! with a version-control round trip: clone the repository, point a new ref
//! at the head commit, and push that ref back.

use anyhow::{Context, Result, anyhow};
use git2::build::RepoBuilder;
use git2::{Cred, FetchOptions, PushOptions, RemoteCallbacks, Repository};
use tempfile::TempDir;
use tracing::{debug, info, instrument};
use url::Url;

/// A transient local copy of a remote repository.
pub trait WorkingCopy {
  /// The commit id HEAD resolves to.
  fn head_commit(&self) -> Result<String>;

  /// Create or move reference `name` to point at `commit`.
  fn set_reference(&mut self, name: &str, commit: &str) -> Result<()>;

  /// Push reference `name` to the same name on the remote it was cloned from.
  fn push(&mut self, name: &str) -> Result<()>;
}

/// The version-control push capability.
pub trait VersionControl {
  /// Clone `url` into a fresh working copy.
  ///
  /// Credentials, when needed, are carried in the URL.
  fn clone_repository(&self, url: &str) -> Result<Box<dyn WorkingCopy>>;
}

/// Creates missing remote branches as copies of the default branch head.
pub struct BranchMaterializer<'a> {
  vcs: &'a dyn VersionControl,
  clone_url: &'a str,
}

impl<'a> BranchMaterializer<'a> {
  pub fn new(vcs: &'a dyn VersionControl, clone_url: &'a str) -> Self {
    Self { vcs, clone_url }
  }

  /// Create `branch` on the remote at the current head commit.
  ///
  /// Any failing step aborts; a partially created branch is not rolled back.
  #[instrument(skip(self), level = "debug")]
  pub fn create_branch(&self, branch: &str) -> Result<()> {
    debug!("Cloning {}", redact_url(self.clone_url));

    let mut working_copy = self
      .vcs
      .clone_repository(self.clone_url)
      .with_context(|| format!("failed to clone {}", redact_url(self.clone_url)))?;

    let head = working_copy.head_commit().context("failed to resolve repository head")?;
    let reference = branch_ref(branch);

    working_copy
      .set_reference(&reference, &head)
      .with_context(|| format!("failed to create reference {reference}"))?;

    working_copy
      .push(&reference)
      .with_context(|| format!("failed to push reference {reference}"))?;

    info!("Created branch {} at {}", branch, head);
    Ok(())
  }
}

/// Full reference name for a local branch.
pub fn branch_ref(branch: &str) -> String {
  format!("refs/heads/{branch}")
}

/// Replace any password in `url` so it can be logged.
pub fn redact_url(url: &str) -> String {
  let Ok(mut parsed) = Url::parse(url) else {
    return url.to_string();
  };

  let redacted = if parsed.password().is_some() {
    parsed.set_password(Some("***")).is_ok()
  } else if !parsed.username().is_empty() {
    parsed.set_username("***").is_ok()
  } else {
    true
  };

  if redacted {
    parsed.to_string()
  } else {
    "<redacted url>".to_string()
  }
}

/// [`VersionControl`] backed by libgit2.
///
/// Clones are bare and live in a temporary directory that is removed when
/// the working copy is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2VersionControl;

impl VersionControl for Git2VersionControl {
  fn clone_repository(&self, url: &str) -> Result<Box<dyn WorkingCopy>> {
    let dir = TempDir::new().context("failed to create temporary clone directory")?;

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(credential_callbacks(url));

    let repo = RepoBuilder::new()
      .bare(true)
      .fetch_options(fetch_options)
      .clone(url, dir.path())
      .context("git clone failed")?;

    Ok(Box::new(Git2WorkingCopy {
      repo,
      url: url.to_string(),
      _dir: dir,
    }))
  }
}

struct Git2WorkingCopy {
  repo: Repository,
  url: String,
  // Declared last so the repository handle closes before the directory goes
  _dir: TempDir,
}

impl WorkingCopy for Git2WorkingCopy {
  fn head_commit(&self) -> Result<String> {
    let commit = self.repo.head()?.peel_to_commit()?;
    Ok(commit.id().to_string())
  }

  fn set_reference(&mut self, name: &str, commit: &str) -> Result<()> {
    let oid = git2::Oid::from_str(commit)?;
    self.repo.reference(name, oid, true, "github-settings: create branch")?;
    Ok(())
  }

  fn push(&mut self, name: &str) -> Result<()> {
    let mut remote = self.repo.find_remote("origin")?;

    let mut callbacks = credential_callbacks(&self.url);
    callbacks.push_update_reference(|refname, status| match status {
      Some(message) => Err(git2::Error::from_str(&format!("remote rejected {refname}: {message}"))),
      None => Ok(()),
    });

    let mut push_options = PushOptions::new();
    push_options.remote_callbacks(callbacks);

    let refspec = format!("{name}:{name}");
    remote
      .push(&[refspec.as_str()], Some(&mut push_options))
      .map_err(|e| anyhow!("git push failed: {}", e.message()))?;
    Ok(())
  }
}

/// Callbacks that answer credential prompts from the userinfo in `url`.
fn credential_callbacks(url: &str) -> RemoteCallbacks<'static> {
  let credentials = Url::parse(url).ok().and_then(|parsed| {
    let password = parsed.password()?.to_string();
    Some((parsed.username().to_string(), password))
  });

  let mut attempts = 0;
  let mut callbacks = RemoteCallbacks::new();
  callbacks.credentials(move |_url, username_from_url, _allowed| {
    // libgit2 keeps asking while the server rejects; one try is all we have
    attempts += 1;
    if attempts > 1 {
      return Err(git2::Error::from_str("authentication rejected by remote"));
    }
    match &credentials {
      Some((username, password)) => Cred::userpass_plaintext(username, password),
      None => Cred::userpass_plaintext(username_from_url.unwrap_or_default(), ""),
    }
  });
  callbacks
}
