//! # Desired Settings Loader
//!
//! Reads the YAML settings file and applies load-time normalization, so the
//! reconcilers only ever see normalized desired state.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::error::ReconcileError;
use crate::settings::Settings;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.yml";

/// Load and normalize desired settings from a YAML file.
pub fn load_settings(path: &Path) -> Result<Settings, ReconcileError> {
  let load_error = |source| ReconcileError::Load {
    path: path.to_path_buf(),
    source,
  };

  let content = fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))
    .map_err(load_error)?;

  debug!("Read {} bytes of settings from {}", content.len(), path.display());

  let settings = parse_yaml(&content).map_err(load_error)?;
  validate(&settings)?;
  Ok(settings)
}

/// Parse and normalize desired settings from a YAML string.
pub fn parse_settings(content: &str) -> Result<Settings, ReconcileError> {
  let settings = parse_yaml(content).map_err(|source| ReconcileError::Load {
    path: "<inline>".into(),
    source,
  })?;
  validate(&settings)?;
  Ok(settings)
}

fn parse_yaml(content: &str) -> anyhow::Result<Settings> {
  let mut settings: Settings = serde_yaml::from_str(content).context("failed to parse settings YAML")?;
  settings.normalize();
  Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ReconcileError> {
  if settings.repository.owner.trim().is_empty() {
    return Err(ReconcileError::Invalid("repository.owner must not be empty".to_string()));
  }
  if settings.repository.name.trim().is_empty() {
    return Err(ReconcileError::Invalid("repository.name must not be empty".to_string()));
  }
  Ok(())
}
