//! [`JsonStore`] — the JSON-file implementation of [`StateStore`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use registrar_core::snapshot::Snapshot;
use registrar_core::store::StateStore;

use crate::{Error, Result};

/// A state store backed by one JSON file at a fixed path.
///
/// Saves go through a temporary sibling file followed by a rename, so the
/// previous snapshot survives any failure before the rename lands.
#[derive(Debug, Clone)]
pub struct JsonStore {
  path: PathBuf,
}

impl JsonStore {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// Whether a snapshot has been saved at this path.
  pub fn exists(&self) -> bool { self.path.exists() }

  fn staging_path(&self) -> PathBuf {
    let mut name = self.path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
  }
}

impl StateStore for JsonStore {
  type Error = Error;

  fn save(&self, snapshot: &Snapshot) -> Result<()> {
    let encoded =
      serde_json::to_vec_pretty(snapshot).map_err(Error::Encode)?;

    let staging = self.staging_path();
    fs::write(&staging, &encoded)?;
    fs::rename(&staging, &self.path)?;

    debug!(path = %self.path.display(), bytes = encoded.len(), "snapshot saved");
    Ok(())
  }

  fn load(&self) -> Result<Snapshot> {
    if !self.path.exists() {
      return Err(Error::Missing(self.path.clone()));
    }
    let raw = fs::read(&self.path)?;
    let snapshot = serde_json::from_slice(&raw).map_err(Error::Decode)?;
    debug!(path = %self.path.display(), bytes = raw.len(), "snapshot loaded");
    Ok(snapshot)
  }
}
