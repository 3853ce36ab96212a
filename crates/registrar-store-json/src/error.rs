//! Error type for `registrar-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("encode error: {0}")]
  Encode(#[source] serde_json::Error),

  #[error("decode error: {0}")]
  Decode(#[source] serde_json::Error),

  /// Load was attempted before any snapshot was saved.
  #[error("no snapshot at {0}")]
  Missing(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
