//! Error types for `registrar-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("course not found: {0}")]
  CourseNotFound(String),

  #[error("curricular unit not found: {0}")]
  UnitNotFound(String),

  #[error("professor not found: {0}")]
  ProfessorNotFound(String),

  #[error("student not found: {0}")]
  StudentNotFound(String),

  #[error("summary not found: {0}")]
  SummaryNotFound(String),

  #[error("user not found: {0}")]
  UserNotFound(String),

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("permission denied: {0}")]
  PermissionDenied(&'static str),

  #[error("professor {professor} does not teach {unit}")]
  NotOnTeachingLoad { professor: String, unit: String },

  #[error("unsupported snapshot version: {0}")]
  UnsupportedSnapshotVersion(u32),

  #[error("persistence failure: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
