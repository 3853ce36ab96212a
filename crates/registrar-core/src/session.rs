//! Sessions and capabilities.
//!
//! Role-gated operations take an explicit capability proof instead of
//! trusting whichever reference a caller happens to pass. Only the root
//! aggregate can mint an [`AdminCap`], and only after verifying that the
//! current session belongs to the administrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Administrator,
  Professor,
  Student,
  /// A principal from the generic user repository with no role-specific
  /// entity attached.
  Member,
}

/// The currently authenticated principal. Minted by `System::login`, held
/// by the system, and never persisted in snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub token:      Uuid,
  pub username:   String,
  pub role:       Role,
  pub started_at: DateTime<Utc>,
}

impl Session {
  pub(crate) fn open(username: impl Into<String>, role: Role) -> Self {
    Self {
      token: Uuid::new_v4(),
      username: username.into(),
      role,
      started_at: Utc::now(),
    }
  }
}

/// Proof of administrator rights for the current session.
///
/// Deliberately not constructible outside this crate: holding one means
/// `System::admin_capability` verified the session token.
#[derive(Debug)]
pub struct AdminCap {
  _proof: (),
}

impl AdminCap {
  pub(crate) fn mint() -> Self { Self { _proof: () } }
}
