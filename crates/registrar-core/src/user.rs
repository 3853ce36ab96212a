//! Base identity types.
//!
//! Credentials are compared verbatim, in the clear. This preserves the
//! observable behaviour of the system being modelled; it is a documented
//! weakness, not an endorsement. A hashed scheme would change what
//! `authenticate` accepts and so is out of scope here.

use serde::{Deserialize, Serialize};

/// A username/password identity. The username is the immutable identity;
/// everything else about a principal lives on the role-specific entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub username: String,
  pub password: String,
}

impl User {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
    }
  }

  /// Exact, case-sensitive equality on both fields.
  pub fn authenticate(&self, username: &str, password: &str) -> bool {
    self.username == username && self.password == password
  }
}

/// The system's administrator. Exactly one lives on a `System` at a time;
/// it is ordinary owned state, replaced through an explicit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Administrator {
  pub account: User,
}

impl Administrator {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      account: User::new(username, password),
    }
  }
}
