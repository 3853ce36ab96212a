//! Curricular unit (UC) — a taught subject within a course.

use serde::{Deserialize, Serialize};

use crate::repo::Roster;
use crate::session::AdminCap;

/// A curricular unit. Keyed in the (sorted) unit repository by designation.
///
/// Team membership is keyed by professor username, the same identifier used
/// by the professor repository. Team mutations require an [`AdminCap`]:
/// possession of the proof, not the non-nullness of some reference, is what
/// grants access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurricularUnit {
  pub designation: String,
  /// Username of the lead instructor, if assigned.
  pub lead:        Option<String>,
  /// Usernames of the teaching team.
  pub team:        Roster,
  /// Titles of the summaries recorded for this unit.
  pub summaries:   Roster,
  /// Designation of the owning course; `None` for an orphaned unit.
  pub course:      Option<String>,
}

impl CurricularUnit {
  pub fn new(designation: impl Into<String>) -> Self {
    Self {
      designation: designation.into(),
      lead: None,
      team: Roster::unordered(),
      summaries: Roster::unordered(),
      course: None,
    }
  }

  /// Add a professor to the teaching team. Returns `false` when already a
  /// member.
  pub fn add_professor(&mut self, _cap: &AdminCap, username: impl Into<String>) -> bool {
    self.team.add(username.into())
  }

  /// Remove a professor from the teaching team. Returns `false` when not a
  /// member.
  pub fn remove_professor(&mut self, _cap: &AdminCap, username: &str) -> bool {
    self.team.remove(username).is_some()
  }

  /// Usernames of the teaching team.
  pub fn list_professors<'a>(
    &'a self,
    _cap: &AdminCap,
  ) -> impl Iterator<Item = &'a str> + use<'a> {
    self.team.keys().map(String::as_str)
  }

  pub fn has_professor(&self, username: &str) -> bool {
    self.team.contains(username)
  }

  /// Unconditional lead assignment; team membership is not validated.
  pub fn assign_lead(&mut self, username: impl Into<String>) {
    self.lead = Some(username.into());
  }

  pub fn has_summary(&self, title: &str) -> bool {
    self.summaries.contains(title)
  }

  pub fn team_size(&self) -> usize { self.team.len() }
}
