//! Summary — a per-class attendance record tied to one curricular unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repo::Roster;

/// The kind of class a summary records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
  Theoretical,
  PracticalTheoretical,
  PracticalLab,
}

impl ClassKind {
  /// Short label, as used in listings.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Theoretical => "t",
      Self::PracticalTheoretical => "tp",
      Self::PracticalLab => "pl",
    }
  }
}

/// A class summary. Keyed in the summary repository by title.
///
/// Attendance holds the registration numbers of the students present;
/// `recorded_at` is stamped by the system at creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
  pub title:       String,
  pub kind:        ClassKind,
  /// Free-text body describing the class.
  pub body:        String,
  pub recorded_at: DateTime<Utc>,
  /// Registration numbers of the students marked present.
  pub attendance:  Roster,
  /// Designation of the unit this summary belongs to.
  pub unit:        String,
}

impl Summary {
  pub fn attendance_count(&self) -> usize { self.attendance.len() }

  pub fn was_present(&self, number: &str) -> bool {
    self.attendance.contains(number)
  }
}
