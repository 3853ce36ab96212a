//! Student — an enrolled learner with a personal attendance record.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// A student. Keyed in the student repository by registration number, which
/// is what makes registration numbers unique system-wide.
///
/// Cross-references are held by key: `course` names a course designation,
/// `attendance` names summary titles. Attendance is a historical record —
/// entries survive the removal of the summary's unit or even the student's
/// own course, and are only ever appended by summary creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
  pub account:    User,
  pub name:       String,
  /// Registration number, the repository key.
  pub number:     String,
  /// Designation of the enrolled course; `None` until enrolled.
  pub course:     Option<String>,
  /// Titles of the summaries this student was marked present in, in
  /// recording order.
  pub attendance: Vec<String>,
}

impl Student {
  pub fn new(
    account: User,
    name: impl Into<String>,
    number: impl Into<String>,
  ) -> Self {
    Self {
      account,
      name: name.into(),
      number: number.into(),
      course: None,
      attendance: Vec::new(),
    }
  }

  /// Append a summary title to the personal attendance record.
  pub fn record_attendance(&mut self, title: impl Into<String>) {
    self.attendance.push(title.into());
  }

  pub fn attendance_count(&self) -> usize { self.attendance.len() }
}
