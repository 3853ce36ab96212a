//! Course — a degree programme owning enrolment and its units.

use serde::{Deserialize, Serialize};

use crate::repo::Roster;

/// A course. Keyed in the (sorted) course repository by designation.
///
/// `staff` is the course's own professor roster, maintained by the system
/// as professors join or leave the teams of this course's units. It backs
/// `professor_count`, which is therefore scoped to the course and not a
/// query over unit teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
  pub designation: String,
  /// Username of the course director, if assigned.
  pub director:    Option<String>,
  /// Registration numbers of enrolled students.
  pub students:    Roster,
  /// Designations of the units belonging to this course, sorted.
  pub units:       Roster,
  /// Usernames of professors teaching on this course.
  pub staff:       Roster,
}

impl Course {
  pub fn new(designation: impl Into<String>) -> Self {
    Self {
      designation: designation.into(),
      director: None,
      students: Roster::unordered(),
      units: Roster::sorted(),
      staff: Roster::unordered(),
    }
  }

  /// Enrol a student by registration number. Returns `false` when the
  /// student was already enrolled.
  pub fn add_student(&mut self, number: impl Into<String>) -> bool {
    self.students.add(number.into())
  }

  /// Remove a student from the enrolment roster. Returns `false` when the
  /// student was not enrolled.
  pub fn remove_student(&mut self, number: &str) -> bool {
    self.students.remove(number).is_some()
  }

  pub fn has_student(&self, number: &str) -> bool {
    self.students.contains(number)
  }

  /// Unconditional reference assignment; membership of the professor in
  /// this course is not validated here.
  pub fn assign_director(&mut self, username: impl Into<String>) {
    self.director = Some(username.into());
  }

  pub fn student_count(&self) -> usize { self.students.len() }

  pub fn professor_count(&self) -> usize { self.staff.len() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn enrolment_is_existence_checked() {
    let mut course = Course::new("Informatics");
    assert!(course.add_student("a100"));
    assert!(!course.add_student("a100"));
    assert_eq!(course.student_count(), 1);

    assert!(course.remove_student("a100"));
    assert!(!course.remove_student("a100"));
    assert_eq!(course.student_count(), 0);
  }

  #[test]
  fn director_assignment_is_unconditional() {
    let mut course = Course::new("Informatics");
    course.assign_director("prof1");
    course.assign_director("prof2");
    assert_eq!(course.director.as_deref(), Some("prof2"));
  }
}
