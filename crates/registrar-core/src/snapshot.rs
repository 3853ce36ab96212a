//! Versioned snapshots of the full system state.
//!
//! A snapshot is an explicit schema, not an opaque dump of live objects:
//! every entity is stored once in its repository and every relationship is
//! a key (username, registration number, designation, title). Adding fields
//! later means bumping [`SNAPSHOT_VERSION`] and handling the old shape
//! deliberately instead of breaking by accident.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::course::Course;
use crate::professor::Professor;
use crate::repo::Repository;
use crate::student::Student;
use crate::summary::Summary;
use crate::unit::CurricularUnit;
use crate::user::{Administrator, User};

/// Current snapshot schema version. `System::restore` rejects anything else.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The complete persistable state of a system. Sessions are deliberately
/// absent: a restored system always starts logged out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub version:       u32,
  pub taken_at:      DateTime<Utc>,
  pub administrator: Administrator,
  pub courses:       Repository<String, Course>,
  pub units:         Repository<String, CurricularUnit>,
  pub professors:    Repository<String, Professor>,
  pub students:      Repository<String, Student>,
  pub summaries:     Repository<String, Summary>,
  pub users:         Repository<String, User>,
}

// ─── Referential consistency ─────────────────────────────────────────────────

/// A cross-reference that does not resolve to a stored entity.
///
/// Dangling references are tolerated at runtime (lookups treat them as
/// absent) but a snapshot can be audited for them before or after a save.
/// Attendance entries are historical records and are not audited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingReference {
  StudentCourse { number: String, course: String },
  CourseDirector { course: String, professor: String },
  UnitCourse { unit: String, course: String },
  UnitLead { unit: String, professor: String },
  TeamMember { unit: String, professor: String },
  LoadUnit { professor: String, unit: String },
  SummaryUnit { title: String, unit: String },
}

impl Snapshot {
  /// Scan every key-based cross-reference and report the ones that no
  /// longer resolve.
  pub fn dangling_references(&self) -> Vec<DanglingReference> {
    let mut found = Vec::new();

    for (number, student) in self.students.iter() {
      if let Some(course) = &student.course {
        if !self.courses.contains(course.as_str()) {
          found.push(DanglingReference::StudentCourse {
            number: number.clone(),
            course: course.clone(),
          });
        }
      }
    }

    for (designation, course) in self.courses.iter() {
      if let Some(professor) = &course.director {
        if !self.professors.contains(professor.as_str()) {
          found.push(DanglingReference::CourseDirector {
            course: designation.clone(),
            professor: professor.clone(),
          });
        }
      }
    }

    for (designation, unit) in self.units.iter() {
      if let Some(course) = &unit.course {
        if !self.courses.contains(course.as_str()) {
          found.push(DanglingReference::UnitCourse {
            unit: designation.clone(),
            course: course.clone(),
          });
        }
      }
      if let Some(professor) = &unit.lead {
        if !self.professors.contains(professor.as_str()) {
          found.push(DanglingReference::UnitLead {
            unit: designation.clone(),
            professor: professor.clone(),
          });
        }
      }
      for professor in unit.team.keys() {
        if !self.professors.contains(professor.as_str()) {
          found.push(DanglingReference::TeamMember {
            unit: designation.clone(),
            professor: professor.clone(),
          });
        }
      }
    }

    for (username, professor) in self.professors.iter() {
      for unit in professor.teaching_load.keys() {
        if !self.units.contains(unit.as_str()) {
          found.push(DanglingReference::LoadUnit {
            professor: username.clone(),
            unit: unit.clone(),
          });
        }
      }
    }

    for (title, summary) in self.summaries.iter() {
      if !self.units.contains(summary.unit.as_str()) {
        found.push(DanglingReference::SummaryUnit {
          title: title.clone(),
          unit: summary.unit.clone(),
        });
      }
    }

    found
  }
}
