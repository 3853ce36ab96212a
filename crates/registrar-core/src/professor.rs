//! Professor — teaching staff with a load of curricular units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repo::Roster;
use crate::user::User;

/// A professor. Keyed by username everywhere — in the professor repository
/// and in unit teams alike.
///
/// The teaching load is the professor's own record of assigned units; it is
/// distinct from unit team membership, which is the unit's record. A
/// professor genuinely teaches a unit only when both agree (see
/// `System::units_taught_by`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professor {
  pub account:         User,
  pub name:            String,
  /// Registration number; informational, not a repository key.
  pub number:          String,
  pub started_on:      NaiveDate,
  /// Designations of units on this professor's teaching load, sorted.
  pub teaching_load:   Roster,
  /// Designation of the unit this professor leads, if any.
  pub lead_unit:       Option<String>,
  /// Advisory flag; set by director assignment, never derived.
  pub course_director: bool,
}

impl Professor {
  pub fn new(
    account: User,
    name: impl Into<String>,
    number: impl Into<String>,
    started_on: NaiveDate,
  ) -> Self {
    Self {
      account,
      name: name.into(),
      number: number.into(),
      started_on,
      teaching_load: Roster::sorted(),
      lead_unit: None,
      course_director: false,
    }
  }

  /// Whether `unit` is on this professor's teaching load.
  pub fn teaches(&self, unit: &str) -> bool {
    self.teaching_load.contains(unit)
  }

  /// Lead instructor iff a lead unit is set.
  pub fn is_lead_instructor(&self) -> bool { self.lead_unit.is_some() }

  pub fn is_course_director(&self) -> bool { self.course_director }
}
