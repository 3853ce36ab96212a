//! The root aggregate: owns every repository, the administrator, and the
//! current session, and orchestrates every cross-repository operation.
//!
//! All entities live in exactly one repository here; everything else refers
//! to them by key. Mutations that must keep several repositories consistent
//! (summary creation, professor removal, team membership) validate all of
//! their inputs before touching any state, so a failed operation leaves the
//! system exactly as it was.
//!
//! Deletion policy: removing a professor scrubs the live references to them
//! (unit teams, lead slots, directorships, staff rosters); removing a
//! student, course, or unit leaves historical and downstream records in
//! place, and lookups simply treat the stale keys as absent.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::course::Course;
use crate::error::{Error, Result};
use crate::professor::Professor;
use crate::repo::{Repository, Roster};
use crate::session::{AdminCap, Role, Session};
use crate::snapshot::{SNAPSHOT_VERSION, Snapshot};
use crate::store::StateStore;
use crate::student::Student;
use crate::summary::{ClassKind, Summary};
use crate::unit::CurricularUnit;
use crate::user::{Administrator, User};

/// The academic-records system. Single-session, synchronous, not safe for
/// concurrent use.
#[derive(Debug, Clone)]
pub struct System {
  administrator: Administrator,
  session:       Option<Session>,
  courses:       Repository<String, Course>,
  units:         Repository<String, CurricularUnit>,
  professors:    Repository<String, Professor>,
  students:      Repository<String, Student>,
  summaries:     Repository<String, Summary>,
  users:         Repository<String, User>,
}

impl Default for System {
  fn default() -> Self { Self::new(Administrator::new("admin", "admin")) }
}

impl System {
  /// A fresh system with the given built-in administrator and empty
  /// repositories. Courses and units iterate sorted by designation; every
  /// other repository is unordered.
  pub fn new(administrator: Administrator) -> Self {
    Self {
      administrator,
      session: None,
      courses: Repository::sorted(),
      units: Repository::sorted(),
      professors: Repository::unordered(),
      students: Repository::unordered(),
      summaries: Repository::unordered(),
      users: Repository::unordered(),
    }
  }

  // ── Read access ───────────────────────────────────────────────────────

  pub fn administrator(&self) -> &Administrator { &self.administrator }

  pub fn session(&self) -> Option<&Session> { self.session.as_ref() }

  pub fn courses(&self) -> &Repository<String, Course> { &self.courses }

  pub fn units(&self) -> &Repository<String, CurricularUnit> { &self.units }

  pub fn professors(&self) -> &Repository<String, Professor> {
    &self.professors
  }

  pub fn students(&self) -> &Repository<String, Student> { &self.students }

  pub fn summaries(&self) -> &Repository<String, Summary> { &self.summaries }

  pub fn users(&self) -> &Repository<String, User> { &self.users }

  pub fn course(&self, designation: &str) -> Option<&Course> {
    self.courses.get(designation)
  }

  pub fn unit(&self, designation: &str) -> Option<&CurricularUnit> {
    self.units.get(designation)
  }

  pub fn professor(&self, username: &str) -> Option<&Professor> {
    self.professors.get(username)
  }

  pub fn student(&self, number: &str) -> Option<&Student> {
    self.students.get(number)
  }

  pub fn summary(&self, title: &str) -> Option<&Summary> {
    self.summaries.get(title)
  }

  // ── Authentication ────────────────────────────────────────────────────

  /// Check credentials against the generic user repository only.
  ///
  /// The administrator and professors are not registered here; they
  /// authenticate through their own paths in [`System::login`].
  pub fn authenticate_user(
    &self,
    username: &str,
    password: &str,
  ) -> Option<&User> {
    self
      .users
      .get(username)
      .filter(|user| user.authenticate(username, password))
  }

  /// Authenticate and open a session.
  ///
  /// Three paths, tried in order: the single administrator instance, the
  /// professor repository, and finally the generic user repository. A
  /// username that matches a professor is settled on that path — a wrong
  /// password there does not fall through to the generic repository.
  pub fn login(&mut self, username: &str, password: &str) -> Result<Session> {
    let role = if self.administrator.account.authenticate(username, password) {
      Role::Administrator
    } else if let Some(professor) = self.professors.get(username) {
      if !professor.account.authenticate(username, password) {
        return Err(Error::InvalidCredentials);
      }
      Role::Professor
    } else if self.authenticate_user(username, password).is_some() {
      if self
        .students
        .values()
        .any(|student| student.account.username == username)
      {
        Role::Student
      } else {
        Role::Member
      }
    } else {
      return Err(Error::InvalidCredentials);
    };

    let session = Session::open(username, role);
    info!(username, ?role, "session opened");
    self.session = Some(session.clone());
    Ok(session)
  }

  /// Close the current session, if any.
  pub fn logout(&mut self) {
    if let Some(session) = self.session.take() {
      info!(username = %session.username, "session closed");
    }
  }

  /// Mint an administrator capability for the current session.
  ///
  /// Fails unless the session exists, belongs to the administrator, and
  /// presents the matching token.
  pub fn admin_capability(&self, token: Uuid) -> Result<AdminCap> {
    match &self.session {
      Some(session)
        if session.role == Role::Administrator && session.token == token =>
      {
        Ok(AdminCap::mint())
      }
      _ => Err(Error::PermissionDenied("administrator session required")),
    }
  }

  /// Swap in a new administrator. Any open administrator session is closed,
  /// since its credentials no longer exist.
  pub fn replace_administrator(
    &mut self,
    _cap: &AdminCap,
    administrator: Administrator,
  ) {
    warn!(
      username = %administrator.account.username,
      "administrator replaced"
    );
    self.administrator = administrator;
    if matches!(&self.session, Some(s) if s.role == Role::Administrator) {
      self.session = None;
    }
  }

  // ── Registration ──────────────────────────────────────────────────────

  /// Insert a professor, keyed by username. Overwrites an existing entry
  /// with the same username.
  pub fn add_professor(&mut self, _cap: &AdminCap, professor: Professor) {
    info!(username = %professor.account.username, "professor added");
    self
      .professors
      .insert(professor.account.username.clone(), professor);
  }

  /// Remove a professor and scrub the live references to them: unit teams,
  /// lead-instructor slots, course directorships, and staff rosters.
  pub fn remove_professor(
    &mut self,
    _cap: &AdminCap,
    username: &str,
  ) -> Result<Professor> {
    let professor = self
      .professors
      .remove(username)
      .ok_or_else(|| Error::ProfessorNotFound(username.into()))?;

    for unit in self.units.values_mut() {
      if unit.lead.as_deref() == Some(username) {
        unit.lead = None;
      }
      unit.team.remove(username);
    }
    for course in self.courses.values_mut() {
      if course.director.as_deref() == Some(username) {
        course.director = None;
      }
      course.staff.remove(username);
    }

    info!(username, "professor removed");
    Ok(professor)
  }

  /// Insert a course, keyed by designation. Overwrites on collision.
  pub fn add_course(&mut self, _cap: &AdminCap, course: Course) {
    info!(designation = %course.designation, "course added");
    self.courses.insert(course.designation.clone(), course);
  }

  /// Remove a course. Its units and students survive; their stale course
  /// keys are treated as absent on later lookups.
  pub fn remove_course(
    &mut self,
    _cap: &AdminCap,
    designation: &str,
  ) -> Result<Course> {
    let course = self
      .courses
      .remove(designation)
      .ok_or_else(|| Error::CourseNotFound(designation.into()))?;
    info!(designation, "course removed");
    Ok(course)
  }

  /// Insert a unit, keyed by designation. When the unit names an owning
  /// course, that course must exist and gains the unit in its roster.
  pub fn add_unit(&mut self, _cap: &AdminCap, unit: CurricularUnit) -> Result<()> {
    if let Some(course) = unit.course.clone() {
      let course = self
        .courses
        .get_mut(course.as_str())
        .ok_or(Error::CourseNotFound(course))?;
      course.units.add(unit.designation.clone());
    }
    info!(designation = %unit.designation, "unit added");
    self.units.insert(unit.designation.clone(), unit);
    Ok(())
  }

  /// Remove a unit. Its summaries and any teaching-load entries naming it
  /// survive as historical records; the owning course's rosters are kept
  /// consistent.
  pub fn remove_unit(
    &mut self,
    _cap: &AdminCap,
    designation: &str,
  ) -> Result<CurricularUnit> {
    let unit = self
      .units
      .remove(designation)
      .ok_or_else(|| Error::UnitNotFound(designation.into()))?;

    if let Some(course) = unit.course.as_deref() {
      if let Some(course_entry) = self.courses.get_mut(course) {
        course_entry.units.remove(designation);
      }
      let team: Vec<String> = unit.team.keys().cloned().collect();
      for username in team {
        self.refresh_course_staff(course, &username);
      }
    }

    info!(designation, "unit removed");
    Ok(unit)
  }

  /// Register a student, keyed by registration number, and register their
  /// account in the generic user repository. An enrolled course, when
  /// named, must exist.
  pub fn register_student(
    &mut self,
    _cap: &AdminCap,
    student: Student,
  ) -> Result<()> {
    if let Some(course) = student.course.clone() {
      let course = self
        .courses
        .get_mut(course.as_str())
        .ok_or(Error::CourseNotFound(course))?;
      course.students.add(student.number.clone());
    }
    self
      .users
      .insert(student.account.username.clone(), student.account.clone());
    info!(number = %student.number, "student registered");
    self.students.insert(student.number.clone(), student);
    Ok(())
  }

  /// Remove a student. Attendance already recorded in summaries is a
  /// historical record and is not retracted.
  pub fn remove_student(
    &mut self,
    _cap: &AdminCap,
    number: &str,
  ) -> Result<Student> {
    let student = self
      .students
      .remove(number)
      .ok_or_else(|| Error::StudentNotFound(number.into()))?;

    if let Some(course) = student.course.as_deref() {
      if let Some(course_entry) = self.courses.get_mut(course) {
        course_entry.students.remove(number);
      }
    }
    self.users.remove(student.account.username.as_str());

    info!(number, "student removed");
    Ok(student)
  }

  /// Enrol an existing student in a course, moving them out of any
  /// previous enrolment.
  pub fn enroll_student(
    &mut self,
    _cap: &AdminCap,
    number: &str,
    designation: &str,
  ) -> Result<()> {
    if !self.students.contains(number) {
      return Err(Error::StudentNotFound(number.into()));
    }
    if !self.courses.contains(designation) {
      return Err(Error::CourseNotFound(designation.into()));
    }

    let previous = self
      .students
      .get(number)
      .and_then(|student| student.course.clone());
    if let Some(previous) = previous {
      if let Some(course) = self.courses.get_mut(previous.as_str()) {
        course.students.remove(number);
      }
    }

    if let Some(course) = self.courses.get_mut(designation) {
      course.students.add(number.to_string());
    }
    if let Some(student) = self.students.get_mut(number) {
      student.course = Some(designation.to_string());
    }
    debug!(number, designation, "student enrolled");
    Ok(())
  }

  /// Register a plain account in the generic user repository.
  pub fn register_user(&mut self, _cap: &AdminCap, user: User) {
    self.users.insert(user.username.clone(), user);
  }

  /// Remove an account from the generic user repository.
  pub fn remove_user(&mut self, _cap: &AdminCap, username: &str) -> Result<User> {
    self
      .users
      .remove(username)
      .ok_or_else(|| Error::UserNotFound(username.into()))
  }

  // ── Assignment ────────────────────────────────────────────────────────

  /// Make a professor the director of a course. Sets the course's director
  /// reference and the professor's advisory flag; a previous director's
  /// flag is left as-is (the flag is explicit, never derived).
  pub fn assign_director(
    &mut self,
    _cap: &AdminCap,
    designation: &str,
    username: &str,
  ) -> Result<()> {
    if !self.professors.contains(username) {
      return Err(Error::ProfessorNotFound(username.into()));
    }
    let course = self
      .courses
      .get_mut(designation)
      .ok_or_else(|| Error::CourseNotFound(designation.into()))?;
    course.assign_director(username);
    if let Some(professor) = self.professors.get_mut(username) {
      professor.course_director = true;
    }
    info!(designation, username, "course director assigned");
    Ok(())
  }

  /// Make a professor the lead instructor of a unit. Both directions of
  /// the reference are kept consistent: the displaced lead, if any, loses
  /// their lead-unit reference. Team membership is not required.
  pub fn assign_lead(
    &mut self,
    _cap: &AdminCap,
    designation: &str,
    username: &str,
  ) -> Result<()> {
    if !self.professors.contains(username) {
      return Err(Error::ProfessorNotFound(username.into()));
    }
    if !self.units.contains(designation) {
      return Err(Error::UnitNotFound(designation.into()));
    }

    let previous = self.units.get(designation).and_then(|u| u.lead.clone());
    if let Some(previous) = previous {
      if let Some(displaced) = self.professors.get_mut(previous.as_str()) {
        if displaced.lead_unit.as_deref() == Some(designation) {
          displaced.lead_unit = None;
        }
      }
    }

    if let Some(unit) = self.units.get_mut(designation) {
      unit.assign_lead(username);
    }
    if let Some(professor) = self.professors.get_mut(username) {
      professor.lead_unit = Some(designation.to_string());
    }
    info!(designation, username, "lead instructor assigned");
    Ok(())
  }

  /// Add a professor to a unit's teaching team and to the owning course's
  /// staff roster. Returns `false` when already a member.
  pub fn add_unit_professor(
    &mut self,
    cap: &AdminCap,
    designation: &str,
    username: &str,
  ) -> Result<bool> {
    if !self.professors.contains(username) {
      return Err(Error::ProfessorNotFound(username.into()));
    }
    let unit = self
      .units
      .get_mut(designation)
      .ok_or_else(|| Error::UnitNotFound(designation.into()))?;
    let added = unit.add_professor(cap, username);
    let course = unit.course.clone();
    if let Some(course) = course {
      if let Some(course_entry) = self.courses.get_mut(course.as_str()) {
        course_entry.staff.add(username.to_string());
      }
    }
    if added {
      debug!(designation, username, "professor joined team");
    }
    Ok(added)
  }

  /// Remove a professor from a unit's teaching team. The course staff
  /// roster keeps the professor only while some other unit of the course
  /// still has them on its team.
  pub fn remove_unit_professor(
    &mut self,
    cap: &AdminCap,
    designation: &str,
    username: &str,
  ) -> Result<bool> {
    let unit = self
      .units
      .get_mut(designation)
      .ok_or_else(|| Error::UnitNotFound(designation.into()))?;
    let removed = unit.remove_professor(cap, username);
    let course = unit.course.clone();
    if removed {
      if let Some(course) = course {
        self.refresh_course_staff(course.as_str(), username);
      }
      debug!(designation, username, "professor left team");
    }
    Ok(removed)
  }

  /// Put a unit on a professor's teaching load. Load and team membership
  /// are tracked separately; see [`System::units_taught_by`].
  pub fn assign_teaching(
    &mut self,
    _cap: &AdminCap,
    username: &str,
    designation: &str,
  ) -> Result<bool> {
    if !self.units.contains(designation) {
      return Err(Error::UnitNotFound(designation.into()));
    }
    let professor = self
      .professors
      .get_mut(username)
      .ok_or_else(|| Error::ProfessorNotFound(username.into()))?;
    Ok(professor.teaching_load.add(designation.to_string()))
  }

  /// Take a unit off a professor's teaching load.
  pub fn withdraw_teaching(
    &mut self,
    _cap: &AdminCap,
    username: &str,
    designation: &str,
  ) -> Result<bool> {
    let professor = self
      .professors
      .get_mut(username)
      .ok_or_else(|| Error::ProfessorNotFound(username.into()))?;
    Ok(professor.teaching_load.remove(designation).is_some())
  }

  /// Drop `username` from the course's staff roster unless some unit of
  /// the course still has them on its team.
  fn refresh_course_staff(&mut self, course: &str, username: &str) {
    let still_teaching = match self.courses.get(course) {
      Some(course_entry) => course_entry.units.keys().any(|unit| {
        self
          .units
          .get(unit.as_str())
          .is_some_and(|u| u.has_professor(username))
      }),
      None => return,
    };
    if !still_teaching {
      if let Some(course_entry) = self.courses.get_mut(course) {
        course_entry.staff.remove(username);
      }
    }
  }

  // ── Summaries ─────────────────────────────────────────────────────────

  /// Record a class summary for a unit on the professor's teaching load.
  ///
  /// The one operation that touches four collections: the summary
  /// repository, the unit's summary roster, and each present student's
  /// attendance record. Every input is validated before anything is
  /// written, so a failure inserts nothing anywhere. Duplicate entries in
  /// `present` count once.
  pub fn create_summary(
    &mut self,
    professor: &str,
    designation: &str,
    title: impl Into<String>,
    kind: ClassKind,
    body: impl Into<String>,
    present: &[&str],
  ) -> Result<&Summary> {
    let title: String = title.into();

    let teaches = self
      .professors
      .get(professor)
      .ok_or_else(|| Error::ProfessorNotFound(professor.into()))?
      .teaches(designation);
    if !teaches {
      return Err(Error::NotOnTeachingLoad {
        professor: professor.into(),
        unit: designation.into(),
      });
    }
    if !self.units.contains(designation) {
      return Err(Error::UnitNotFound(designation.into()));
    }
    for number in present {
      if !self.students.contains(*number) {
        return Err(Error::StudentNotFound((*number).into()));
      }
    }

    let mut attendance = Roster::unordered();
    let mut marked: Vec<&str> = Vec::new();
    for number in present {
      if attendance.add((*number).to_string()) {
        marked.push(*number);
      }
    }

    for number in &marked {
      if let Some(student) = self.students.get_mut(*number) {
        student.record_attendance(title.clone());
      }
    }
    if let Some(unit) = self.units.get_mut(designation) {
      unit.summaries.add(title.clone());
    }

    let summary = Summary {
      title: title.clone(),
      kind,
      body: body.into(),
      recorded_at: Utc::now(),
      attendance,
      unit: designation.to_string(),
    };
    info!(
      professor,
      unit = designation,
      title = %title,
      present = marked.len(),
      "summary recorded"
    );
    self.summaries.insert(title.clone(), summary);
    self
      .summaries
      .get(title.as_str())
      .ok_or(Error::SummaryNotFound(title))
  }

  /// Remove a summary. Attendance entries pointing at it remain in student
  /// records as history.
  pub fn remove_summary(
    &mut self,
    _cap: &AdminCap,
    title: &str,
  ) -> Result<Summary> {
    let summary = self
      .summaries
      .remove(title)
      .ok_or_else(|| Error::SummaryNotFound(title.into()))?;
    if let Some(unit) = self.units.get_mut(summary.unit.as_str()) {
      unit.summaries.remove(title);
    }
    info!(title, "summary removed");
    Ok(summary)
  }

  // ── Queries ───────────────────────────────────────────────────────────

  /// Units genuinely taught by a professor: on their teaching load *and*
  /// counting them among the unit's team. A linear scan of the load, not
  /// an index.
  pub fn units_taught_by(&self, username: &str) -> Result<Vec<&CurricularUnit>> {
    let professor = self
      .professors
      .get(username)
      .ok_or_else(|| Error::ProfessorNotFound(username.into()))?;
    Ok(
      professor
        .teaching_load
        .keys()
        .filter_map(|designation| self.units.get(designation.as_str()))
        .filter(|unit| unit.has_professor(username))
        .collect(),
    )
  }

  /// Students of a unit, resolved through its owning course. Empty when
  /// the unit has no course or the course is gone.
  pub fn unit_students(&self, designation: &str) -> Result<Vec<&Student>> {
    let unit = self
      .units
      .get(designation)
      .ok_or_else(|| Error::UnitNotFound(designation.into()))?;
    let Some(course) = unit.course.as_deref().and_then(|c| self.courses.get(c))
    else {
      return Ok(Vec::new());
    };
    Ok(
      course
        .students
        .keys()
        .filter_map(|number| self.students.get(number.as_str()))
        .collect(),
    )
  }

  /// The course-scoped professor count (the course's own staff roster,
  /// not a union over unit teams).
  pub fn course_professor_count(&self, designation: &str) -> Result<usize> {
    self
      .courses
      .get(designation)
      .map(Course::professor_count)
      .ok_or_else(|| Error::CourseNotFound(designation.into()))
  }

  // ── Persistence ───────────────────────────────────────────────────────

  /// Capture the full persistable state. The session is not part of it.
  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      version: SNAPSHOT_VERSION,
      taken_at: Utc::now(),
      administrator: self.administrator.clone(),
      courses: self.courses.clone(),
      units: self.units.clone(),
      professors: self.professors.clone(),
      students: self.students.clone(),
      summaries: self.summaries.clone(),
      users: self.users.clone(),
    }
  }

  /// Rebuild a system from a snapshot. The restored system starts logged
  /// out. Unknown schema versions are rejected.
  pub fn restore(snapshot: Snapshot) -> Result<Self> {
    if snapshot.version != SNAPSHOT_VERSION {
      return Err(Error::UnsupportedSnapshotVersion(snapshot.version));
    }
    Ok(Self {
      administrator: snapshot.administrator,
      session: None,
      courses: snapshot.courses,
      units: snapshot.units,
      professors: snapshot.professors,
      students: snapshot.students,
      summaries: snapshot.summaries,
      users: snapshot.users,
    })
  }

  /// Persist the current state through a [`StateStore`]. Store failures
  /// surface as [`Error::Store`].
  pub fn save_state<S: StateStore>(&self, store: &S) -> Result<()> {
    debug!("saving system state");
    store
      .save(&self.snapshot())
      .map_err(|e| Error::Store(Box::new(e)))
  }

  /// Load a previously saved state through a [`StateStore`].
  pub fn load_state<S: StateStore>(store: &S) -> Result<Self> {
    debug!("loading system state");
    let snapshot = store.load().map_err(|e| Error::Store(Box::new(e)))?;
    Self::restore(snapshot)
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::snapshot::DanglingReference;

  fn professor(username: &str, number: &str) -> Professor {
    Professor::new(
      User::new(username, "pw"),
      "Some Professor",
      number,
      NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
    )
  }

  fn student(username: &str, number: &str) -> Student {
    Student::new(User::new(username, "pw"), "Some Student", number)
  }

  /// A system with an open administrator session and a minted capability.
  fn admin_system() -> (System, AdminCap) {
    let mut sys = System::default();
    let session = sys.login("admin", "admin").unwrap();
    let cap = sys.admin_capability(session.token).unwrap();
    (sys, cap)
  }

  /// Course "Informatics" with unit "CS101"; prof1 teaches CS101 (load and
  /// team); students a100, a200, a300 enrolled.
  fn seeded() -> (System, AdminCap) {
    let (mut sys, cap) = admin_system();

    sys.add_course(&cap, Course::new("Informatics"));
    let mut unit = CurricularUnit::new("CS101");
    unit.course = Some("Informatics".into());
    sys.add_unit(&cap, unit).unwrap();

    sys.add_professor(&cap, professor("prof1", "p7"));
    sys.add_unit_professor(&cap, "CS101", "prof1").unwrap();
    sys.assign_teaching(&cap, "prof1", "CS101").unwrap();

    for (username, number) in [("ana", "a100"), ("bruno", "a200"), ("carla", "a300")] {
      sys.register_student(&cap, student(username, number)).unwrap();
      sys.enroll_student(&cap, number, "Informatics").unwrap();
    }

    (sys, cap)
  }

  // ── Authentication ────────────────────────────────────────────────────

  #[test]
  fn admin_login_path() {
    let mut sys = System::default();
    let session = sys.login("admin", "admin").unwrap();
    assert_eq!(session.role, Role::Administrator);
    assert_eq!(sys.session().unwrap().username, "admin");
  }

  #[test]
  fn professor_login_bypasses_generic_repository() {
    let (mut sys, cap) = admin_system();
    sys.add_professor(&cap, professor("prof1", "p7"));
    assert!(sys.users().get("prof1").is_none());

    let session = sys.login("prof1", "pw").unwrap();
    assert_eq!(session.role, Role::Professor);
  }

  #[test]
  fn wrong_professor_password_does_not_fall_through() {
    let (mut sys, cap) = admin_system();
    sys.add_professor(&cap, professor("prof1", "p7"));
    sys.register_user(&cap, User::new("prof1", "other"));

    assert!(matches!(
      sys.login("prof1", "other"),
      Err(Error::InvalidCredentials)
    ));
  }

  #[test]
  fn generic_login_distinguishes_students_from_members() {
    let (mut sys, cap) = admin_system();
    sys.register_student(&cap, student("ana", "a100")).unwrap();
    sys.register_user(&cap, User::new("guest", "gw"));

    assert_eq!(sys.login("ana", "pw").unwrap().role, Role::Student);
    assert_eq!(sys.login("guest", "gw").unwrap().role, Role::Member);
  }

  #[test]
  fn login_is_exact_match() {
    let mut sys = System::default();
    assert!(matches!(
      sys.login("admin", "Admin"),
      Err(Error::InvalidCredentials)
    ));
    assert!(matches!(
      sys.login("Admin", "admin"),
      Err(Error::InvalidCredentials)
    ));
    assert!(sys.session().is_none());
  }

  #[test]
  fn capability_requires_admin_session_and_token() {
    let (mut sys, cap) = admin_system();
    sys.add_professor(&cap, professor("prof1", "p7"));

    // Stale token.
    assert!(matches!(
      sys.admin_capability(Uuid::new_v4()),
      Err(Error::PermissionDenied(_))
    ));

    // Professor sessions cannot mint the capability at all.
    let session = sys.login("prof1", "pw").unwrap();
    assert!(matches!(
      sys.admin_capability(session.token),
      Err(Error::PermissionDenied(_))
    ));
  }

  #[test]
  fn replacing_the_administrator_closes_their_session() {
    let (mut sys, cap) = admin_system();
    sys.replace_administrator(&cap, Administrator::new("root", "rootpw"));

    assert!(sys.session().is_none());
    assert!(matches!(
      sys.login("admin", "admin"),
      Err(Error::InvalidCredentials)
    ));
    assert_eq!(sys.login("root", "rootpw").unwrap().role, Role::Administrator);
  }

  // ── Summaries ─────────────────────────────────────────────────────────

  #[test]
  fn summary_records_present_students_only() {
    let (mut sys, _cap) = seeded();

    sys
      .create_summary(
        "prof1",
        "CS101",
        "Lecture 1",
        ClassKind::Theoretical,
        "Introduction.",
        &["a100", "a300"],
      )
      .unwrap();

    let summary = sys.summary("Lecture 1").unwrap();
    assert_eq!(summary.unit, "CS101");
    assert_eq!(summary.attendance_count(), 2);
    assert!(summary.was_present("a100"));
    assert!(!summary.was_present("a200"));

    assert_eq!(sys.student("a100").unwrap().attendance, ["Lecture 1"]);
    assert_eq!(sys.student("a300").unwrap().attendance, ["Lecture 1"]);
    assert!(sys.student("a200").unwrap().attendance.is_empty());
    assert!(sys.unit("CS101").unwrap().has_summary("Lecture 1"));
  }

  #[test]
  fn summary_for_untaught_unit_inserts_nothing() {
    let (mut sys, cap) = seeded();
    sys.add_professor(&cap, professor("prof2", "p8"));

    let err = sys
      .create_summary(
        "prof2",
        "CS101",
        "Lecture 1",
        ClassKind::Theoretical,
        "Should not exist.",
        &["a100"],
      )
      .unwrap_err();

    assert!(matches!(err, Error::NotOnTeachingLoad { .. }));
    assert!(sys.summaries().is_empty());
    assert!(sys.student("a100").unwrap().attendance.is_empty());
  }

  #[test]
  fn summary_with_unknown_student_inserts_nothing() {
    let (mut sys, _cap) = seeded();

    let err = sys
      .create_summary(
        "prof1",
        "CS101",
        "Lecture 1",
        ClassKind::PracticalLab,
        "Should not exist.",
        &["a100", "a999"],
      )
      .unwrap_err();

    assert!(matches!(err, Error::StudentNotFound(n) if n == "a999"));
    assert!(sys.summaries().is_empty());
    assert!(sys.student("a100").unwrap().attendance.is_empty());
    assert!(!sys.unit("CS101").unwrap().has_summary("Lecture 1"));
  }

  #[test]
  fn duplicate_present_entries_count_once() {
    let (mut sys, _cap) = seeded();

    sys
      .create_summary(
        "prof1",
        "CS101",
        "Lecture 1",
        ClassKind::PracticalTheoretical,
        "Repetition.",
        &["a100", "a100"],
      )
      .unwrap();

    assert_eq!(sys.summary("Lecture 1").unwrap().attendance_count(), 1);
    assert_eq!(sys.student("a100").unwrap().attendance_count(), 1);
  }

  #[test]
  fn removing_a_summary_keeps_attendance_history() {
    let (mut sys, cap) = seeded();
    sys
      .create_summary(
        "prof1",
        "CS101",
        "Lecture 1",
        ClassKind::Theoretical,
        "History.",
        &["a100"],
      )
      .unwrap();

    sys.remove_summary(&cap, "Lecture 1").unwrap();
    assert!(sys.summary("Lecture 1").is_none());
    assert!(!sys.unit("CS101").unwrap().has_summary("Lecture 1"));
    assert_eq!(sys.student("a100").unwrap().attendance, ["Lecture 1"]);
  }

  // ── Removal policy ────────────────────────────────────────────────────

  #[test]
  fn removing_a_professor_scrubs_live_references() {
    let (mut sys, cap) = seeded();
    sys.assign_lead(&cap, "CS101", "prof1").unwrap();
    sys.assign_director(&cap, "Informatics", "prof1").unwrap();
    assert!(sys.professor("prof1").unwrap().is_course_director());
    assert!(sys.professor("prof1").unwrap().is_lead_instructor());

    sys.remove_professor(&cap, "prof1").unwrap();

    let unit = sys.unit("CS101").unwrap();
    assert!(unit.lead.is_none());
    assert!(!unit.has_professor("prof1"));
    let course = sys.course("Informatics").unwrap();
    assert!(course.director.is_none());
    assert_eq!(course.professor_count(), 0);
  }

  #[test]
  fn removing_a_missing_professor_reports_not_found() {
    let (mut sys, cap) = admin_system();
    assert!(matches!(
      sys.remove_professor(&cap, "ghost"),
      Err(Error::ProfessorNotFound(_))
    ));
  }

  #[test]
  fn removing_a_student_keeps_recorded_attendance() {
    let (mut sys, cap) = seeded();
    sys
      .create_summary(
        "prof1",
        "CS101",
        "Lecture 1",
        ClassKind::Theoretical,
        "Before removal.",
        &["a100"],
      )
      .unwrap();

    sys.remove_student(&cap, "a100").unwrap();

    assert!(sys.student("a100").is_none());
    assert!(sys.users().get("ana").is_none());
    assert!(!sys.course("Informatics").unwrap().has_student("a100"));
    // The summary still records the presence.
    assert!(sys.summary("Lecture 1").unwrap().was_present("a100"));
  }

  #[test]
  fn removing_a_course_leaves_its_units() {
    let (mut sys, cap) = seeded();
    sys.remove_course(&cap, "Informatics").unwrap();

    assert!(sys.course("Informatics").is_none());
    assert!(sys.unit("CS101").is_some());
    // The stale course key resolves to no students.
    assert!(sys.unit_students("CS101").unwrap().is_empty());
  }

  // ── Teaching relationships ────────────────────────────────────────────

  #[test]
  fn units_taught_requires_load_and_team_agreement() {
    let (mut sys, cap) = seeded();
    let mut cs102 = CurricularUnit::new("CS102");
    cs102.course = Some("Informatics".into());
    sys.add_unit(&cap, cs102).unwrap();
    // On the load but not on the team.
    sys.assign_teaching(&cap, "prof1", "CS102").unwrap();

    let taught = sys.units_taught_by("prof1").unwrap();
    assert_eq!(taught.len(), 1);
    assert_eq!(taught[0].designation, "CS101");
  }

  #[test]
  fn staff_roster_follows_team_membership_across_units() {
    let (mut sys, cap) = seeded();
    let mut cs102 = CurricularUnit::new("CS102");
    cs102.course = Some("Informatics".into());
    sys.add_unit(&cap, cs102).unwrap();
    sys.add_unit_professor(&cap, "CS102", "prof1").unwrap();

    assert_eq!(sys.course_professor_count("Informatics").unwrap(), 1);

    // Still teaching CS102, so still on the course staff.
    sys.remove_unit_professor(&cap, "CS101", "prof1").unwrap();
    assert_eq!(sys.course_professor_count("Informatics").unwrap(), 1);

    sys.remove_unit_professor(&cap, "CS102", "prof1").unwrap();
    assert_eq!(sys.course_professor_count("Informatics").unwrap(), 0);
  }

  #[test]
  fn lead_reassignment_clears_the_displaced_professor() {
    let (mut sys, cap) = seeded();
    sys.add_professor(&cap, professor("prof2", "p8"));
    sys.assign_lead(&cap, "CS101", "prof1").unwrap();
    sys.assign_lead(&cap, "CS101", "prof2").unwrap();

    assert!(!sys.professor("prof1").unwrap().is_lead_instructor());
    assert!(sys.professor("prof2").unwrap().is_lead_instructor());
    assert_eq!(sys.unit("CS101").unwrap().lead.as_deref(), Some("prof2"));
  }

  #[test]
  fn team_listing_requires_the_capability() {
    let (sys, cap) = seeded();
    let unit = sys.unit("CS101").unwrap();
    let team: Vec<&str> = unit.list_professors(&cap).collect();
    assert_eq!(team, ["prof1"]);
    assert_eq!(unit.team_size(), 1);
  }

  #[test]
  fn logout_clears_the_session() {
    let mut sys = System::default();
    sys.login("admin", "admin").unwrap();
    sys.logout();
    assert!(sys.session().is_none());
    // No session, no capability.
    assert!(sys.admin_capability(Uuid::new_v4()).is_err());
  }

  #[test]
  fn removing_a_generic_user_is_existence_checked() {
    let (mut sys, cap) = admin_system();
    sys.register_user(&cap, User::new("guest", "gw"));
    assert!(sys.remove_user(&cap, "guest").is_ok());
    assert!(matches!(
      sys.remove_user(&cap, "guest"),
      Err(Error::UserNotFound(_))
    ));
  }

  #[test]
  fn reenrolment_moves_roster_membership() {
    let (mut sys, cap) = seeded();
    sys.add_course(&cap, Course::new("Mathematics"));

    sys.enroll_student(&cap, "a100", "Mathematics").unwrap();

    assert!(!sys.course("Informatics").unwrap().has_student("a100"));
    assert!(sys.course("Mathematics").unwrap().has_student("a100"));
    assert_eq!(
      sys.student("a100").unwrap().course.as_deref(),
      Some("Mathematics")
    );
  }

  #[test]
  fn unit_without_a_course_has_no_students() {
    let (mut sys, cap) = seeded();
    sys.add_unit(&cap, CurricularUnit::new("Orphan")).unwrap();
    assert!(sys.unit_students("Orphan").unwrap().is_empty());
  }

  #[test]
  fn course_listing_is_sorted_by_designation() {
    let (mut sys, cap) = admin_system();
    for designation in ["Physics", "Arts", "Mathematics"] {
      sys.add_course(&cap, Course::new(designation));
    }
    let listed: Vec<&String> = sys.courses().keys().collect();
    assert_eq!(listed, ["Arts", "Mathematics", "Physics"]);
  }

  // ── Snapshots ─────────────────────────────────────────────────────────

  #[test]
  fn snapshot_round_trip_preserves_the_graph() {
    let (mut sys, _cap) = seeded();
    sys
      .create_summary(
        "prof1",
        "CS101",
        "Lecture 1",
        ClassKind::Theoretical,
        "Round trip.",
        &["a100", "a300"],
      )
      .unwrap();

    let restored = System::restore(sys.snapshot()).unwrap();

    assert!(restored.session().is_none());
    assert_eq!(restored.courses(), sys.courses());
    assert_eq!(restored.units(), sys.units());
    assert_eq!(restored.professors(), sys.professors());
    assert_eq!(restored.students(), sys.students());
    assert_eq!(restored.summaries(), sys.summaries());

    // Cross-references resolve against the reconstructed entities.
    let unit = restored.unit("CS101").unwrap();
    assert!(unit.has_professor("prof1"));
    let students = restored.unit_students("CS101").unwrap();
    assert_eq!(students.len(), 3);
    assert!(restored.summary("Lecture 1").unwrap().was_present("a300"));
  }

  #[test]
  fn unknown_snapshot_version_is_rejected() {
    let (sys, _cap) = seeded();
    let mut snapshot = sys.snapshot();
    snapshot.version = 99;
    assert!(matches!(
      System::restore(snapshot),
      Err(Error::UnsupportedSnapshotVersion(99))
    ));
  }

  #[test]
  fn dangling_reference_audit_finds_stale_keys() {
    let (mut sys, cap) = seeded();
    sys.assign_lead(&cap, "CS101", "prof1").unwrap();
    let mut snapshot = sys.snapshot();

    // Simulate a pre-scrub-era snapshot with a removed professor.
    snapshot.professors.remove("prof1");
    let dangling = snapshot.dangling_references();

    assert!(dangling.contains(&DanglingReference::UnitLead {
      unit: "CS101".into(),
      professor: "prof1".into(),
    }));
    assert!(dangling.contains(&DanglingReference::TeamMember {
      unit: "CS101".into(),
      professor: "prof1".into(),
    }));
  }
}
