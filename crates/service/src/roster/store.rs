use crate::errors::ServiceError;

use super::model::{AttendanceStatus, Student, StudentId, Subject, SubjectId};

/// Id assignment strategy for subjects and students.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Next id is the current collection length + 1. After a delete this can
    /// hand out an id that is still in use.
    #[default]
    Sequence,
    /// Per-collection counter that only grows, so ids are never reused.
    Counter,
}

/// In-memory owner of every subject and, through them, every student.
///
/// Lookups are linear scans by id; when ids collide (possible under
/// [`IdPolicy::Sequence`]) the first match in insertion order wins, and
/// deletes remove every match.
#[derive(Debug, Default)]
pub struct RosterStore {
    subjects: Vec<Subject>,
    policy: IdPolicy,
    last_subject_id: SubjectId,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: IdPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn list_subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn get_subject(&self, id: SubjectId) -> Result<&Subject, ServiceError> {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::not_found("subject"))
    }

    fn subject_mut(&mut self, id: SubjectId) -> Result<&mut Subject, ServiceError> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::not_found("subject"))
    }

    /// Append a subject with no students. `None` and `""` are rejected.
    pub fn add_subject(&mut self, name: Option<&str>) -> Result<Subject, ServiceError> {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => return Err(ServiceError::invalid_input("subject name required")),
        };
        let id = match self.policy {
            IdPolicy::Sequence => self.subjects.len() as SubjectId + 1,
            IdPolicy::Counter => {
                self.last_subject_id += 1;
                self.last_subject_id
            }
        };
        let subject = Subject::new(id, name);
        self.subjects.push(subject.clone());
        Ok(subject)
    }

    /// Remove the subject and all of its students. Returns whether anything
    /// was removed; a missing id is not an error.
    pub fn delete_subject(&mut self, id: SubjectId) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        self.subjects.len() != before
    }

    /// Enroll a student with status `Absent`. The name is stored as given,
    /// empty included.
    pub fn add_student(&mut self, subject_id: SubjectId, name: &str) -> Result<Student, ServiceError> {
        let policy = self.policy;
        let subject = self.subject_mut(subject_id)?;
        let id = match policy {
            IdPolicy::Sequence => subject.students.len() as StudentId + 1,
            IdPolicy::Counter => {
                subject.last_student_id += 1;
                subject.last_student_id
            }
        };
        let student = Student::new(id, name);
        subject.students.push(student.clone());
        Ok(student)
    }

    /// Remove a student from an existing subject. Returns whether anything was
    /// removed; only a missing subject is an error.
    pub fn delete_student(
        &mut self,
        subject_id: SubjectId,
        student_id: StudentId,
    ) -> Result<bool, ServiceError> {
        let subject = self.subject_mut(subject_id)?;
        let before = subject.students.len();
        subject.students.retain(|st| st.id != student_id);
        Ok(subject.students.len() != before)
    }

    /// Overwrite a student's status with whatever text was supplied.
    ///
    /// Subject and student existence are checked before the status itself, so
    /// a lookup failure wins over a missing status.
    pub fn set_attendance(
        &mut self,
        subject_id: SubjectId,
        student_id: StudentId,
        status: Option<AttendanceStatus>,
    ) -> Result<Student, ServiceError> {
        let subject = self.subject_mut(subject_id)?;
        let student = subject
            .student_mut(student_id)
            .ok_or_else(|| ServiceError::not_found("student"))?;
        let status = status.ok_or_else(|| ServiceError::invalid_input("attendance status required"))?;
        student.status = status;
        Ok(student.clone())
    }
}
