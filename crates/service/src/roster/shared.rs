use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;

use super::model::{AttendanceStatus, Student, StudentId, Subject, SubjectId};
use super::store::{IdPolicy, RosterStore};

/// Process-wide handle to one [`RosterStore`].
///
/// A single `RwLock` guards the whole store: mutations take the write lock for
/// their full duration, so readers only ever see fully applied changes.
#[derive(Clone, Default)]
pub struct SharedRoster {
    inner: Arc<RwLock<RosterStore>>,
}

impl SharedRoster {
    pub fn new(policy: IdPolicy) -> Self {
        Self { inner: Arc::new(RwLock::new(RosterStore::with_policy(policy))) }
    }

    pub async fn list_subjects(&self) -> Vec<Subject> {
        let store = self.inner.read().await;
        debug!(count = store.len(), "list subjects");
        store.list_subjects().to_vec()
    }

    pub async fn get_subject(&self, id: SubjectId) -> Result<Subject, ServiceError> {
        let store = self.inner.read().await;
        store.get_subject(id).cloned()
    }

    pub async fn add_subject(&self, name: Option<String>) -> Result<Subject, ServiceError> {
        let mut store = self.inner.write().await;
        let subject = store.add_subject(name.as_deref())?;
        info!(event = "subject_added", subject_id = subject.id, name = %subject.name, "subject added");
        Ok(subject)
    }

    pub async fn delete_subject(&self, id: SubjectId) -> bool {
        let mut store = self.inner.write().await;
        let removed = store.delete_subject(id);
        info!(event = "subject_deleted", subject_id = id, removed, "subject delete");
        removed
    }

    pub async fn add_student(&self, subject_id: SubjectId, name: String) -> Result<Student, ServiceError> {
        let mut store = self.inner.write().await;
        let student = store.add_student(subject_id, &name)?;
        info!(event = "student_added", subject_id, student_id = student.id, "student added");
        Ok(student)
    }

    pub async fn delete_student(
        &self,
        subject_id: SubjectId,
        student_id: StudentId,
    ) -> Result<bool, ServiceError> {
        let mut store = self.inner.write().await;
        let removed = store.delete_student(subject_id, student_id)?;
        info!(event = "student_deleted", subject_id, student_id, removed, "student delete");
        Ok(removed)
    }

    pub async fn set_attendance(
        &self,
        subject_id: SubjectId,
        student_id: StudentId,
        status: Option<AttendanceStatus>,
    ) -> Result<Student, ServiceError> {
        let mut store = self.inner.write().await;
        let student = store.set_attendance(subject_id, student_id, status)?;
        info!(
            event = "attendance_updated",
            subject_id,
            student_id,
            status = %student.status,
            known = student.status.is_known(),
            "attendance updated"
        );
        Ok(student)
    }
}
